//! Unit tests for symbol format probing and path derivation.

use std::fs;
use std::path::Path;

use rstest::rstest;

use super::*;

fn touch(path: &Path) {
    fs::write(path, b"x").expect("create fixture file");
}

// ---------------------------------------------------------------------------
// Probing
// ---------------------------------------------------------------------------

#[test]
fn probe_selects_none_when_no_symbol_file_exists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    touch(&binary);
    assert_eq!(SymbolFormat::probe(&binary), SymbolFormat::None);
}

#[test]
fn probe_selects_mdb_when_only_mdb_exists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    touch(&binary);
    touch(&dir.path().join("App.Core.dll.mdb"));
    assert_eq!(SymbolFormat::probe(&binary), SymbolFormat::Mdb);
}

#[test]
fn probe_prefers_pdb_when_both_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    touch(&binary);
    touch(&dir.path().join("App.Core.pdb"));
    touch(&dir.path().join("App.Core.dll.mdb"));
    assert_eq!(SymbolFormat::probe(&binary), SymbolFormat::Pdb);
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[rstest]
#[case::none(SymbolFormat::None, SymbolFormat::None)]
#[case::pdb(SymbolFormat::Pdb, SymbolFormat::Mdb)]
#[case::mdb(SymbolFormat::Mdb, SymbolFormat::Mdb)]
fn writes_normalize_to_mdb(#[case] read: SymbolFormat, #[case] written: SymbolFormat) {
    assert_eq!(read.write_format(), written);
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn pdb_path_replaces_the_extension() {
    let path = SymbolFormat::Pdb
        .symbol_path(Path::new("/out/App.Core.dll"))
        .expect("pdb path");
    assert_eq!(path, Path::new("/out/App.Core.pdb"));
}

#[test]
fn mdb_path_suffixes_the_full_name() {
    let path = SymbolFormat::Mdb
        .symbol_path(Path::new("/out/App.Core.dll"))
        .expect("mdb path");
    assert_eq!(path, Path::new("/out/App.Core.dll.mdb"));
}

#[test]
fn none_has_no_symbol_path() {
    assert!(SymbolFormat::None.symbol_path(Path::new("/out/App.Core.dll")).is_none());
}
