//! Unit tests for module target discovery.

use std::fs;

use super::*;

#[test]
fn discover_records_absent_symbols() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    fs::write(&binary, b"x").expect("create binary");

    let target = ModuleTarget::discover(&binary);
    assert_eq!(target.binary_path(), binary);
    assert_eq!(target.symbols(), SymbolFormat::None);
}

#[test]
fn discover_prefers_pdb_over_mdb() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    fs::write(&binary, b"x").expect("create binary");
    fs::write(dir.path().join("App.Core.pdb"), b"x").expect("create pdb");
    fs::write(dir.path().join("App.Core.dll.mdb"), b"x").expect("create mdb");

    assert_eq!(ModuleTarget::discover(&binary).symbols(), SymbolFormat::Pdb);
}
