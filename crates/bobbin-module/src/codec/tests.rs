//! Unit tests for the reference JSON codec.

use std::fs;
use std::path::{Path, PathBuf};

use super::*;
use crate::image::TypeEntry;

fn write_module(dir: &Path, file_name: &str) -> PathBuf {
    let image = ModuleImage::new("App.Core", vec![TypeEntry::new("OrderService")]);
    let binary = dir.join(file_name);
    JsonFileCodec
        .write(&image, &binary, SymbolFormat::None)
        .expect("write fixture module");
    binary
}

#[test]
fn read_without_symbols_leaves_payload_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = write_module(dir.path(), "App.Core.dll");
    let image = JsonFileCodec
        .read(&binary, SymbolFormat::None)
        .expect("readable");
    assert_eq!(image.name(), "App.Core");
    assert!(image.symbols().is_none());
}

#[test]
fn read_with_pdb_attaches_symbol_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = write_module(dir.path(), "App.Core.dll");
    fs::write(dir.path().join("App.Core.pdb"), b"pdb-payload").expect("write pdb");
    let image = JsonFileCodec
        .read(&binary, SymbolFormat::Pdb)
        .expect("readable");
    assert_eq!(
        image.symbols().expect("payload").payload(),
        b"pdb-payload"
    );
}

#[test]
fn write_with_mdb_emits_the_paired_symbol_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    let image = ModuleImage::new("App.Core", vec![TypeEntry::new("OrderService")])
        .with_symbols(SymbolData::new(b"payload".to_vec()));
    JsonFileCodec
        .write(&image, &binary, SymbolFormat::Mdb)
        .expect("write");
    let mdb = fs::read(dir.path().join("App.Core.dll.mdb")).expect("mdb exists");
    assert_eq!(mdb, b"payload");
}

#[test]
fn binary_bytes_do_not_embed_the_symbol_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("App.Core.dll");
    let plain = ModuleImage::new("App.Core", vec![TypeEntry::new("OrderService")]);
    let with_symbols = plain.clone().with_symbols(SymbolData::new(b"payload".to_vec()));

    JsonFileCodec
        .write(&plain, &binary, SymbolFormat::None)
        .expect("write plain");
    let plain_bytes = fs::read(&binary).expect("read plain");
    JsonFileCodec
        .write(&with_symbols, &binary, SymbolFormat::Mdb)
        .expect("write with symbols");
    let symbol_bytes = fs::read(&binary).expect("read with symbols");
    assert_eq!(plain_bytes, symbol_bytes);
}

#[test]
fn failed_symbol_write_leaves_the_binary_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = write_module(dir.path(), "App.Core.dll");
    let before = fs::read(&binary).expect("original bytes");
    // A directory at the symbol path makes the symbol write fail.
    fs::create_dir(dir.path().join("App.Core.dll.mdb")).expect("occupy symbol path");

    let image = ModuleImage::new("App.Core", vec![TypeEntry::new("Rewritten")])
        .with_symbols(SymbolData::new(b"payload".to_vec()));
    let err = JsonFileCodec
        .write(&image, &binary, SymbolFormat::Mdb)
        .expect_err("blocked symbol path");
    assert!(matches!(err, ModuleError::Write { .. }));
    assert_eq!(fs::read(&binary).expect("original bytes"), before);
}

#[test]
fn missing_binary_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = JsonFileCodec
        .read(&dir.path().join("Missing.dll"), SymbolFormat::None)
        .expect_err("missing file");
    assert!(matches!(err, ModuleError::Read { .. }));
}

#[test]
fn garbage_content_is_a_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("Broken.dll");
    fs::write(&binary, b"not json").expect("write garbage");
    let err = JsonFileCodec
        .read(&binary, SymbolFormat::None)
        .expect_err("garbage content");
    assert!(matches!(err, ModuleError::Decode { .. }));
}
