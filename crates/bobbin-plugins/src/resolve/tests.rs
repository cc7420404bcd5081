//! Unit tests for the search-path assembly resolver.

use std::fs;

use super::*;

#[test]
fn resolves_literal_file_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("App.Core.dll");
    fs::write(&target, b"x").expect("create fixture");

    let resolver = SearchPathResolver::with_directories(vec![dir.path().to_path_buf()]);
    assert_eq!(resolver.resolve("App.Core.dll"), Some(target));
}

#[test]
fn appends_dll_extension_for_bare_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("App.Core.dll");
    fs::write(&target, b"x").expect("create fixture");

    let resolver = SearchPathResolver::with_directories(vec![dir.path().to_path_buf()]);
    assert_eq!(resolver.resolve("App.Core"), Some(target));
}

#[test]
fn probes_directories_in_order() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    fs::write(first.path().join("App.Core.dll"), b"first").expect("create first");
    fs::write(second.path().join("App.Core.dll"), b"second").expect("create second");

    let resolver = SearchPathResolver::with_directories(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    assert_eq!(
        resolver.resolve("App.Core.dll"),
        Some(first.path().join("App.Core.dll"))
    );
}

#[test]
fn unknown_name_resolves_to_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let resolver = SearchPathResolver::with_directories(vec![dir.path().to_path_buf()]);
    assert!(resolver.resolve("Missing").is_none());
}
