//! Unit tests for the directory-backed asset index.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fs;
use std::path::Path;

use rstest::rstest;

use super::*;

fn dylib_name(stem: &str) -> String {
    format!("{DLL_PREFIX}{stem}{DLL_SUFFIX}")
}

fn touch(path: &Path) {
    fs::write(path, b"x").expect("create fixture file");
}

#[test]
fn finds_exact_platform_library_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join(dylib_name("alpha_weaver"));
    touch(&target);

    let index = DirectoryIndex::new(vec![dir.path().to_path_buf()]);
    assert_eq!(index.find_weaver_binary("Alpha.Weaver"), Some(target));
}

#[test]
fn falls_back_to_normalized_stem_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join(dylib_name("Alpha-Weaver"));
    touch(&target);

    let index = DirectoryIndex::new(vec![dir.path().to_path_buf()]);
    assert_eq!(index.find_weaver_binary("Alpha.Weaver"), Some(target));
}

#[test]
fn ignores_non_library_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(&dir.path().join("alpha_weaver.txt"));

    let index = DirectoryIndex::new(vec![dir.path().to_path_buf()]);
    assert!(index.find_weaver_binary("Alpha.Weaver").is_none());
}

#[test]
fn exact_match_wins_over_stem_match_in_later_directory() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    let stem_only = first.path().join(dylib_name("Alpha.Weaver"));
    let exact = second.path().join(dylib_name("alpha_weaver"));
    touch(&stem_only);
    touch(&exact);

    let index = DirectoryIndex::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    assert_eq!(index.find_weaver_binary("Alpha.Weaver"), Some(exact));
}

#[rstest]
#[case::dots("Alpha.Weaver", "alpha_weaver")]
#[case::dashes("Alpha-Weaver", "alpha_weaver")]
#[case::mixed_case("ALPHA.Weaver", "alpha_weaver")]
#[case::already_normal("alpha_weaver", "alpha_weaver")]
fn stem_keys_normalize_separators_and_case(#[case] name: &str, #[case] key: &str) {
    assert_eq!(stem_key(name), key);
}

#[test]
fn missing_directory_is_not_an_error() {
    let index = DirectoryIndex::new(vec![PathBuf::from("/does/not/exist")]);
    assert!(index.find_weaver_binary("Alpha.Weaver").is_none());
}
