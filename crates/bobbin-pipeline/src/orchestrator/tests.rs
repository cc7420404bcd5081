//! Unit tests for the orchestrator's run-level behaviour.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bobbin_config::ConfigError;
use bobbin_module::{JsonFileCodec, ModuleCodec, ModuleImage, SymbolFormat, TypeEntry};
use bobbin_plugins::testing::{Journal, MapLoader, ScriptedWeaver, StaticIndex, StaticLibrary};
use bobbin_plugins::{BuiltinWeaver, Disposition, WEAVER_ENTRY_SYMBOL};

use crate::PROCESSED_MARKER;

use super::*;

fn write_module(dir: &Path, file_name: &str) -> PathBuf {
    let binary = dir.join(file_name);
    let image = ModuleImage::new("App.Core", vec![TypeEntry::new("Orders")]);
    JsonFileCodec
        .write(&image, &binary, SymbolFormat::None)
        .expect("write fixture module");
    binary
}

fn builtin(name: &'static str, journal: &Journal) -> BuiltinWeaver {
    let journal = journal.clone();
    BuiltinWeaver::new(name, move || Box::new(ScriptedWeaver::new(name, &journal)))
}

fn read_back(binary: &Path) -> ModuleImage {
    JsonFileCodec
        .read(binary, SymbolFormat::None)
        .expect("read back module")
}

#[test]
fn malformed_document_aborts_before_touching_modules() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let binary = write_module(dir.path(), "App.Core.dll");
    let before = fs::read(&binary).expect("module bytes");

    let mut orchestrator = Orchestrator::new(JsonFileCodec, StaticIndex::new(), MapLoader::new())
        .with_builtin(builtin("Alpha.Weaver", &journal));
    let err = orchestrator
        .run(Some("<Weavers><Unclosed></Weavers>"), &[binary.clone()])
        .expect_err("malformed document");

    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert_eq!(fs::read(&binary).expect("module bytes"), before);
    assert!(journal.entries().is_empty());
}

#[test]
fn fallback_run_processes_only_the_default_set() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let core = write_module(dir.path(), "App.Core.dll");
    let extra = write_module(dir.path(), "Extra.dll");

    let mut orchestrator = Orchestrator::new(JsonFileCodec, StaticIndex::new(), MapLoader::new())
        .with_builtin(builtin("Alpha.Weaver", &journal));
    let report = orchestrator
        .run(None, &[core.clone(), extra.clone()])
        .expect("fallback run");

    assert_eq!(report.modules().len(), 1);
    let only = report.modules().first().expect("one module");
    assert_eq!(only.path(), core.as_path());
    assert!(report.outcome_of(&extra).is_none());
    assert!(read_back(&core).has_type(PROCESSED_MARKER));
    assert!(!read_back(&extra).has_type(PROCESSED_MARKER));
}

#[test]
fn explicit_process_set_replaces_the_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let core = write_module(dir.path(), "App.Core.dll");
    let extra = write_module(dir.path(), "Extra.dll");

    let mut orchestrator = Orchestrator::new(JsonFileCodec, StaticIndex::new(), MapLoader::new())
        .with_builtin(builtin("Alpha.Weaver", &journal));
    let report = orchestrator
        .run(
            Some("<Weavers ProcessAssemblies=\"Extra.dll\" />"),
            &[core.clone(), extra.clone()],
        )
        .expect("explicit run");

    assert_eq!(report.modules().len(), 1);
    let only = report.modules().first().expect("one module");
    assert_eq!(only.path(), extra.as_path());
    assert!(read_back(&extra).has_type(PROCESSED_MARKER));
    assert!(!read_back(&core).has_type(PROCESSED_MARKER));
}

#[test]
fn module_failure_never_aborts_the_rest_of_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let missing = dir.path().join("App.Core.dll");
    let scripts = write_module(dir.path(), "App.Scripts.dll");

    let mut orchestrator = Orchestrator::new(JsonFileCodec, StaticIndex::new(), MapLoader::new())
        .with_builtin(builtin("Alpha.Weaver", &journal));
    let report = orchestrator
        .run(None, &[missing.clone(), scripts.clone()])
        .expect("run survives the unreadable module");

    assert_eq!(report.modules().len(), 2);
    assert!(report.outcome_of(&missing).expect("recorded").is_err());
    assert!(matches!(
        report.outcome_of(&scripts),
        Some(Ok(ModuleOutcome::Woven { .. }))
    ));
    assert!(read_back(&scripts).has_type(PROCESSED_MARKER));
}

#[test]
fn weaver_binaries_load_once_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let first = write_module(dir.path(), "App.Core.dll");
    let second = write_module(dir.path(), "App.Scripts.dll");

    let binary = dir.path().join("Alpha.Weaver.dll");
    let factory_journal = journal.clone();
    let loader = MapLoader::new().with_library(StaticLibrary::new(
        &binary,
        WEAVER_ENTRY_SYMBOL,
        Arc::new(move || Box::new(ScriptedWeaver::new("Alpha.Weaver", &factory_journal))),
    ));
    let loads = loader.counter();
    let index = StaticIndex::new().with_binary("Alpha.Weaver", &binary);

    let mut orchestrator = Orchestrator::new(JsonFileCodec, index, loader);
    let document = "<Weavers><Alpha /></Weavers>";

    let report = orchestrator
        .run(Some(document), &[first.clone()])
        .expect("first run");
    assert_eq!(
        report.lineup().disposition_of("Alpha.Weaver"),
        Some(&Disposition::Active)
    );
    let report = orchestrator
        .run(Some(document), &[second.clone()])
        .expect("second run");
    assert_eq!(report.lineup().active_count(), 1);

    assert_eq!(loads.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(
        journal.entries(),
        ["Alpha.Weaver:App.Core.dll", "Alpha.Weaver:App.Scripts.dll"]
    );
}

#[test]
fn rerun_of_a_marked_module_is_a_byte_identical_no_op() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = Journal::new();
    let binary = write_module(dir.path(), "App.Core.dll");

    let mut orchestrator = Orchestrator::new(JsonFileCodec, StaticIndex::new(), MapLoader::new())
        .with_builtin(builtin("Alpha.Weaver", &journal));
    orchestrator
        .run(None, &[binary.clone()])
        .expect("first run");
    let after_first = fs::read(&binary).expect("woven bytes");

    let report = orchestrator
        .run(None, &[binary.clone()])
        .expect("second run");
    assert!(matches!(
        report.outcome_of(&binary),
        Some(Ok(ModuleOutcome::AlreadyWoven))
    ));
    assert_eq!(fs::read(&binary).expect("woven bytes"), after_first);
}
