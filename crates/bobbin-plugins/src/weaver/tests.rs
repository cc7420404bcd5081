//! Unit tests for the weaver trait surface.

use std::path::Path;

use bobbin_module::{ModuleImage, TypeEntry};

use super::*;

#[derive(Default)]
struct PlainWeaver;

impl Weaver for PlainWeaver {
    fn execute(&mut self, ctx: &mut WeaveContext<'_>) -> Result<(), WeaveError> {
        ctx.module_mut().add_type(TypeEntry::new("Stamped"));
        Ok(())
    }
}

#[test]
fn capability_queries_default_to_none() {
    let mut weaver = PlainWeaver;
    assert!(weaver.settings_sink().is_none());
    assert!(weaver.resolver_sink().is_none());
    assert!(weaver.log_sink().is_none());
}

#[test]
fn context_exposes_module_and_path() {
    let mut image = ModuleImage::new("App.Core", vec![]);
    let path = Path::new("/out/App.Core.dll");
    let mut ctx = WeaveContext::new(&mut image, path);
    assert_eq!(ctx.module().name(), "App.Core");
    assert_eq!(ctx.module_path(), path);

    PlainWeaver.execute(&mut ctx).expect("stamp succeeds");
    assert!(image.has_type("Stamped"));
}

#[test]
fn weave_error_helpers_carry_the_message() {
    assert_eq!(WeaveError::failed("broke").to_string(), "broke");
    assert_eq!(
        WeaveError::settings("bad level").to_string(),
        "settings rejected: bad level"
    );
}
