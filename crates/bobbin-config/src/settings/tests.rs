//! Unit tests for deferred settings parsing.

use super::*;

#[test]
fn parses_attributes_text_and_children() {
    let settings = SettingsElement::parse(
        "Alpha.Weaver",
        "<Alpha Level=\"3\" Mode=\"fast\"><Skip Pattern=\"*.g\" />inline</Alpha>",
    )
    .expect("valid fragment");
    assert_eq!(settings.name(), "Alpha");
    assert_eq!(settings.attribute("Level"), Some("3"));
    assert_eq!(settings.attribute("Mode"), Some("fast"));
    assert_eq!(settings.attribute("Missing"), None);
    assert_eq!(settings.text(), Some("inline"));
    let skip = settings.child("Skip").expect("skip child");
    assert_eq!(skip.attribute("Pattern"), Some("*.g"));
}

#[test]
fn children_preserve_order() {
    let settings = SettingsElement::parse("W", "<W><A /><B /><A /></W>").expect("valid fragment");
    let names: Vec<&str> = settings.children().iter().map(SettingsElement::name).collect();
    assert_eq!(names, ["A", "B", "A"]);
}

#[test]
fn invalid_fragment_names_the_weaver() {
    let err = SettingsElement::parse("Beta.Weaver", "<Beta>").expect_err("unterminated element");
    assert!(matches!(err, ConfigError::Settings { .. }));
    assert!(err.to_string().contains("Beta.Weaver"));
}
