// ABOUTME: Integration tests for command template resolution against a widget tree
// ABOUTME: Covers escapes, sentinels, composite elements and bracket substitution

mod common;
use common::sample_tree;

use formbind::property::ResolveError;
use formbind::template::{apply_bracket_substitution, scan};
use formbind::{resolve_template, PropertyResolver};

#[test]
fn test_simple_property() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{btn.text}", &tree), "OK");
    assert_eq!(resolve_template("Label: {btn.text}!", &tree), "Label: OK!");
}

#[test]
fn test_composite_element() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{btn.color.green}", &tree), "20");
    assert_eq!(resolve_template("{ btn . color . BLUE }", &tree), "30");
}

#[test]
fn test_unknown_element_yields_sentinel_and_usage() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{btn.color.alpha}", &tree), "{btn.color.alpha}");

    let err = PropertyResolver::new(&tree)
        .resolve_command("btn.color.alpha")
        .unwrap_err();
    let usage = err.usage().unwrap();
    assert!(usage.contains("btn.color.red\n"));
    assert!(usage.contains("btn.color.green\n"));
    assert!(usage.contains("btn.color.blue\n"));
    assert!(err.to_string().starts_with("Unsupported Color element 'alpha'."));
}

#[test]
fn test_short_commands_never_resolve() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{btn}", &tree), "{btn}");
    assert_eq!(resolve_template("{}", &tree), "{}");
    assert!(matches!(
        PropertyResolver::new(&tree).resolve_command("btn"),
        Err(ResolveError::MissingPropertyName { .. })
    ));
}

#[test]
fn test_missing_references_yield_sentinel() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{ghost.text}", &tree), "{ghost.text}");
    assert_eq!(resolve_template("{btn.ghost}", &tree), "{btn.ghost}");
}

#[test]
fn test_escaped_brace() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("\\{literal}", &tree), "{literal}");
    assert_eq!(resolve_template("\\{btn.text} {btn.text}", &tree), "{btn.text} OK");
}

#[test]
fn test_string_list() {
    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{list.items}", &tree), "one,two");
}

#[test]
fn test_marker_free_text_only_gets_bracket_substitution() {
    let tree = sample_tree("echo hi");
    let text = "no [[markers]] here";
    assert_eq!(resolve_template(text, &tree), apply_bracket_substitution(text));
}

#[test]
fn test_bracket_substitution_is_idempotent() {
    let once = apply_bracket_substitution("[[a]] [[[b]]]");
    assert_eq!(apply_bracket_substitution(&once), once);
}

#[test]
fn test_unterminated_command_is_kept() {
    let scan = scan("value {btn.text", |_| unreachable!());
    assert_eq!(scan.text, "value {btn.text");
    assert!(scan.error.is_some());

    let tree = sample_tree("echo hi");
    assert_eq!(resolve_template("{btn.text} {edit", &tree), "OK {edit");
}
