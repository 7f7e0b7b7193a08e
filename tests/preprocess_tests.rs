// ABOUTME: Integration tests for the directive preprocessor
// ABOUTME: Exercises comment stripping and include expansion through real files

mod common;
use common::TestEnvironment;

use formbind::preprocess::PreprocessError;
use formbind::{Document, ErrorCategory, Preprocessor};

#[test]
fn test_marker_free_text_is_unchanged() {
    let text = "<ui>\n  <label text=\"plain\"/>\n</ui>\n";
    let doc = Preprocessor::new().process_str(text);
    assert_eq!(doc.text(), text);
}

#[test]
fn test_process_file_expands_relative_includes() {
    let env = TestEnvironment::new();
    env.write("forms/header.ui", "<header/> # shared header\n");
    let main = env.write(
        "forms/main.ui",
        "<ui>\n#include \"header.ui\"\n<body/> # body\n</ui>\n",
    );

    let doc = Preprocessor::new().process_file(&main).unwrap();
    assert_eq!(doc.text(), "<ui>\n<header/> \n\n\n<body/> \n</ui>\n");
}

#[test]
fn test_ignored_elements_do_not_abort_include() {
    let env = TestEnvironment::new();
    env.write("part.ui", "part");
    let main = env.write("main.ui", "#include stray \"part.ui\" tail");

    let report = Preprocessor::new().process_report(&Document::from_file(&main).unwrap());
    assert!(report.errors.is_empty());
    assert_eq!(report.document.text(), "part\n\n\n");
}

#[test]
fn test_same_file_from_different_lines_is_included_twice() {
    let env = TestEnvironment::new();
    env.write("row.ui", "row");
    let main = env.write("main.ui", "#include \"row.ui\"\n#include \"row.ui\"");

    let doc = Preprocessor::new().process_file(&main).unwrap();
    assert_eq!(doc.text(), "row\n\n\nrow\n\n\n");
}

#[test]
fn test_cycle_stops_at_identical_origin_key() {
    let env = TestEnvironment::new();
    let a = env.write("a.ui", "#include \"b.ui\"");
    env.write("b.ui", "#include \"a.ui\"");

    let report = Preprocessor::new().process_report(&Document::from_file(&a).unwrap());
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, PreprocessError::AlreadyIncluded { .. })));
    assert!(report
        .errors
        .iter()
        .all(|e| e.category() == ErrorCategory::Reference));
}

#[test]
fn test_base_dir_applies_to_inline_documents() {
    let env = TestEnvironment::new();
    env.write("inc.ui", "included");

    let doc = Preprocessor::new()
        .with_base_dir(env.path())
        .process_str("#include \"inc.ui\"");
    assert_eq!(doc.text(), "included\n\n\n");
}

#[test]
fn test_unreadable_top_level_file() {
    let env = TestEnvironment::new();
    assert!(Preprocessor::new()
        .process_file(env.path().join("missing.ui"))
        .is_err());
}
