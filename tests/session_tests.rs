// ABOUTME: Integration tests for the headless session reload path
// ABOUTME: Documents printed by fired commands are loaded back and their bindings fired in turn

mod common;
use common::{sample_tree, TestFixtureBuilder};

use formbind::cli::{Session, SessionError, SessionEvent};
use formbind::engine::{BindingError, ProcessConfig, ProcessError, ReloadMode};
use formbind::preprocess::PreprocessConfig;
use formbind::widget::WidgetTree;

const REBIND_EDIT: &str = r"printf 'update: true\ntriggers:\n  - object: edit\n    event: returnPressed\n    action: return\n    command: done\n'";

fn session() -> Session {
    Session::new(ProcessConfig::default(), &PreprocessConfig::default())
}

#[tokio::test]
async fn test_update_document_rebinds_and_new_binding_fires() {
    let mut session = session();
    let fixture = TestFixtureBuilder::new(&sample_tree("unused"))
        .execute("btn", "clicked()", REBIND_EDIT)
        .build();
    session.load(&fixture).unwrap();

    let events = session.fire("btn", "clicked()").await.unwrap();
    assert_eq!(events.len(), 1);
    match &events[0] {
        SessionEvent::Reloaded { mode, report, .. } => {
            assert_eq!(*mode, ReloadMode::Update);
            assert_eq!(report.registered.len(), 1);
        }
        other => panic!("expected a reload, got {:?}", other),
    }
    assert_eq!(session.engine().registry().len(), 2);

    let events = session.fire("edit", "returnPressed()").await.unwrap();
    assert!(matches!(&events[..], [SessionEvent::Answer(text)] if text == "done"));
}

#[tokio::test]
async fn test_replace_document_drops_previous_bindings() {
    let mut session = session();
    let fixture = TestFixtureBuilder::new(&sample_tree("unused"))
        .execute("btn", "clicked()", "echo 'widgets: [name: fresh] # new form'")
        .build();
    session.load(&fixture).unwrap();

    let events = session.fire("btn", "clicked()").await.unwrap();
    assert!(matches!(
        &events[..],
        [SessionEvent::Reloaded { mode: ReloadMode::Replace, document, .. }]
            if document == "widgets: [name: fresh] \n"
    ));

    let tree = session.host().tree();
    assert!(tree.find_by_name("fresh").is_some());
    assert!(tree.find_by_name("btn").is_none());
    assert!(matches!(
        session.fire("btn", "clicked()").await,
        Err(SessionError::Binding(BindingError::TriggerNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_unparseable_document_leaves_form_alone() {
    let mut session = session();
    let fixture = TestFixtureBuilder::new(&sample_tree("unused"))
        .execute("btn", "clicked()", "echo oops")
        .build();
    session.load(&fixture).unwrap();

    let events = session.fire("btn", "clicked()").await.unwrap();
    assert!(matches!(
        &events[..],
        [SessionEvent::Rejected { document, error: SessionError::InvalidDocument(_) }]
            if document == "oops\n"
    ));
    assert_eq!(session.engine().registry().len(), 1);
    assert!(session.host().tree().find_by_name("edit").is_some());
}

#[tokio::test]
async fn test_failed_run_is_reported() {
    let mut session = session();
    let fixture = TestFixtureBuilder::new(&sample_tree("exit 3"))
        .execute("edit", "returnPressed()", "{edit.text}")
        .build();
    session.load(&fixture).unwrap();

    let events = session.fire("edit", "returnPressed()").await.unwrap();
    assert!(matches!(
        &events[..],
        [SessionEvent::Failed(ProcessError::NonZeroExit { code: 3, .. })]
    ));
}
