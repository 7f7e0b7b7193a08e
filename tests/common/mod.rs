// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a recording document host, fixture builders and temp file environments

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

use formbind::engine::{DocumentHost, TriggerSpec};
use formbind::property::{Color, PropertyValue};
use formbind::widget::{StaticTree, WidgetNode, WidgetTree};
use formbind::Fixture;

/// Host that records every delivery for later assertions
pub struct RecordingHost {
    tree: RefCell<Rc<StaticTree>>,
    pub documents: RefCell<Vec<String>>,
    pub answers: RefCell<Vec<String>>,
}

impl RecordingHost {
    pub fn new(tree: StaticTree) -> Rc<Self> {
        Rc::new(Self {
            tree: RefCell::new(Rc::new(tree)),
            documents: RefCell::new(Vec::new()),
            answers: RefCell::new(Vec::new()),
        })
    }

    /// Swap the tree that later firings resolve against
    pub fn set_tree(&self, tree: StaticTree) {
        *self.tree.borrow_mut() = Rc::new(tree);
    }

    pub fn as_dyn(self: &Rc<Self>) -> Rc<dyn DocumentHost> {
        self.clone()
    }

    pub fn documents(&self) -> Vec<String> {
        self.documents.borrow().clone()
    }

    pub fn answers(&self) -> Vec<String> {
        self.answers.borrow().clone()
    }
}

impl DocumentHost for RecordingHost {
    fn widget_tree(&self) -> Rc<dyn WidgetTree> {
        self.tree.borrow().clone()
    }

    fn on_document_ready(&self, text: &str) {
        self.documents.borrow_mut().push(text.to_string());
    }

    fn on_final_answer(&self, text: &str) {
        self.answers.borrow_mut().push(text.to_string());
    }
}

/// A small form: a button, a line edit holding a shell command, and a list
pub fn sample_tree(edit_text: &str) -> StaticTree {
    StaticTree::new()
        .with_widget(
            WidgetNode::new("btn")
                .with_property("text", PropertyValue::String("OK".to_string()))
                .with_property(
                    "color",
                    PropertyValue::Color(Color {
                        red: 10,
                        green: 20,
                        blue: 30,
                    }),
                ),
        )
        .with_widget(
            WidgetNode::new("edit")
                .with_property("text", PropertyValue::String(edit_text.to_string())),
        )
        .with_widget(WidgetNode::new("list").with_property(
            "items",
            PropertyValue::StringList(vec!["one".to_string(), "two".to_string()]),
        ))
}

pub struct TestFixtureBuilder {
    fixture: Fixture,
}

impl TestFixtureBuilder {
    pub fn new(tree: &StaticTree) -> Self {
        Self {
            fixture: Fixture {
                widgets: tree.widgets().to_vec(),
                ..Fixture::default()
            },
        }
    }

    pub fn execute(mut self, object: &str, event: &str, command: &str) -> Self {
        self.fixture
            .triggers
            .push(TriggerSpec::new(object, event, "execute", command));
        self
    }

    pub fn returning(mut self, object: &str, event: &str, command: &str) -> Self {
        self.fixture
            .triggers
            .push(TriggerSpec::new(object, event, "return", command));
        self
    }

    pub fn build(self) -> Fixture {
        self.fixture
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    pub fn write_fixture(&self, name: &str, fixture: &Fixture) -> PathBuf {
        let yaml = fixture.to_yaml().expect("Failed to serialize fixture");
        self.write(name, &yaml)
    }
}
