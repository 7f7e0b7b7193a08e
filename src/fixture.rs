// ABOUTME: Headless fixture file holding a widget tree snapshot plus its trigger bindings
// ABOUTME: Loaded from YAML or JSON depending on the file extension

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::{ReloadMode, TriggerSpec};
use crate::widget::{StaticTree, WidgetNode};

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML fixture: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON fixture: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FixtureError {
    pub fn category(&self) -> crate::error::ErrorCategory {
        match self {
            FixtureError::IoError(_) => crate::error::ErrorCategory::Reference,
            FixtureError::YamlError(_) | FixtureError::JsonError(_) => {
                crate::error::ErrorCategory::Syntax
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Patch the loaded tree and bindings instead of replacing them
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update: bool,

    #[serde(default)]
    pub widgets: Vec<WidgetNode>,

    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
}

impl Fixture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the widget tree described by this fixture
    pub fn tree(&self) -> StaticTree {
        StaticTree::from_nodes(self.widgets.clone())
    }

    pub fn reload_mode(&self) -> ReloadMode {
        if self.update {
            ReloadMode::Update
        } else {
            ReloadMode::Replace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Color, PropertyValue};
    use crate::widget::WidgetTree;

    const YAML: &str = r#"
widgets:
  - name: edit
    properties:
      - name: text
        value: { string: "echo hi" }
      - name: color
        value: { color: { red: 10, green: 20, blue: 30 } }
      - name: palette
        value: palette
triggers:
  - object: edit
    event: returnPressed()
    action: execute
    command: "{edit.text}"
  - object: edit
    event: textChanged()
    command: "echo changed"
"#;

    #[test]
    fn test_parse_yaml_fixture() {
        let fixture = Fixture::from_yaml(YAML).unwrap();
        assert_eq!(fixture.widgets.len(), 1);
        assert_eq!(fixture.triggers.len(), 2);
        assert_eq!(fixture.triggers[1].action, "");
        assert_eq!(fixture.reload_mode(), ReloadMode::Replace);

        let edit = &fixture.widgets[0];
        assert_eq!(
            edit.properties[1].value,
            PropertyValue::Color(Color {
                red: 10,
                green: 20,
                blue: 30
            })
        );
        assert_eq!(edit.properties[2].value, PropertyValue::Palette);

        let tree = fixture.tree();
        assert!(tree.find_by_name("edit").is_some());
    }

    #[test]
    fn test_parse_json_fixture() {
        let json = r#"{
            "widgets": [
                {"name": "w", "properties": [{"name": "n", "value": {"number": 7}}]}
            ]
        }"#;
        let fixture = Fixture::from_json(json).unwrap();
        assert_eq!(fixture.widgets[0].properties[0].value, PropertyValue::Number(7));
        assert!(fixture.triggers.is_empty());
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(&path, r#"{"widgets": [{"name": "a"}]}"#).unwrap();
        assert_eq!(Fixture::from_file(&path).unwrap().widgets[0].name, "a");

        let missing = Fixture::from_file(dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(FixtureError::IoError(_))));
    }

    #[test]
    fn test_update_flag_selects_reload_mode() {
        let fixture = Fixture::from_yaml("update: true\nwidgets:\n  - name: a\n").unwrap();
        assert!(fixture.update);
        assert_eq!(fixture.reload_mode(), ReloadMode::Update);
        assert!(!fixture.to_yaml().unwrap().contains("update: false"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Fixture::from_yaml("widgets: [ {name: "),
            Err(FixtureError::YamlError(_))
        ));
    }
}
