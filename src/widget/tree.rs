// ABOUTME: In-memory widget tree built from code or deserialized from a fixture file
// ABOUTME: Lets the engine resolve commands and fire triggers without a GUI toolkit

use serde::{Deserialize, Serialize};

use super::{NodeHandle, WidgetTree};
use crate::property::{Property, PropertyValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetNode {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl WidgetNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Replace the first property called `name`, or append it
    pub fn set_property(&mut self, name: &str, value: PropertyValue) {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(property) => property.value = value,
            None => self.properties.push(Property::new(name, value)),
        }
    }
}

/// Flat list of named widgets; handles are positions in the list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticTree {
    #[serde(default)]
    widgets: Vec<WidgetNode>,
}

impl StaticTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(widgets: Vec<WidgetNode>) -> Self {
        Self { widgets }
    }

    pub fn with_widget(mut self, node: WidgetNode) -> Self {
        self.insert(node);
        self
    }

    pub fn insert(&mut self, node: WidgetNode) -> NodeHandle {
        self.widgets.push(node);
        NodeHandle::new(self.widgets.len() - 1)
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&WidgetNode> {
        self.widgets.get(handle.id())
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut WidgetNode> {
        self.widgets.get_mut(handle.id())
    }

    /// Merge `nodes` into the tree: known widgets get their properties set,
    /// unknown ones are appended
    pub fn merge(&mut self, nodes: &[WidgetNode]) {
        for node in nodes {
            match self.find_by_name(&node.name).and_then(|h| self.node_mut(h)) {
                Some(existing) => {
                    for property in &node.properties {
                        existing.set_property(&property.name, property.value.clone());
                    }
                }
                None => {
                    self.insert(node.clone());
                }
            }
        }
    }

    pub fn widgets(&self) -> &[WidgetNode] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl WidgetTree for StaticTree {
    fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.widgets
            .iter()
            .position(|w| w.name == name)
            .map(NodeHandle::new)
    }

    fn snapshot_properties(&self, node: NodeHandle) -> Option<Vec<Property>> {
        self.node(node).map(|w| w.properties.clone())
    }
}
