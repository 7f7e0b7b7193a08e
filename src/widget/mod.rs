// ABOUTME: Capabilities the engine consumes from the external widget tree
// ABOUTME: Defines node lookup and property snapshots plus an in-memory tree implementation

pub mod tree;

pub use tree::{StaticTree, WidgetNode};

use crate::property::Property;

/// Opaque reference to a node, handed out by the tree that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn id(self) -> usize {
        self.0
    }
}

/// An introspectable object tree.
///
/// Implementations are read-only from the engine's point of view: the engine
/// never creates, renders or modifies nodes.
pub trait WidgetTree {
    /// Locate a node by its object name
    fn find_by_name(&self, name: &str) -> Option<NodeHandle>;

    /// Properties of `node` in declaration order, or `None` if the node
    /// cannot be introspected
    fn snapshot_properties(&self, node: NodeHandle) -> Option<Vec<Property>>;
}
