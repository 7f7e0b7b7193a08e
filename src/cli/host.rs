// ABOUTME: Headless document host used by the command line front end
// ABOUTME: Serves a swappable fixture-backed widget tree and queues whatever the triggers produce

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::DocumentHost;
use crate::widget::{StaticTree, WidgetNode, WidgetTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutput {
    Document(String),
    Answer(String),
}

pub struct ConsoleHost {
    tree: RefCell<Rc<StaticTree>>,
    outputs: RefCell<Vec<HostOutput>>,
}

impl ConsoleHost {
    pub fn new(tree: StaticTree) -> Self {
        Self {
            tree: RefCell::new(Rc::new(tree)),
            outputs: RefCell::new(Vec::new()),
        }
    }

    pub fn tree(&self) -> Rc<StaticTree> {
        self.tree.borrow().clone()
    }

    /// Swap in a whole new tree. Snapshots taken before keep the old one.
    pub fn set_tree(&self, tree: StaticTree) {
        *self.tree.borrow_mut() = Rc::new(tree);
    }

    /// Patch the current tree with `nodes`, matched by widget name
    pub fn update_tree(&self, nodes: &[WidgetNode]) {
        let mut tree = StaticTree::clone(&self.tree.borrow());
        tree.merge(nodes);
        self.set_tree(tree);
    }

    /// Drain everything delivered so far, oldest first
    pub fn take_outputs(&self) -> Vec<HostOutput> {
        std::mem::take(&mut *self.outputs.borrow_mut())
    }
}

impl DocumentHost for ConsoleHost {
    fn widget_tree(&self) -> Rc<dyn WidgetTree> {
        self.tree()
    }

    fn on_document_ready(&self, text: &str) {
        self.outputs
            .borrow_mut()
            .push(HostOutput::Document(text.to_string()));
    }

    fn on_final_answer(&self, text: &str) {
        self.outputs
            .borrow_mut()
            .push(HostOutput::Answer(text.to_string()));
    }
}
