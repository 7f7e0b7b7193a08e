// ABOUTME: Capability the trigger engine needs from whatever owns the live document
// ABOUTME: Supplies the current widget tree and receives replacement documents and final answers

use std::rc::Rc;

use crate::widget::WidgetTree;

pub trait DocumentHost {
    /// Tree that commands are resolved against at firing time
    fn widget_tree(&self) -> Rc<dyn WidgetTree>;

    /// A process produced a full replacement document
    fn on_document_ready(&self, text: &str);

    /// A `return` trigger produced its resolved value
    fn on_final_answer(&self, text: &str);
}
