// ABOUTME: Resolves `widget.property[.element]` commands against a live widget tree
// ABOUTME: Dispatches on the property kind and renders the value or one of its elements as text

use tracing::{debug, warn};

use super::command::{Command, SEPARATOR};
use super::error::{ResolveError, Result};
use super::value::{Composite, PropertyValue};
use crate::widget::WidgetTree;

const USAGE_HEADER: &str = "Use one of the following:\n";

/// Read-only view of a widget tree that turns commands into text
pub struct PropertyResolver<'a> {
    tree: &'a dyn WidgetTree,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(tree: &'a dyn WidgetTree) -> Self {
        Self { tree }
    }

    /// Resolve one command (the text between the braces, without them)
    pub fn resolve_command(&self, text: &str) -> Result<String> {
        let command = Command::parse(text);

        let widget = command
            .widget()
            .ok_or_else(|| ResolveError::MissingWidgetName {
                command: text.to_string(),
            })?;
        let property = command
            .property()
            .ok_or_else(|| ResolveError::MissingPropertyName {
                command: text.to_string(),
            })?;

        let node = self
            .tree
            .find_by_name(widget)
            .ok_or_else(|| ResolveError::WidgetNotFound {
                widget: widget.to_string(),
            })?;

        let snapshot =
            self.tree
                .snapshot_properties(node)
                .ok_or_else(|| ResolveError::SnapshotUnavailable {
                    widget: widget.to_string(),
                })?;

        // Duplicate names are possible; the first one in snapshot order wins
        let value = snapshot
            .iter()
            .find(|p| p.name == property)
            .map(|p| &p.value)
            .ok_or_else(|| ResolveError::PropertyNotFound {
                widget: widget.to_string(),
                property: property.to_string(),
            })?;

        debug!("Resolving {}.{} ({})", widget, property, value.kind_name());
        self.render(&command, widget, property, value)
    }

    /// Resolve a command, falling back to the `{command}` sentinel on any error
    pub fn resolve_or_sentinel(&self, text: &str) -> String {
        match self.resolve_command(text) {
            Ok(value) => value,
            Err(e) => {
                warn!("{}", e);
                Command::parse(text).sentinel()
            }
        }
    }

    fn render(
        &self,
        command: &Command,
        widget: &str,
        property: &str,
        value: &PropertyValue,
    ) -> Result<String> {
        let element = command.element();

        match value {
            PropertyValue::Bool(v) => Ok(v.to_string()),
            PropertyValue::String(v)
            | PropertyValue::Cstring(v)
            | PropertyValue::Enum(v)
            | PropertyValue::Set(v)
            | PropertyValue::Locale(v)
            | PropertyValue::Url(v)
            | PropertyValue::Pixmap(v)
            | PropertyValue::CursorShape(v) => Ok(v.clone()),
            PropertyValue::Number(v) | PropertyValue::Cursor(v) => Ok(v.to_string()),
            PropertyValue::UInt(v) => Ok(v.to_string()),
            PropertyValue::LongLong(v) => Ok(v.to_string()),
            PropertyValue::ULongLong(v) => Ok(v.to_string()),
            PropertyValue::Float(v) => Ok(v.to_string()),
            PropertyValue::Double(v) => Ok(v.to_string()),
            PropertyValue::Char(c) => Ok(u32::from(*c).to_string()),
            PropertyValue::StringList(items) => Ok(items.join(",")),
            PropertyValue::Color(v) => extract(v, widget, property, element),
            PropertyValue::Font(v) => extract(v, widget, property, element),
            PropertyValue::IconSet(v) => extract(v, widget, property, element),
            PropertyValue::Point(v) => extract(v, widget, property, element),
            PropertyValue::PointF(v) => extract(v, widget, property, element),
            PropertyValue::Rect(v) => extract(v, widget, property, element),
            PropertyValue::RectF(v) => extract(v, widget, property, element),
            PropertyValue::Size(v) => extract(v, widget, property, element),
            PropertyValue::SizeF(v) => extract(v, widget, property, element),
            PropertyValue::SizePolicy(v) => extract(v, widget, property, element),
            PropertyValue::Date(v) => extract(v, widget, property, element),
            PropertyValue::Time(v) => extract(v, widget, property, element),
            PropertyValue::DateTime(v) => extract(v, widget, property, element),
            PropertyValue::Palette | PropertyValue::Brush | PropertyValue::Unknown => {
                Err(ResolveError::UnsupportedKind {
                    property: property.to_string(),
                    kind: value.kind_name(),
                })
            }
        }
    }
}

fn extract<C: Composite>(
    value: &C,
    widget: &str,
    property: &str,
    element: Option<&str>,
) -> Result<String> {
    let Some(element) = element else {
        return Err(ResolveError::MissingElement {
            kind: C::KIND,
            usage: usage::<C>(widget, property),
        });
    };

    let element = element.to_lowercase();
    value
        .element(&element)
        .ok_or_else(|| ResolveError::UnsupportedElement {
            kind: C::KIND,
            element,
            usage: usage::<C>(widget, property),
        })
}

/// One `widget.property.element` line per legal element
pub fn usage<C: Composite>(widget: &str, property: &str) -> String {
    let mut text = String::from(USAGE_HEADER);
    for element in C::ELEMENTS {
        text.push_str(widget);
        text.push(SEPARATOR);
        text.push_str(property);
        text.push(SEPARATOR);
        text.push_str(element);
        text.push('\n');
    }
    text
}
