// ABOUTME: Property module resolving dotted command paths to widget property values
// ABOUTME: Exports the typed value model, command parsing and the resolver

pub mod command;
pub mod error;
pub mod resolver;
pub mod value;

pub use command::Command;
pub use error::{ResolveError, Result};
pub use resolver::PropertyResolver;
pub use value::{
    Color, Composite, Date, DateTime, Font, IconSet, Point, PointF, Property, PropertyValue, Rect,
    RectF, Size, SizeF, SizePolicy, Time,
};
