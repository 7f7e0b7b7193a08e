// ABOUTME: Main library module for the formbind templating and event-binding engine
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod document;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod preprocess;
pub mod property;
pub mod template;
pub mod widget;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use document::{Document, DocumentOrigin};
pub use engine::{
    Action, DocumentHost, ReloadMode, Trigger, TriggerEngine, TriggerKey, TriggerRegistry,
    TriggerSpec,
};
pub use error::ErrorCategory;
pub use fixture::Fixture;
pub use preprocess::Preprocessor;
pub use property::{Property, PropertyResolver, PropertyValue};
pub use template::resolve_template;
pub use widget::{NodeHandle, StaticTree, WidgetNode, WidgetTree};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
