// ABOUTME: CLI module for the formbind engine
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;
pub mod host;
pub mod session;

pub use app::App;
pub use args::{Args, Commands};
pub use config::Config;
pub use host::{ConsoleHost, HostOutput};
pub use session::{Session, SessionError, SessionEvent};
