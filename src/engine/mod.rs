// ABOUTME: Trigger engine module binding widget events to resolved commands
// ABOUTME: Runs external processes and feeds their output back to the document host

pub mod error;
pub mod executor;
pub mod host;
pub mod process;
pub mod registry;
pub mod trigger;

pub use error::{BindingError, ProcessError, ProcessFailure, Result};
pub use executor::TriggerEngine;
pub use host::DocumentHost;
pub use process::{
    ProcessConfig, ProcessEvent, ProcessEventKind, ProcessExit, ProcessRunner, RunId,
};
pub use registry::{BindingReport, ReloadMode, TriggerRegistry, TriggerSpec};
pub use trigger::{normalize_event, Action, Trigger, TriggerKey, TriggerState};
