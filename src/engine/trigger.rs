// ABOUTME: A single (object, event) binding and the state machine for one firing
// ABOUTME: Resolves the command template, then either runs it or hands the text straight to the host

use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::Weak;
use tracing::{debug, error, info, warn};

use super::error::{BindingError, ProcessError, ProcessFailure};
use super::host::DocumentHost;
use super::process::{ProcessEvent, ProcessEventKind, ProcessExit, ProcessRunner, RunId};
use crate::template::resolve_template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Run the resolved command and use its stdout as the next document
    Execute,
    /// Hand the resolved text to the host as the final answer
    Return,
}

impl Action {
    /// An empty declaration means `execute`
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "" | "execute" => Some(Action::Execute),
            "return" => Some(Action::Return),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Execute => "execute",
            Action::Return => "return",
        }
    }

    /// Parse a declared action, falling back to `execute` with a diagnostic
    pub fn parse_or_execute(key: &TriggerKey, text: &str) -> (Self, Option<BindingError>) {
        match Self::parse(text) {
            Some(action) => (action, None),
            None => {
                let e = BindingError::UnsupportedAction {
                    object: key.object.clone(),
                    event: key.event.clone(),
                    action: text.to_string(),
                };
                warn!("{}", e);
                (Action::Execute, Some(e))
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Resolving,
    Executing,
    Collecting,
    Completed,
    Failed,
    Returning,
    Done,
}

const EMPTY_ARGS: &str = "()";

/// Event names compare with all whitespace removed; a bare name gets `()` appended
pub fn normalize_event(event: &str) -> String {
    let mut name: String = event.chars().filter(|c| !c.is_whitespace()).collect();
    if !name.is_empty() && !name.ends_with(')') {
        name.push_str(EMPTY_ARGS);
    }
    name
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerKey {
    pub object: String,
    pub event: String,
}

impl TriggerKey {
    pub fn new(object: impl Into<String>, event: &str) -> Self {
        Self {
            object: object.into(),
            event: normalize_event(event),
        }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.object, self.event)
    }
}

pub struct Trigger {
    key: TriggerKey,
    command: String,
    action: Action,
    host: Weak<dyn DocumentHost>,

    state: TriggerState,
    last_command: String,
    output: Vec<u8>,
    run: Option<RunId>,
    started_at: Option<DateTime<Utc>>,
    last_error: Option<ProcessError>,
}

impl Trigger {
    /// Bind `command` to `object`'s `event`. Unknown actions are logged and run as `execute`.
    pub fn new(
        command: impl Into<String>,
        action: &str,
        object: impl Into<String>,
        event: &str,
        host: Weak<dyn DocumentHost>,
    ) -> Self {
        let key = TriggerKey::new(object, event);
        let (action, _) = Action::parse_or_execute(&key, action);
        Self::with_action(key, command, action, host)
    }

    pub fn with_action(
        key: TriggerKey,
        command: impl Into<String>,
        action: Action,
        host: Weak<dyn DocumentHost>,
    ) -> Self {
        Self {
            key,
            command: command.into(),
            action,
            host,
            state: TriggerState::Idle,
            last_command: String::new(),
            output: Vec::new(),
            run: None,
            started_at: None,
            last_error: None,
        }
    }

    pub fn key(&self) -> &TriggerKey {
        &self.key
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// The command as resolved by the most recent firing
    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    /// Bytes collected from the current or most recent run
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// The run whose events this trigger still accepts
    pub fn run(&self) -> Option<RunId> {
        self.run
    }

    pub fn last_error(&self) -> Option<&ProcessError> {
        self.last_error.as_ref()
    }

    /// Fire the trigger. Returns false when there was nothing to do.
    pub fn handle(&mut self, runner: &ProcessRunner) -> bool {
        if self.command.is_empty() {
            return false;
        }
        let Some(host) = self.host.upgrade() else {
            debug!("{}: host is gone, ignoring", self.key);
            return false;
        };

        self.state = TriggerState::Resolving;
        let tree = host.widget_tree();
        let resolved = resolve_template(&self.command, tree.as_ref());
        self.last_command = resolved.clone();

        match self.action {
            Action::Execute => {
                self.output.clear();
                self.last_error = None;
                self.started_at = Some(Utc::now());
                self.run = Some(runner.spawn(&resolved));
                self.state = TriggerState::Executing;
                info!("{}: executing '{}'", self.key, resolved);
            }
            Action::Return => {
                self.state = TriggerState::Returning;
                debug!("{}: returning '{}'", self.key, resolved);
                host.on_final_answer(&resolved);
                self.state = TriggerState::Done;
            }
        }
        true
    }

    /// Apply one process event. Returns true if the event belonged to the current run.
    pub fn react(&mut self, event: ProcessEvent) -> bool {
        if self.run != Some(event.run) {
            debug!("{}: discarding event from stale run {}", self.key, event.run);
            return false;
        }

        match event.kind {
            ProcessEventKind::Output(chunk) => self.on_output_chunk(&chunk),
            ProcessEventKind::Exited(exit) => self.on_exit(exit),
            ProcessEventKind::Failed(failure) => self.on_failure(failure),
        }
        true
    }

    pub fn on_output_chunk(&mut self, chunk: &[u8]) {
        self.output.extend_from_slice(chunk);
        self.state = TriggerState::Collecting;
    }

    pub fn on_exit(&mut self, exit: ProcessExit) {
        self.run = None;
        let command = self.last_command.clone();

        let failure = if exit.code != 0 {
            Some(ProcessError::NonZeroExit {
                code: exit.code,
                command,
            })
        } else if self.output.is_empty() {
            Some(ProcessError::NoData { command })
        } else {
            None
        };

        if let Some(e) = failure {
            self.fail(e);
            return;
        }

        self.state = TriggerState::Completed;
        if let Some(started) = self.started_at {
            let elapsed = Utc::now().signed_duration_since(started);
            debug!(
                "{}: '{}' finished in {}ms",
                self.key,
                self.last_command,
                elapsed.num_milliseconds()
            );
        }

        let text = String::from_utf8_lossy(&self.output).into_owned();
        match self.host.upgrade() {
            Some(host) => host.on_document_ready(&text),
            None => debug!("{}: host is gone, dropping document", self.key),
        }
    }

    pub fn on_failure(&mut self, failure: ProcessFailure) {
        self.run = None;
        let command = self.last_command.clone();
        self.fail(match failure {
            ProcessFailure::Crashed => ProcessError::Crashed { command },
            failure => ProcessError::Failed { failure, command },
        });
    }

    fn fail(&mut self, e: ProcessError) {
        error!("{}", e);
        self.state = TriggerState::Failed;
        self.last_error = Some(e);
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("key", &self.key)
            .field("command", &self.command)
            .field("action", &self.action)
            .field("state", &self.state)
            .field("run", &self.run)
            .finish()
    }
}
