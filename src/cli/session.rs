// ABOUTME: Headless session that keeps a document loaded across trigger firings
// ABOUTME: Feeds documents produced by processes back in as fixtures, replacing or updating the form

use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::Config;
use super::host::{ConsoleHost, HostOutput};
use crate::engine::{
    BindingError, BindingReport, DocumentHost, ProcessConfig, ProcessError, ReloadMode,
    TriggerEngine, TriggerKey,
};
use crate::error::ErrorCategory;
use crate::fixture::{Fixture, FixtureError};
use crate::preprocess::{PreprocessConfig, Preprocessor};
use crate::widget::StaticTree;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("Produced document is not a valid fixture: {0}")]
    InvalidDocument(#[from] FixtureError),

    #[error("No loaded document to update")]
    NothingToUpdate,
}

impl SessionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::Binding(e) => e.category(),
            SessionError::InvalidDocument(e) => e.category(),
            SessionError::NothingToUpdate => ErrorCategory::Reference,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Something that happened while a fired trigger ran
#[derive(Debug)]
pub enum SessionEvent {
    /// A `return` trigger answered
    Answer(String),
    /// A produced document was loaded; `document` is the preprocessed text
    Reloaded {
        document: String,
        mode: ReloadMode,
        report: BindingReport,
    },
    /// A produced document could not be loaded and the form was left as it was
    Rejected { document: String, error: SessionError },
    /// The fired trigger's process ended in an error
    Failed(ProcessError),
}

pub struct Session {
    host: Rc<ConsoleHost>,
    engine: TriggerEngine,
    preprocessor: Preprocessor,
    loaded: bool,
}

impl Session {
    pub fn new(process: ProcessConfig, preprocess: &PreprocessConfig) -> Self {
        Self {
            host: Rc::new(ConsoleHost::new(StaticTree::new())),
            engine: TriggerEngine::new(process),
            preprocessor: Preprocessor::from_config(preprocess),
            loaded: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.process.clone(), &config.preprocess)
    }

    pub fn host(&self) -> &Rc<ConsoleHost> {
        &self.host
    }

    pub fn engine(&self) -> &TriggerEngine {
        &self.engine
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load a fixture. `update: true` patches the current form in place,
    /// anything else replaces the tree and drops every existing trigger.
    pub fn load(&mut self, fixture: &Fixture) -> Result<BindingReport> {
        let mode = fixture.reload_mode();
        match mode {
            ReloadMode::Update if !self.loaded => return Err(SessionError::NothingToUpdate),
            ReloadMode::Update => self.host.update_tree(&fixture.widgets),
            ReloadMode::Replace => self.host.set_tree(fixture.tree()),
        }
        self.loaded = true;

        let host: Rc<dyn DocumentHost> = self.host.clone();
        let report = self.engine.apply_bindings(mode, &fixture.triggers, &host);
        if !report.is_clean() {
            warn!("{} binding(s) were rejected", report.errors.len());
        }
        info!(
            "Loaded {:?} document with {} widget(s) and {} trigger(s)",
            mode,
            fixture.widgets.len(),
            report.registered.len()
        );
        Ok(report)
    }

    /// Preprocess produced text and load it as a YAML fixture
    pub fn load_document(&mut self, text: &str) -> Result<(String, ReloadMode, BindingReport)> {
        let document = self.preprocessor.process_str(text).into_text();
        let fixture = Fixture::from_yaml(&document)?;
        let report = self.load(&fixture)?;
        Ok((document, fixture.reload_mode(), report))
    }

    /// Fire one trigger, wait for every run it started, then load what it produced
    pub async fn fire(&mut self, object: &str, event: &str) -> Result<Vec<SessionEvent>> {
        let key = TriggerKey::new(object, event);
        if !self.engine.fire(object, event)? {
            warn!("Trigger {} did nothing", key);
        }
        self.engine.run_until_idle().await;

        let mut events = Vec::new();
        let failure = self
            .engine
            .registry()
            .get(&key)
            .and_then(|t| t.last_error())
            .cloned();

        for output in self.host.take_outputs() {
            match output {
                HostOutput::Answer(text) => events.push(SessionEvent::Answer(text)),
                HostOutput::Document(text) => match self.load_document(&text) {
                    Ok((document, mode, report)) => events.push(SessionEvent::Reloaded {
                        document,
                        mode,
                        report,
                    }),
                    Err(error) => {
                        warn!("Discarding produced document: {}", error);
                        events.push(SessionEvent::Rejected {
                            document: self.preprocessor.process_str(&text).into_text(),
                            error,
                        });
                    }
                },
            }
        }

        if let Some(e) = failure {
            debug!("{}: run failed: {}", key, e);
            events.push(SessionEvent::Failed(e));
        }
        Ok(events)
    }
}
