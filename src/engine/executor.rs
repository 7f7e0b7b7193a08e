// ABOUTME: Trigger engine that fires registered triggers and routes process events back to them
// ABOUTME: Owns the registry and the receiving end of the process event channel

use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use super::error::{BindingError, Result};
use super::host::DocumentHost;
use super::process::{ProcessConfig, ProcessEvent, ProcessRunner, RunId};
use super::registry::{BindingReport, ReloadMode, TriggerRegistry, TriggerSpec};
use super::trigger::TriggerKey;

pub struct TriggerEngine {
    registry: TriggerRegistry,
    runner: ProcessRunner,
    events: UnboundedReceiver<ProcessEvent>,
    runs: HashMap<RunId, TriggerKey>,
}

impl TriggerEngine {
    pub fn new(config: ProcessConfig) -> Self {
        let (runner, events) = ProcessRunner::channel(config);
        Self {
            registry: TriggerRegistry::new(),
            runner,
            events,
            runs: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TriggerRegistry {
        &mut self.registry
    }

    /// Register declared bindings against the host's current tree
    pub fn apply_bindings(
        &mut self,
        mode: ReloadMode,
        specs: &[TriggerSpec],
        host: &Rc<dyn DocumentHost>,
    ) -> BindingReport {
        let tree = host.widget_tree();
        self.registry
            .register_specs(mode, specs, tree.as_ref(), host)
    }

    /// Fire the trigger bound to `object`'s `event`
    pub fn fire(&mut self, object: &str, event: &str) -> Result<bool> {
        let key = TriggerKey::new(object, event);
        let trigger = self
            .registry
            .get_mut(&key)
            .ok_or_else(|| BindingError::TriggerNotFound {
                object: key.object.clone(),
                event: key.event.clone(),
            })?;

        let previous = trigger.run();
        let fired = trigger.handle(&self.runner);
        if let Some(run) = trigger.run().filter(|run| Some(*run) != previous) {
            info!("Fired {} as run {}", key, run);
            self.runs.insert(run, key);
        }
        Ok(fired)
    }

    /// React to a single process event
    pub fn dispatch(&mut self, event: ProcessEvent) {
        let key = if event.is_terminal() {
            self.runs.remove(&event.run)
        } else {
            self.runs.get(&event.run).cloned()
        };

        let Some(key) = key else {
            debug!("Discarding event for unknown run {}", event.run);
            return;
        };

        match self.registry.get_mut(&key) {
            Some(trigger) => {
                trigger.react(event);
            }
            None => debug!("Discarding event for unregistered trigger {}", key),
        }
    }

    /// Number of spawned runs that have not reported completion yet
    pub fn in_flight(&self) -> usize {
        self.runs.len()
    }

    /// Dispatch process events until every spawned run has completed
    pub async fn run_until_idle(&mut self) {
        while !self.runs.is_empty() {
            match self.events.recv().await {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }
}
