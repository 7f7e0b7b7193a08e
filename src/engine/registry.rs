// ABOUTME: Registry of triggers keyed by object name and normalised event name
// ABOUTME: Loads declarative binding batches with full-reload or in-place update semantics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::error::BindingError;
use super::host::DocumentHost;
use super::trigger::{normalize_event, Action, Trigger, TriggerKey};
use crate::widget::WidgetTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadMode {
    /// A brand-new document: every existing trigger is dropped first
    Replace,
    /// The same document was updated: only re-declared keys are replaced
    Update,
}

/// A declared binding as it appears next to a widget tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub object: String,
    pub event: String,
    #[serde(default)]
    pub action: String,
    pub command: String,
}

impl TriggerSpec {
    pub fn new(
        object: impl Into<String>,
        event: impl Into<String>,
        action: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            object: object.into(),
            event: event.into(),
            action: action.into(),
            command: command.into(),
        }
    }
}

/// Outcome of registering one batch of specs
#[derive(Debug, Default)]
pub struct BindingReport {
    pub registered: Vec<TriggerKey>,
    pub errors: Vec<BindingError>,
}

impl BindingReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: IndexMap<String, IndexMap<String, Trigger>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trigger, returning the one it replaced
    pub fn register(&mut self, trigger: Trigger) -> Option<Trigger> {
        let key = trigger.key().clone();
        let previous = self
            .triggers
            .entry(key.object.clone())
            .or_default()
            .insert(key.event.clone(), trigger);
        if previous.is_some() {
            debug!("Replaced trigger {}", key);
        }
        previous
    }

    /// Register a batch of declared bindings against `tree`
    pub fn register_specs(
        &mut self,
        mode: ReloadMode,
        specs: &[TriggerSpec],
        tree: &dyn WidgetTree,
        host: &Rc<dyn DocumentHost>,
    ) -> BindingReport {
        if mode == ReloadMode::Replace {
            self.clear();
        }

        let mut report = BindingReport::default();
        let mut declared: HashMap<TriggerKey, &str> = HashMap::new();

        for spec in specs {
            let key = match validate(spec, tree) {
                Ok(key) => key,
                Err(e) => {
                    warn!("{}", e);
                    report.errors.push(e);
                    continue;
                }
            };

            if let Some(first) = declared.get(&key) {
                let e = BindingError::DuplicateTrigger {
                    object: key.object.clone(),
                    event: key.event.clone(),
                    command: first.to_string(),
                };
                warn!("{}", e);
                report.errors.push(e);
                continue;
            }
            declared.insert(key.clone(), &spec.command);

            let (action, error) = Action::parse_or_execute(&key, &spec.action);
            report.errors.extend(error);

            self.register(Trigger::with_action(
                key.clone(),
                spec.command.clone(),
                action,
                Rc::downgrade(host),
            ));
            report.registered.push(key);
        }

        info!(
            "Registered {} trigger(s), {} rejected",
            report.registered.len(),
            specs.len() - report.registered.len()
        );
        report
    }

    pub fn unregister(&mut self, key: &TriggerKey) -> Option<Trigger> {
        let events = self.triggers.get_mut(&key.object)?;
        let removed = events.shift_remove(&key.event);
        if events.is_empty() {
            self.triggers.shift_remove(&key.object);
        }
        removed
    }

    /// Drop every trigger bound to `object`, returning how many there were
    pub fn unregister_object(&mut self, object: &str) -> usize {
        self.triggers
            .shift_remove(object)
            .map(|events| events.len())
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.triggers.clear();
    }

    pub fn get(&self, key: &TriggerKey) -> Option<&Trigger> {
        self.triggers.get(&key.object)?.get(&key.event)
    }

    pub fn get_mut(&mut self, key: &TriggerKey) -> Option<&mut Trigger> {
        self.triggers.get_mut(&key.object)?.get_mut(&key.event)
    }

    /// Every registered trigger in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.values().flat_map(|events| events.values())
    }

    pub fn len(&self) -> usize {
        self.triggers.values().map(|events| events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(spec: &TriggerSpec, tree: &dyn WidgetTree) -> Result<TriggerKey, BindingError> {
    let event = normalize_event(&spec.event);
    if spec.object.is_empty() {
        return Err(BindingError::MissingObjectName { event });
    }
    if event.is_empty() {
        return Err(BindingError::MissingEventName {
            object: spec.object.clone(),
        });
    }
    if spec.command.is_empty() {
        return Err(BindingError::MissingCommand {
            object: spec.object.clone(),
            event,
        });
    }
    if tree.find_by_name(&spec.object).is_none() {
        return Err(BindingError::ObjectNotFound {
            object: spec.object.clone(),
        });
    }
    Ok(TriggerKey::new(spec.object.clone(), &event))
}
