//! Policy host: registers policies, runs them and routes their failures.

pub mod git;
pub mod message;
pub mod work_items;

use tracing::{debug, info, warn};

use crate::config::{Config, PolicySettings};
use crate::error::Error;
use crate::policy::{
    AutoCommentPolicy, Cancellation, CheckinContext, CheckinPolicy, Evaluation, Memento,
    Notifier, PolicyDescriptor, PolicyFailure,
};

struct RegisteredPolicy {
    policy: Box<dyn CheckinPolicy>,
    enabled: bool,
}

/// Registry of check-in policies, evaluated in registration order.
#[derive(Default)]
pub struct PolicyHost {
    policies: Vec<RegisteredPolicy>,
}

impl PolicyHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with every built-in policy registered.
    pub fn with_builtin_policies() -> Self {
        let mut host = Self::new();
        host.policies.push(RegisteredPolicy {
            policy: Box::new(AutoCommentPolicy::new()),
            enabled: true,
        });
        host
    }

    /// Register a policy. It starts enabled.
    pub fn register(&mut self, policy: Box<dyn CheckinPolicy>) -> Result<(), Error> {
        let id = policy.descriptor().unique_id;
        if self.find(id).is_some() {
            return Err(Error::DuplicatePolicy(id.to_string()));
        }
        debug!(policy = id, "Registered policy");
        self.policies.push(RegisteredPolicy {
            policy,
            enabled: true,
        });
        Ok(())
    }

    pub fn set_enabled(&mut self, unique_id: &str, enabled: bool) -> Result<(), Error> {
        let entry = self
            .policies
            .iter_mut()
            .find(|p| p.policy.descriptor().unique_id == unique_id)
            .ok_or_else(|| Error::PolicyNotFound(unique_id.to_string()))?;
        entry.enabled = enabled;
        info!(policy = unique_id, enabled, "Policy state changed");
        Ok(())
    }

    /// Registered policies and whether each is enabled.
    pub fn policies(&self) -> impl Iterator<Item = (&'static PolicyDescriptor, bool)> + '_ {
        self.policies
            .iter()
            .map(|p| (p.policy.descriptor(), p.enabled))
    }

    /// Run every enabled policy against the context.
    ///
    /// Cancellation is checked before each policy. Once it is observed the
    /// round stops and failures gathered so far are dropped.
    pub fn evaluate(
        &self,
        context: &mut dyn CheckinContext,
        cancel: &Cancellation,
    ) -> Evaluation {
        let mut failures = Vec::new();

        for entry in self.policies.iter().filter(|p| p.enabled) {
            if cancel.is_cancelled() {
                info!("Policy evaluation cancelled");
                return Evaluation::Cancelled;
            }
            let id = entry.policy.descriptor().unique_id;
            let found = entry.policy.evaluate(context);
            debug!(policy = id, failures = found.len(), "Evaluated policy");
            failures.extend(found);
        }

        Evaluation::Completed(failures)
    }

    pub fn display_help(&self, failure: &PolicyFailure, notifier: &dyn Notifier) {
        match self.find(failure.source.unique_id) {
            Some(entry) => entry.policy.display_help(failure, notifier),
            None => warn!(policy = failure.source.unique_id, "Help for unknown policy"),
        }
    }

    pub fn activate(&self, failure: &PolicyFailure, notifier: &dyn Notifier) {
        match self.find(failure.source.unique_id) {
            Some(entry) => entry.policy.activate(failure, notifier),
            None => warn!(policy = failure.source.unique_id, "Activation of unknown policy"),
        }
    }

    /// Apply enabled flags and load each policy's stored settings.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), Error> {
        for (id, settings) in &config.policies {
            let Some(entry) = self
                .policies
                .iter_mut()
                .find(|p| p.policy.descriptor().unique_id == id.as_str())
            else {
                warn!(policy = %id, "Config for unregistered policy ignored");
                continue;
            };
            entry.enabled = settings.enabled;
            entry.policy.load_config(&settings.settings)?;
        }
        Ok(())
    }

    /// Write enabled flags and each policy's settings into the config.
    pub fn store_config(&self, config: &mut Config) -> Result<(), Error> {
        for entry in &self.policies {
            let mut memento = Memento::new();
            entry.policy.save_config(&mut memento)?;
            config.policies.insert(
                entry.policy.descriptor().unique_id.to_string(),
                PolicySettings {
                    enabled: entry.enabled,
                    settings: memento,
                },
            );
        }
        Ok(())
    }

    fn find(&self, unique_id: &str) -> Option<&RegisteredPolicy> {
        self.policies
            .iter()
            .find(|p| p.policy.descriptor().unique_id == unique_id)
    }
}
