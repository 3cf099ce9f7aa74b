//! Check-in policies.
//!
//! A policy inspects a pending check-in through [`CheckinContext`] and returns
//! the reasons, if any, the check-in must not proceed.

pub mod auto_comment;
pub mod context;
pub mod memento;
pub mod notify;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::error::Error;

pub use auto_comment::{synthesize_comment, AutoCommentPolicy, AUTO_COMMENT_POLICY};
pub use context::{CheckinContext, PendingCheckin, WorkItemRef};
pub use memento::Memento;
pub use notify::{Notifier, NullNotifier, RecordingNotifier, TerminalNotifier};

/// Static metadata a host uses to list and display a policy.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PolicyDescriptor {
    pub unique_id: &'static str,
    pub display_name: &'static str,
    pub short_description: &'static str,
    pub long_description: &'static str,
    pub install_hint: &'static str,
}

/// Reason a policy blocks a check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyFailure {
    pub message: String,
    /// Descriptor of the policy that produced the failure.
    pub source: &'static PolicyDescriptor,
}

impl PolicyFailure {
    pub fn new(message: impl Into<String>, source: &'static PolicyDescriptor) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

/// Outcome of one evaluation round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Evaluation {
    /// Every enabled policy ran. Empty failures means the check-in may proceed.
    Completed(Vec<PolicyFailure>),
    /// The round was cancelled before all policies ran.
    Cancelled,
}

impl Evaluation {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// True only for a completed round without failures.
    pub fn passed(&self) -> bool {
        matches!(self, Self::Completed(failures) if failures.is_empty())
    }

    pub fn failures(&self) -> &[PolicyFailure] {
        match self {
            Self::Completed(failures) => failures,
            Self::Cancelled => &[],
        }
    }
}

/// Shared cancellation flag for an evaluation round.
///
/// Set by an embedding host that runs evaluation alongside other work. The
/// bundled CLI has no signal handling and never cancels.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A pluggable check-in rule.
///
/// Only [`descriptor`](Self::descriptor) and [`evaluate`](Self::evaluate) are
/// required; the remaining hooks default to no-ops.
pub trait CheckinPolicy {
    fn descriptor(&self) -> &'static PolicyDescriptor;

    /// Evaluate the pending check-in. An empty result lets it proceed.
    fn evaluate(&self, context: &mut dyn CheckinContext) -> Vec<PolicyFailure>;

    /// Whether the user can edit this policy's configuration.
    fn can_edit(&self) -> bool {
        false
    }

    /// Explain a failure to the user.
    fn display_help(&self, _failure: &PolicyFailure, _notifier: &dyn Notifier) {}

    /// Called when the user activates (e.g. double-clicks) a failure.
    fn activate(&self, _failure: &PolicyFailure, _notifier: &dyn Notifier) {}

    fn load_config(&mut self, _memento: &Memento) -> Result<(), Error> {
        Ok(())
    }

    fn save_config(&self, _memento: &mut Memento) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_POLICY: PolicyDescriptor = PolicyDescriptor {
        unique_id: "test.policy",
        display_name: "Test",
        short_description: "",
        long_description: "",
        install_hint: "",
    };

    #[test]
    fn test_evaluation_passed() {
        assert!(Evaluation::Completed(Vec::new()).passed());
        assert!(!Evaluation::Cancelled.passed());

        let failed = Evaluation::Completed(vec![PolicyFailure::new("no", &TEST_POLICY)]);
        assert!(!failed.passed());
        assert!(!failed.is_cancelled());
        assert_eq!(failed.failures().len(), 1);
        assert!(Evaluation::Cancelled.failures().is_empty());
    }

    #[test]
    fn test_cancellation_is_shared_between_clones() {
        let cancel = Cancellation::new();
        let observer = cancel.clone();
        assert!(!observer.is_cancelled());

        cancel.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_failure_serializes_source_id() {
        let failure = PolicyFailure::new("blocked", &TEST_POLICY);
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["message"], "blocked");
        assert_eq!(json["source"]["unique_id"], "test.policy");
    }
}
