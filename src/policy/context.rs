//! Pending check-in state as seen by policies.

use serde::{Deserialize, Serialize};

/// Work item associated with a pending check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRef {
    pub id: i32,
    pub type_name: String,
    pub title: String,
}

impl WorkItemRef {
    pub fn new(id: i32, type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            title: title.into(),
        }
    }
}

/// Accessor for the check-in under evaluation.
///
/// Implemented by the host. Policies read freely and may only write the
/// comment.
pub trait CheckinContext {
    /// Current comment, `None` when the host has none at all.
    fn comment(&self) -> Option<&str>;

    fn set_comment(&mut self, comment: String);

    /// Associated work items in host order.
    fn associated_work_items(&self) -> &[WorkItemRef];
}

/// In-memory check-in context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCheckin {
    pub comment: Option<String>,
    pub work_items: Vec<WorkItemRef>,
}

impl PendingCheckin {
    pub fn new(comment: Option<String>, work_items: Vec<WorkItemRef>) -> Self {
        Self {
            comment,
            work_items,
        }
    }
}

impl CheckinContext for PendingCheckin {
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn set_comment(&mut self, comment: String) {
        self.comment = Some(comment);
    }

    fn associated_work_items(&self) -> &[WorkItemRef] {
        &self.work_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_checkin_accessors() {
        let mut pc = PendingCheckin::new(None, vec![WorkItemRef::new(7, "Task", "Write docs")]);
        assert!(pc.comment().is_none());
        assert_eq!(pc.associated_work_items().len(), 1);

        pc.set_comment("done".to_string());
        assert_eq!(pc.comment(), Some("done"));
    }

    #[test]
    fn test_work_item_serde_field_names() {
        let item = WorkItemRef::new(42, "Bug", "Fix crash");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["type_name"], "Bug");
        assert_eq!(json["title"], "Fix crash");
    }
}
