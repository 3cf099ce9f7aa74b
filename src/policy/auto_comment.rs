//! Auto comment check-in policy.
//!
//! An empty check-in comment is allowed only when at least one work item is
//! associated. In that case the comment is generated from the work items, one
//! `type#id, title` line each.

use tracing::debug;

use crate::policy::{
    CheckinContext, CheckinPolicy, Notifier, PolicyDescriptor, PolicyFailure, WorkItemRef,
};

pub static AUTO_COMMENT_POLICY: PolicyDescriptor = PolicyDescriptor {
    unique_id: "com.mzagar.tfs.checkinpolicy.autocomment.AutoCommentPolicy-1",
    display_name: "Auto Comment Policy",
    short_description: "Autogenerates checkin comment from associated work item",
    long_description: "Allows for empty checkin comment only if at least one work item is \
                       associated in which case auto-comment will be generated",
    install_hint: "Run 'autocomment install' inside the repository",
};

/// Failure message when there is neither a comment nor a work item.
pub const MISSING_COMMENT_MESSAGE: &str = "Comment is mandatory if no work item is associated.";

const HELP_TITLE: &str = "AutoCommentPolicy Help";
const HELP_MESSAGE: &str = "If at least one work item is associated check-in comment will be \
                            auto-generated from work item type, id and title. Otherwise, \
                            comment is required.";

const ACTIVATE_TITLE: &str = "AutoComment Policy";
const ACTIVATE_MESSAGE: &str =
    "Either associate a workitem to autogenerate the comment on checkin or type the comment.";

/// Build the generated comment: `"<type>#<id>, <title>\n"` per item, in order.
///
/// Titles are copied verbatim, so a `#`, `,` or newline inside a title ends up
/// in the comment as-is.
pub fn synthesize_comment(work_items: &[WorkItemRef]) -> String {
    work_items
        .iter()
        .map(|wi| format!("{}#{}, {}\n", wi.type_name, wi.id, wi.title))
        .collect()
}

/// The auto comment policy. Stateless; it has no configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoCommentPolicy;

impl AutoCommentPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl CheckinPolicy for AutoCommentPolicy {
    fn descriptor(&self) -> &'static PolicyDescriptor {
        &AUTO_COMMENT_POLICY
    }

    fn evaluate(&self, context: &mut dyn CheckinContext) -> Vec<PolicyFailure> {
        // Explicit comment wins, whitespace included
        if context.comment().is_some_and(|c| !c.is_empty()) {
            debug!("Explicit comment present");
            return Vec::new();
        }

        let comment = synthesize_comment(context.associated_work_items());
        if comment.is_empty() {
            debug!("No comment and no associated work items");
            return vec![PolicyFailure::new(MISSING_COMMENT_MESSAGE, self.descriptor())];
        }

        debug!(
            work_items = context.associated_work_items().len(),
            "Generated comment from work items"
        );
        context.set_comment(comment);
        Vec::new()
    }

    fn display_help(&self, _failure: &PolicyFailure, notifier: &dyn Notifier) {
        notifier.notify(HELP_TITLE, HELP_MESSAGE);
    }

    fn activate(&self, _failure: &PolicyFailure, notifier: &dyn Notifier) {
        notifier.notify(ACTIVATE_TITLE, ACTIVATE_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Memento, PendingCheckin, RecordingNotifier};

    fn evaluate(pc: &mut PendingCheckin) -> Vec<PolicyFailure> {
        AutoCommentPolicy::new().evaluate(pc)
    }

    #[test]
    fn test_explicit_comment_wins() {
        let mut pc = PendingCheckin::new(
            Some("Refactor parser".to_string()),
            vec![WorkItemRef::new(42, "Bug", "Fix crash")],
        );

        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment.as_deref(), Some("Refactor parser"));
    }

    #[test]
    fn test_explicit_comment_without_work_items() {
        let mut pc = PendingCheckin::new(Some("x".to_string()), Vec::new());

        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment.as_deref(), Some("x"));
    }

    #[test]
    fn test_whitespace_comment_counts_as_explicit() {
        let mut pc = PendingCheckin::new(Some("  \n".to_string()), Vec::new());

        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment.as_deref(), Some("  \n"));
    }

    #[test]
    fn test_no_comment_no_work_items_fails() {
        for comment in [None, Some(String::new())] {
            let mut pc = PendingCheckin::new(comment.clone(), Vec::new());

            let failures = evaluate(&mut pc);
            assert_eq!(failures.len(), 1);
            assert_eq!(
                failures[0].message,
                "Comment is mandatory if no work item is associated."
            );
            assert_eq!(failures[0].source, &AUTO_COMMENT_POLICY);
            assert_eq!(pc.comment, comment);
        }
    }

    #[test]
    fn test_single_work_item_generates_comment() {
        let mut pc = PendingCheckin::new(
            Some(String::new()),
            vec![WorkItemRef::new(42, "Bug", "Fix crash")],
        );

        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment.as_deref(), Some("Bug#42, Fix crash\n"));
    }

    #[test]
    fn test_multiple_work_items_keep_order() {
        let mut pc = PendingCheckin::new(
            None,
            vec![WorkItemRef::new(1, "Task", "A"), WorkItemRef::new(2, "Bug", "B")],
        );

        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment.as_deref(), Some("Task#1, A\nBug#2, B\n"));
    }

    #[test]
    fn test_repeated_work_items_are_not_deduplicated() {
        let item = WorkItemRef::new(5, "Task", "Same");
        let comment = synthesize_comment(&[item.clone(), item]);
        assert_eq!(comment, "Task#5, Same\nTask#5, Same\n");
    }

    #[test]
    fn test_second_evaluation_keeps_generated_comment() {
        let mut pc = PendingCheckin::new(
            None,
            vec![WorkItemRef::new(1, "Task", "A"), WorkItemRef::new(2, "Bug", "B")],
        );
        assert!(evaluate(&mut pc).is_empty());
        let first = pc.comment.clone();

        pc.work_items.clear();
        assert!(evaluate(&mut pc).is_empty());
        assert_eq!(pc.comment, first);
    }

    #[test]
    fn test_empty_title_keeps_trailing_space() {
        let comment = synthesize_comment(&[WorkItemRef::new(3, "Task", "")]);
        assert_eq!(comment, "Task#3, \n");
    }

    #[test]
    fn test_title_is_not_escaped() {
        let comment = synthesize_comment(&[WorkItemRef::new(9, "Bug", "a#b, c\nd")]);
        assert_eq!(comment, "Bug#9, a#b, c\nd\n");
    }

    #[test]
    fn test_not_editable_and_config_noops() {
        let mut policy = AutoCommentPolicy::new();
        assert!(!policy.can_edit());

        let mut memento = Memento::new();
        policy.save_config(&mut memento).unwrap();
        assert!(memento.is_empty());
        policy.load_config(&memento).unwrap();
    }

    #[test]
    fn test_help_and_activate_notify() {
        let policy = AutoCommentPolicy::new();
        let failure = PolicyFailure::new(MISSING_COMMENT_MESSAGE, &AUTO_COMMENT_POLICY);
        let notifier = RecordingNotifier::new();

        policy.display_help(&failure, &notifier);
        policy.activate(&failure, &notifier);

        let notes = notifier.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].0, "AutoCommentPolicy Help");
        assert!(notes[0].1.contains("type, id and title"));
        assert_eq!(notes[1].0, "AutoComment Policy");
        assert!(notes[1].1.starts_with("Either associate a workitem"));
    }
}
