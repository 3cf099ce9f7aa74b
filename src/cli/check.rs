//! Evaluate check-in policies for a commit (commit-msg hook).

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::host::git::find_repo_root;
use crate::host::message::{read_comment, write_comment};
use crate::host::work_items::WorkItemStore;
use crate::host::PolicyHost;
use crate::policy::{
    Cancellation, Evaluation, Notifier, PendingCheckin, PolicyFailure, TerminalNotifier,
};

/// Result of checking one commit message.
#[derive(Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The commit may proceed. `generated` is set when the message was replaced.
    Passed { generated: bool },
    Failed(Vec<PolicyFailure>),
}

/// Evaluate the policies for a message file and write back a generated comment.
pub fn check_message(
    host: &PolicyHost,
    repo_root: &Path,
    comment_char: char,
    message_file: &Path,
    cancel: &Cancellation,
) -> Result<CheckOutcome, Error> {
    let comment = read_comment(message_file, comment_char)?;
    let store = WorkItemStore::load(repo_root)?;
    let mut pending = PendingCheckin::new(comment.clone(), store.work_items());

    let failures = match host.evaluate(&mut pending, cancel) {
        Evaluation::Completed(failures) => failures,
        Evaluation::Cancelled => return Err(Error::Cancelled),
    };

    if !failures.is_empty() {
        return Ok(CheckOutcome::Failed(failures));
    }

    let generated = match pending.comment {
        Some(ref new_comment) if pending.comment != comment => {
            write_comment(message_file, new_comment)?;
            info!(
                work_items = pending.work_items.len(),
                "Wrote generated commit message"
            );
            true
        }
        _ => false,
    };

    Ok(CheckOutcome::Passed { generated })
}

/// Print failures and let each source policy tell the user what to do.
pub fn report_failures(host: &PolicyHost, failures: &[PolicyFailure], notifier: &dyn Notifier) {
    for failure in failures {
        eprintln!("{}: {}", failure.source.display_name, failure.message);
        host.activate(failure, notifier);
    }
}

/// Run check command. Returns the process exit code.
pub fn run(message_file: &Path) -> Result<i32, Error> {
    let repo_root = find_repo_root(&std::env::current_dir()?)?;
    let config = Config::load()?;

    let mut host = PolicyHost::with_builtin_policies();
    host.apply_config(&config)?;

    // Nothing in the CLI cancels a round; the flag matters to embedding hosts
    let outcome = check_message(
        &host,
        &repo_root,
        config.git.comment_char,
        message_file,
        &Cancellation::new(),
    )?;

    match outcome {
        CheckOutcome::Passed { .. } => Ok(0),
        CheckOutcome::Failed(failures) => {
            report_failures(&host, &failures, &TerminalNotifier);
            Ok(1)
        }
    }
}

/// Evaluate the current associations as if the commit message were empty.
///
/// Returns the comment that would be generated, or the failures.
pub fn preview_comment(
    host: &PolicyHost,
    repo_root: &Path,
    cancel: &Cancellation,
) -> Result<Result<String, Vec<PolicyFailure>>, Error> {
    let store = WorkItemStore::load(repo_root)?;
    let mut pending = PendingCheckin::new(None, store.work_items());

    match host.evaluate(&mut pending, cancel) {
        Evaluation::Cancelled => Err(Error::Cancelled),
        Evaluation::Completed(failures) if !failures.is_empty() => Ok(Err(failures)),
        Evaluation::Completed(_) => Ok(Ok(pending.comment.unwrap_or_default())),
    }
}

/// Run preview command.
pub fn preview() -> Result<(), Error> {
    let repo_root = find_repo_root(&std::env::current_dir()?)?;
    let config = Config::load()?;

    let mut host = PolicyHost::with_builtin_policies();
    host.apply_config(&config)?;

    match preview_comment(&host, &repo_root, &Cancellation::new())? {
        Ok(comment) => print!("{}", comment),
        Err(failures) => {
            for failure in &failures {
                eprintln!("{}: {}", failure.source.display_name, failure.message);
                host.display_help(failure, &TerminalNotifier);
            }
        }
    }
    Ok(())
}
