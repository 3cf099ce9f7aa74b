//! User notification capability used by policy help and activation hooks.

use std::cell::RefCell;
use std::io::Write;

/// Shows a titled message to the user.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// Discards every notification. Used when the host has no display.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _message: &str) {}
}

/// Prints notifications to stderr so they show up in git hook output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, message: &str) {
        let mut err = std::io::stderr().lock();
        // Nothing useful to do if stderr is gone
        let _ = writeln!(err, "{}: {}", title, message);
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notes: RefCell<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(title, message)` pairs in order.
    pub fn notes(&self) -> Vec<(String, String)> {
        self.notes.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.notes
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}
