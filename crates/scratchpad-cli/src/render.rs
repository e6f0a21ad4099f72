use colored::Colorize;
use scratchpad_core::{OutputEntry, Severity};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn entry(entry: &OutputEntry) {
    match entry.severity {
        Severity::Print => println!("{}", entry.text),
        Severity::Warn => println!("{}", entry.text.yellow()),
        Severity::Err => println!("{}", entry.text.red()),
    }
}

/// Renders everything queued on `receiver`; returns whether any entry was
/// an error.
pub fn drain(receiver: &mut UnboundedReceiver<OutputEntry>) -> bool {
    let mut saw_error = false;
    while let Ok(next) = receiver.try_recv() {
        saw_error |= next.severity == Severity::Err;
        entry(&next);
    }
    saw_error
}
