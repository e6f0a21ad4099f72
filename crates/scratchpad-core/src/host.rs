//! The callback surface handed to the embedded runtime.

use crate::files::VirtualFileSet;
use crate::output::{OutputChannel, Severity};

/// Functions the runtime may call into the host during a run.
///
/// Every method is infallible and safe to call reentrantly: each one takes
/// its lock only for the duration of a single append or scan.
#[derive(Debug, Clone)]
pub struct HostCallbacks {
    output: OutputChannel,
    files: VirtualFileSet,
}

impl HostCallbacks {
    pub fn new(output: OutputChannel, files: VirtualFileSet) -> Self {
        Self { output, files }
    }

    pub fn print(&self, text: &str) {
        self.output.emit(text, Severity::Print);
    }

    pub fn warn(&self, text: &str) {
        self.output.emit(text, Severity::Warn);
    }

    pub fn error(&self, text: &str) {
        self.output.emit(text, Severity::Err);
    }

    pub fn readfile(&self, name: &str) -> String {
        self.files.read(name)
    }

    pub fn writefile(&self, name: &str, content: &str) {
        self.files.write(name, content);
    }

    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    pub fn files(&self) -> &VirtualFileSet {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileRecord;
    use crate::output::OutputEntry;

    #[test]
    fn test_severities_route_to_output() {
        let output = OutputChannel::new();
        let host = HostCallbacks::new(output.clone(), VirtualFileSet::default());

        host.print("1");
        host.warn("2");
        host.error("3");

        assert_eq!(
            output.entries(),
            vec![
                OutputEntry::new("1", Severity::Print),
                OutputEntry::new("2", Severity::Warn),
                OutputEntry::new("3", Severity::Err),
            ]
        );
    }

    #[test]
    fn test_file_callbacks_delegate() {
        let files = VirtualFileSet::new(vec![FileRecord::new("a", "x")]);
        let host = HostCallbacks::new(OutputChannel::new(), files.clone());

        host.writefile("a", "z");
        assert_eq!(host.readfile("a"), "x");
        assert_eq!(host.readfile("missing"), "");
        assert_eq!(files.len(), 2);
    }
}
