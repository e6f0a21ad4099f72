use super::model::FileRecord;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

#[derive(Default)]
struct FileTable {
    records: Vec<FileRecord>,
    subscribers: Vec<mpsc::UnboundedSender<FileRecord>>,
}

/// Ordered collection of named text records shared between the runtime
/// callbacks and whatever front-end observes it.
///
/// Writes always append: a name may appear any number of times and reads
/// resolve to the first record carrying it.
#[derive(Clone, Default)]
pub struct VirtualFileSet {
    inner: Arc<RwLock<FileTable>>,
}

impl VirtualFileSet {
    /// Creates a set holding exactly `records`, in order.
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FileTable {
                records,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Creates the default set: a single empty record named `name`.
    pub fn seeded(name: impl Into<String>) -> Self {
        Self::new(vec![FileRecord::seed(name)])
    }

    /// Returns the content of the first record named `name`, or an empty
    /// string when none exists.
    pub fn read(&self, name: &str) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.content.clone())
            .unwrap_or_default()
    }

    /// Appends a new record without looking for an existing one.
    pub fn write(&self, name: impl Into<String>, content: impl Into<String>) {
        let record = FileRecord::new(name, content);
        let mut table = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        table
            .subscribers
            .retain(|subscriber| subscriber.send(record.clone()).is_ok());
        table.records.push(record);
    }

    /// Subscribes to records written after this call.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<FileRecord> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .push(sender);
        receiver
    }

    /// Snapshot of all records in set order.
    pub fn records(&self) -> Vec<FileRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    /// Record names in set order, duplicates included.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .iter()
            .map(|record| record.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for VirtualFileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFileSet")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_returns_first_match() {
        let files = VirtualFileSet::new(vec![
            FileRecord::new("a", "x"),
            FileRecord::new("a", "y"),
        ]);
        assert_eq!(files.read("a"), "x");
    }

    #[test]
    fn test_read_missing_is_empty() {
        let files = VirtualFileSet::seeded("main.rhai");
        assert_eq!(files.read("missing"), "");
        assert_eq!(files.read("main.rhai"), "");
    }

    #[test]
    fn test_write_appends_duplicate_names() {
        let files = VirtualFileSet::new(vec![FileRecord::new("a", "x")]);
        files.write("a", "z");

        assert_eq!(
            files.records(),
            vec![FileRecord::new("a", "x"), FileRecord::new("a", "z")]
        );
        // First match still wins.
        assert_eq!(files.read("a"), "x");
        assert_eq!(files.names(), vec!["a", "a"]);
    }

    #[test]
    fn test_clones_observe_writes() {
        let files = VirtualFileSet::seeded("main.rhai");
        let observer = files.clone();
        files.write("out.txt", "done");
        assert_eq!(observer.len(), 2);
        assert_eq!(observer.read("out.txt"), "done");
    }

    #[test]
    fn test_subscriber_receives_written_records() {
        let files = VirtualFileSet::default();
        assert!(files.is_empty());
        let mut receiver = files.subscribe();
        files.write("log.txt", "line");

        assert_eq!(receiver.try_recv().unwrap(), FileRecord::new("log.txt", "line"));
    }
}
