use serde::{Deserialize, Serialize};

/// A named text buffer the runtime can read and write.
///
/// The serialized form (`{"name": ..., "content": ...}`) is the persisted
/// snapshot layout, so field names must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub content: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The empty record seeded when no snapshot exists.
    pub fn seed(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_layout() {
        let record = FileRecord::new("main.rhai", "print(1);");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"main.rhai","content":"print(1);"}"#);
    }

    #[test]
    fn test_seed_is_empty() {
        let record = FileRecord::seed("main.rhai");
        assert_eq!(record.name, "main.rhai");
        assert!(record.content.is_empty());
    }
}
