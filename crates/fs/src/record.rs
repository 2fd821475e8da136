use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata snapshot of one filesystem entry.
///
/// `children` is only ever populated for directories and keeps the order in
/// which the OS listed the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Last path component, `""` for a filesystem root
    pub name: String,
    /// Path as requested, or parent path joined with the entry name
    pub path: String,
    pub absolute_path: String,
    /// Absent when the path cannot be resolved (dangling or looping links)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    pub size_bytes: u64,

    /// Timestamps are absent when the platform or mount does not report them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,

    pub is_directory: bool,
    pub is_regular_file: bool,
    pub is_symbolic_link: bool,
    /// Whether the resolved target is a regular file
    pub is_file: bool,

    pub can_read: bool,
    pub can_write: bool,
    pub can_execute: bool,

    pub is_absolute: bool,
    pub is_hidden: bool,

    #[serde(default)]
    pub children: Vec<FileRecord>,
}

impl FileRecord {
    /// Finalize a directory record from its completed child sequence.
    #[must_use]
    pub fn with_children(self, children: Vec<FileRecord>) -> Self {
        FileRecord { children, ..self }
    }

    /// Total number of records in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            total += 1;
            stack.extend(record.children.iter());
        }
        total
    }
}
