use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures raised while classifying or reading a path.
///
/// The two `Invalid*` variants are deterministic for a given input; the
/// I/O variants wrap the raw OS error, which must not be shown to clients.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no regular file at {}", .0.display())]
    InvalidFilePath(PathBuf),

    #[error("no directory at {}", .0.display())]
    InvalidDirectoryPath(PathBuf),

    #[error("failed to read metadata for {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PathError {
    pub(crate) fn metadata(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PathError::Metadata {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PathError::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure was caused by the request itself rather than the
    /// filesystem misbehaving.
    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            PathError::InvalidFilePath(_) | PathError::InvalidDirectoryPath(_)
        )
    }
}
