mod access;
mod error;
mod record;
mod snapshot;
mod walker;

pub use access::{Access, probe as probe_access};
pub use error::PathError;
pub use record::FileRecord;
pub use snapshot::{Expect, LinkPolicy, build, snapshot};
pub use walker::{list_files, walk};
