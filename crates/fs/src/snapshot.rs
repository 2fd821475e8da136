use std::{
    fs, io,
    path::{Component, Path},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    access::{self, Access},
    error::PathError,
    record::FileRecord,
};

/// Kind of entry the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    File,
    Directory,
    /// Anything that resolves
    Any,
}

/// Whether a symbolic link is read as itself or as its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    Follow,
    NoFollow,
}

impl Expect {
    fn invalid(self, path: &Path) -> PathError {
        match self {
            Expect::File | Expect::Any => PathError::InvalidFilePath(path.to_path_buf()),
            Expect::Directory => PathError::InvalidDirectoryPath(path.to_path_buf()),
        }
    }

    fn matches(self, meta: &fs::Metadata) -> bool {
        match self {
            Expect::File => meta.is_file(),
            Expect::Directory => meta.is_dir(),
            Expect::Any => true,
        }
    }
}

/// Build the metadata record of a single path, checking it resolves to the
/// expected kind first.
///
/// The requested path is resolved through symbolic links, both for the kind
/// check and for the attributes in the returned record. The check and the
/// record come from the same metadata read.
pub fn build(path: &Path, expect: Expect) -> Result<FileRecord, PathError> {
    let link_meta = fs::symlink_metadata(path).map_err(|e| unresolved(path, expect, e))?;
    let is_symbolic_link = link_meta.file_type().is_symlink();

    let meta = if is_symbolic_link {
        fs::metadata(path).map_err(|e| unresolved(path, expect, e))?
    } else {
        link_meta
    };

    if !expect.matches(&meta) {
        return Err(expect.invalid(path));
    }
    describe(path, is_symbolic_link, meta, LinkPolicy::Follow)
}

/// Resolve `path` and make sure it is what the caller asked for.
pub(crate) fn classify(path: &Path, expect: Expect) -> Result<(), PathError> {
    match fs::metadata(path) {
        Ok(meta) if expect.matches(&meta) => Ok(()),
        Ok(_) => Err(expect.invalid(path)),
        Err(e) => Err(unresolved(path, expect, e)),
    }
}

fn unresolved(path: &Path, expect: Expect, err: io::Error) -> PathError {
    if is_missing(&err) {
        debug!("[classify] {:?} does not resolve: {err}", path);
        expect.invalid(path)
    } else {
        PathError::metadata(path, err)
    }
}

fn is_missing(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    ) {
        return true;
    }

    // Symlink loops resolve to nothing
    #[cfg(unix)]
    {
        if err.raw_os_error() == Some(libc::ELOOP) {
            return true;
        }
    }

    false
}

/// Read one entry's attributes from a single metadata snapshot.
///
/// With `LinkPolicy::NoFollow` a symbolic link is described as the link
/// itself. Access flags and `is_file` always describe the resolved target.
pub fn snapshot(path: &Path, links: LinkPolicy) -> Result<FileRecord, PathError> {
    let link_meta = fs::symlink_metadata(path).map_err(|e| PathError::metadata(path, e))?;
    let is_symbolic_link = link_meta.file_type().is_symlink();

    let meta = if is_symbolic_link && links == LinkPolicy::Follow {
        fs::metadata(path).map_err(|e| PathError::metadata(path, e))?
    } else {
        link_meta
    };

    describe(path, is_symbolic_link, meta, links)
}

/// Record for `path` from already-read metadata. `meta` is the link itself
/// or its target, as chosen by `links`.
fn describe(
    path: &Path,
    is_symbolic_link: bool,
    meta: fs::Metadata,
    links: LinkPolicy,
) -> Result<FileRecord, PathError> {
    let is_file = match (is_symbolic_link, links) {
        (true, LinkPolicy::NoFollow) => fs::metadata(path).is_ok_and(|m| m.is_file()),
        _ => meta.is_file(),
    };

    let absolute_path = std::path::absolute(path).map_err(|e| PathError::metadata(path, e))?;
    let access = access::probe(path);
    let name = entry_name(path);
    let is_hidden = is_hidden(&name, &meta);

    Ok(FileRecord {
        name,
        path: lossy(path),
        absolute_path: lossy(&absolute_path),
        canonical_path: fs::canonicalize(path).ok().map(|p| lossy(&p)),
        parent: parent_of(path),
        size_bytes: meta.len(),
        creation_time: to_utc(meta.created().ok()),
        last_access_time: to_utc(meta.accessed().ok()),
        last_modified_time: to_utc(meta.modified().ok()),
        is_directory: meta.is_dir(),
        is_regular_file: meta.file_type().is_file(),
        is_symbolic_link,
        is_file,
        can_read: access.contains(Access::READ),
        can_write: access.contains(Access::WRITE),
        can_execute: access.contains(Access::EXECUTE),
        is_absolute: path.is_absolute(),
        is_hidden,
        children: Vec::new(),
    })
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn entry_name(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(s)) => s.to_string_lossy().into_owned(),
        Some(Component::CurDir) => ".".to_owned(),
        Some(Component::ParentDir) => "..".to_owned(),
        Some(Component::RootDir) | Some(Component::Prefix(_)) | None => String::new(),
    }
}

fn parent_of(path: &Path) -> Option<String> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(lossy)
}

fn to_utc(t: Option<SystemTime>) -> Option<DateTime<Utc>> {
    t.map(DateTime::<Utc>::from)
}

#[cfg(windows)]
fn is_hidden(_name: &str, meta: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(name: &str, _meta: &fs::Metadata) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
