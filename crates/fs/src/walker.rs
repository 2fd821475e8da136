use std::{
    fs::read_dir,
    path::{Path, PathBuf},
    vec,
};

use log::debug;

use crate::{
    error::PathError,
    record::FileRecord,
    snapshot::{Expect, LinkPolicy, classify, snapshot},
};

/// One directory being expanded: its own record, the entries still to
/// visit, and the children completed so far.
struct Frame {
    record: FileRecord,
    entries: vec::IntoIter<PathBuf>,
    children: Vec<FileRecord>,
}

impl Frame {
    fn open(record: FileRecord, dir: &Path) -> Result<Self, PathError> {
        let entries = list_entries(dir)?;
        Ok(Frame {
            children: Vec::with_capacity(entries.len()),
            record,
            entries: entries.into_iter(),
        })
    }

    fn finish(self) -> FileRecord {
        self.record.with_children(self.children)
    }
}

/// List the direct entries of `dir` in the order the OS returns them.
///
/// The listing is collected eagerly so only one directory handle is open at
/// a time, however deep the walk goes.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, PathError> {
    let rd = read_dir(dir).map_err(|e| PathError::read_dir(dir, e))?;

    rd.map(|entry| {
        entry
            .map(|e| e.path())
            .map_err(|e| PathError::read_dir(dir, e))
    })
    .collect()
}

/// Build the full metadata tree rooted at `dir`.
///
/// Depth-first and pre-order: each directory's snapshot is taken before its
/// entries, and a subdirectory is fully expanded before its next sibling.
/// Symbolic links below the root are described, never followed. Any I/O
/// failure aborts the whole walk; there is no partial tree.
///
/// There is no depth limit. Adversarially deep trees cost memory
/// proportional to their depth and block the caller until done.
pub fn walk(dir: &Path) -> Result<FileRecord, PathError> {
    classify(dir, Expect::Directory)?;
    let root = snapshot(dir, LinkPolicy::Follow)?;

    let mut stack: Vec<Frame> = Vec::new();
    let mut current = Frame::open(root, dir)?;

    loop {
        match current.entries.next() {
            Some(entry) => {
                let child = snapshot(&entry, LinkPolicy::NoFollow)?;
                if child.is_directory {
                    let frame = Frame::open(child, &entry)?;
                    stack.push(std::mem::replace(&mut current, frame));
                } else {
                    current.children.push(child);
                }
            }
            None => {
                let record = current.finish();
                match stack.pop() {
                    Some(mut parent) => {
                        parent.children.push(record);
                        current = parent;
                    }
                    None => return Ok(record),
                }
            }
        }
    }
}

/// Flat pre-order listing of `dir` and everything up to `max_depth` levels
/// below it. The root is at depth 0. Links are not followed and records
/// carry no children.
///
/// Fails on the first unreadable entry, like [`walk`].
pub fn list_files(dir: &Path, max_depth: usize) -> Result<Vec<FileRecord>, PathError> {
    classify(dir, Expect::Directory)?;

    let mut out = Vec::new();
    let mut pending: Vec<(PathBuf, usize, LinkPolicy)> =
        vec![(dir.to_path_buf(), 0, LinkPolicy::Follow)];

    while let Some((path, depth, links)) = pending.pop() {
        let record = snapshot(&path, links)?;

        if record.is_directory && depth < max_depth {
            let entries = list_entries(&path)?;
            // Reversed so entries pop in listing order.
            pending.extend(
                entries
                    .into_iter()
                    .rev()
                    .map(|p| (p, depth + 1, LinkPolicy::NoFollow)),
            );
        }
        out.push(record);
    }

    debug!("[list_files] {:?}: {} records", dir, out.len());
    Ok(out)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
