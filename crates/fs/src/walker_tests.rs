use super::*;

use std::{
    ffi::OsString,
    fs::{self, create_dir, write},
};

/// root/
///   a.txt
///   sub/
///     b.txt
///     deeper/
///       c.txt
///   z.txt
fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("a.txt"), b"a").expect("write a.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("b.txt"), b"bb").expect("write b.txt");
    create_dir(root.join("sub").join("deeper")).expect("create deeper");
    write(root.join("sub").join("deeper").join("c.txt"), b"ccc").expect("write c.txt");
    write(root.join("z.txt"), b"z").expect("write z.txt");

    tmp
}

fn raw_listing(dir: &Path) -> Vec<OsString> {
    fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("entry").file_name())
        .collect()
}

fn names(records: &[FileRecord]) -> Vec<OsString> {
    records.iter().map(|r| OsString::from(&r.name)).collect()
}

/// Every directory's children must be exactly what a one-level expansion of
/// that directory produces, in the same order.
fn assert_mirrors_filesystem(record: &FileRecord) {
    let mut stack = vec![record];
    while let Some(rec) = stack.pop() {
        if !rec.is_directory {
            assert!(rec.children.is_empty(), "{} has children", rec.path);
            continue;
        }

        let dir = Path::new(&rec.path);
        assert_eq!(names(&rec.children), raw_listing(dir), "listing of {:?}", dir);

        for child in &rec.children {
            let mut expected =
                snapshot(Path::new(&child.path), LinkPolicy::NoFollow).expect("snapshot child");
            // Atime may move when a directory is listed.
            expected.last_access_time = child.last_access_time;
            assert_eq!(
                FileRecord {
                    children: Vec::new(),
                    ..child.clone()
                },
                expected
            );
        }
        stack.extend(rec.children.iter());
    }
}

#[test]
fn walk_builds_full_tree_in_enumeration_order() {
    let tmp = fixture();
    let root = tmp.path();

    let tree = walk(root).expect("walk");

    assert!(tree.is_directory);
    assert_eq!(tree.children.len(), 3);
    assert_eq!(names(&tree.children), raw_listing(root));
    assert_eq!(tree.count(), 7);

    let sub = tree
        .children
        .iter()
        .find(|c| c.name == "sub")
        .expect("sub directory record");
    assert_eq!(sub.path, root.join("sub").to_string_lossy());
    assert_eq!(sub.children.len(), 2);

    let deeper = sub
        .children
        .iter()
        .find(|c| c.name == "deeper")
        .expect("deeper directory record");
    assert_eq!(deeper.children.len(), 1);
    assert_eq!(deeper.children[0].name, "c.txt");
    assert_eq!(deeper.children[0].size_bytes, 3);

    assert_mirrors_filesystem(&tree);
}

#[test]
fn walk_of_empty_directory_has_no_children() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let tree = walk(tmp.path()).expect("walk");
    assert!(tree.is_directory);
    assert!(tree.children.is_empty());
}

#[test]
fn walk_is_structurally_idempotent() {
    let tmp = fixture();

    let strip_atime = |mut rec: FileRecord| {
        let mut stack = vec![&mut rec];
        while let Some(r) = stack.pop() {
            r.last_access_time = None;
            stack.extend(r.children.iter_mut());
        }
        rec
    };

    let first = strip_atime(walk(tmp.path()).expect("first walk"));
    let second = strip_atime(walk(tmp.path()).expect("second walk"));
    assert_eq!(first, second);
}

#[test]
fn walk_rejects_files_and_missing_paths() {
    let tmp = fixture();
    let file = tmp.path().join("a.txt");

    assert!(matches!(
        walk(&file),
        Err(PathError::InvalidDirectoryPath(p)) if p == file
    ));
    assert!(matches!(
        walk(&tmp.path().join("nope")),
        Err(PathError::InvalidDirectoryPath(_))
    ));
}

#[test]
fn walk_includes_hidden_entries() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join(".hidden"), b"x").expect("write hidden");
    create_dir(tmp.path().join(".git")).expect("create .git");

    let tree = walk(tmp.path()).expect("walk");
    assert_eq!(tree.children.len(), 2);
    assert!(tree.children.iter().all(|c| c.is_hidden));
}

#[cfg(unix)]
#[test]
fn walk_does_not_follow_cyclic_symlinks() {
    use std::os::unix::fs::symlink;

    let tmp = fixture();
    let root = tmp.path();
    // sub/loop -> root
    symlink(root, root.join("sub").join("loop")).expect("create loop link");

    let tree = walk(root).expect("walk terminates");

    let sub = tree
        .children
        .iter()
        .find(|c| c.name == "sub")
        .expect("sub record");
    let link = sub
        .children
        .iter()
        .find(|c| c.name == "loop")
        .expect("loop link record");

    assert!(link.is_symbolic_link);
    assert!(!link.is_directory);
    assert!(link.children.is_empty());
    assert_eq!(tree.count(), 8);
}

#[cfg(unix)]
#[test]
fn walk_follows_symlinked_root() {
    use std::os::unix::fs::symlink;

    let tmp = fixture();
    let link_dir = tempfile::tempdir().expect("create link dir");
    let link = link_dir.path().join("root-link");
    symlink(tmp.path(), &link).expect("create root link");

    let tree = walk(&link).expect("walk through link");
    assert!(tree.is_symbolic_link);
    assert!(tree.is_directory);
    assert_eq!(tree.children.len(), 3);
    assert!(
        tree.children
            .iter()
            .all(|c| Path::new(&c.path).starts_with(&link))
    );
}

#[cfg(unix)]
#[test]
fn walk_fails_fast_on_unreadable_subdirectory() {
    use std::os::unix::fs::PermissionsExt;

    // Permission bits do not stop root.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let tmp = fixture();
    let locked = tmp.path().join("sub").join("deeper");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod 000");

    let result = walk(tmp.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore perms");

    match result {
        Err(PathError::ReadDir { path, .. }) => assert_eq!(path, locked),
        other => panic!("expected ReadDir failure, got {:?}", other.map(|r| r.count())),
    }
}

#[test]
fn list_files_respects_depth_and_order() {
    let tmp = fixture();
    let root = tmp.path();

    let depth0 = list_files(root, 0).expect("list depth 0");
    assert_eq!(depth0.len(), 1);
    assert_eq!(depth0[0].path, root.to_string_lossy());

    let depth1 = list_files(root, 1).expect("list depth 1");
    assert_eq!(depth1.len(), 4);
    assert_eq!(names(&depth1[1..]), raw_listing(root));
    assert!(depth1.iter().all(|r| r.children.is_empty()));

    let all = list_files(root, usize::MAX).expect("list everything");
    assert_eq!(all.len(), 7);

    // Pre-order: every directory comes before its descendants.
    let pos = |rel: &str| {
        let p = root.join(rel).to_string_lossy().into_owned();
        all.iter()
            .position(|r| r.path == p)
            .unwrap_or_else(|| panic!("{rel} missing"))
    };
    assert!(pos("sub") < pos("sub/b.txt"));
    assert!(pos("sub") < pos("sub/deeper"));
    assert!(pos("sub/deeper") < pos("sub/deeper/c.txt"));
}

#[test]
fn list_files_rejects_regular_files() {
    let tmp = fixture();
    assert!(matches!(
        list_files(&tmp.path().join("z.txt"), 3),
        Err(PathError::InvalidDirectoryPath(_))
    ));
}
