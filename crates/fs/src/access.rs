use std::path::Path;

use bitflags::bitflags;

bitflags! {
    /// Effective access of the calling process to a path's resolved target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Access: u8 {
        const READ    = 0b0000_0001;
        const WRITE   = 0b0000_0010;
        const EXECUTE = 0b0000_0100;
    }
}

/// Probe read/write/execute access for `path`, following symbolic links.
///
/// A path that cannot be resolved reports no access at all.
#[cfg(unix)]
pub fn probe(path: &Path) -> Access {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};

    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return Access::empty();
    };

    let mut access = Access::empty();
    for (flag, mode) in [
        (Access::READ, libc::R_OK),
        (Access::WRITE, libc::W_OK),
        (Access::EXECUTE, libc::X_OK),
    ] {
        // SAFETY: `cpath` is a valid NUL-terminated string that outlives the call.
        if unsafe { libc::access(cpath.as_ptr(), mode) } == 0 {
            access |= flag;
        }
    }
    access
}

/// Windows has no `access(2)`; approximate from the read-only attribute and
/// executable extensions.
#[cfg(not(unix))]
pub fn probe(path: &Path) -> Access {
    const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com"];

    let Ok(meta) = std::fs::metadata(path) else {
        return Access::empty();
    };

    let mut access = Access::READ;
    if !meta.permissions().readonly() {
        access |= Access::WRITE;
    }

    let executable = meta.is_dir()
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                EXECUTABLE_EXTENSIONS
                    .iter()
                    .any(|x| x.eq_ignore_ascii_case(e))
            });
    if executable {
        access |= Access::EXECUTE;
    }
    access
}
