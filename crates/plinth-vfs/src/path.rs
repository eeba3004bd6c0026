//! Virtual path helpers.

use crate::StorageError;

/// Join two virtual paths with exactly one `/` between segments.
///
/// A leading `/` on `base` (or on `relative` when `base` is empty) is kept;
/// empty segments are dropped.
pub fn combine_paths(base: &str, relative: &str) -> String {
    let rooted = base.starts_with('/') || (base.is_empty() && relative.starts_with('/'));

    let joined = base
        .split('/')
        .chain(relative.split('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Split a virtual path into normal segments relative to a store root.
///
/// `.` segments are skipped. `..`, backslashes, NUL bytes and paths with no
/// segments at all are rejected.
pub(crate) fn segments(path: &str) -> Result<Vec<&str>, StorageError> {
    let mut out = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(StorageError::InvalidPath(path.to_string())),
            s if s.contains('\\') || s.contains('\0') => {
                return Err(StorageError::InvalidPath(path.to_string()))
            }
            s => out.push(s),
        }
    }

    if out.is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }

    Ok(out)
}
