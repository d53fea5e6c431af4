//! File location across ordered search roots
//!
//! Each root is walked recursively with walkdir; the first regular file whose
//! base name equals the requested name wins. Roots are consulted strictly in
//! order, so earlier roots shadow later ones.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Find `name` under the given roots, in order
///
/// Missing or non-directory roots are skipped. Within a root, entries are
/// visited sorted by file name so repeated runs agree on the first match.
pub fn locate(name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    for root in roots {
        if !root.is_dir() {
            trace!(root = %root.display(), "skipping unavailable search root");
            continue;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    trace!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_name() != OsStr::new(name) {
                continue;
            }

            // file_type() does not follow symlinks; is_file() does
            if entry.file_type().is_file() || entry.path().is_file() {
                return Some(entry.into_path());
            }
        }
    }

    None
}

/// Locator with an optional per-run memo of lookups
#[derive(Debug, Default)]
pub struct FileLocator {
    cache: Option<HashMap<(String, Vec<PathBuf>), Option<PathBuf>>>,
}

impl FileLocator {
    /// Locator that walks the filesystem on every lookup
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Locator that remembers each (name, roots) lookup for its lifetime
    pub fn cached() -> Self {
        Self {
            cache: Some(HashMap::new()),
        }
    }

    #[allow(dead_code)]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn locate(&mut self, name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
        let Some(cache) = self.cache.as_mut() else {
            return locate(name, roots);
        };

        let key = (name.to_string(), roots.to_vec());
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }

        let found = locate(name, roots);
        cache.insert(key, found.clone());
        found
    }
}

/// Directory containing `path`, with `.` standing in for a bare file name
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
