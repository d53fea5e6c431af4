//! Path normalization utilities
//!
//! Paths shown in results use '/' as separator and are relative to a base
//! directory when they live under it.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Display form of `path`: relative to `base` when possible, normalized otherwise
pub fn display_path(path: &Path, base: &Path) -> String {
    match make_relative(path, base) {
        Some(rel) if !rel.is_empty() => rel,
        _ => normalize_path(path.strip_prefix(".").unwrap_or(path)),
    }
}

/// Current working directory, or `.` if it cannot be determined
pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("src/main.rs");
        assert_eq!(normalize_path(path), "src/main.rs");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/project");
        let path = Path::new("/project/src/a.c");
        assert_eq!(make_relative(path, root), Some("src/a.c".to_string()));
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/project");
        let path = Path::new("/other/file.c");
        assert_eq!(make_relative(path, root), None);
    }

    #[test]
    fn test_display_path_under_base() {
        let base = Path::new("/project");
        assert_eq!(display_path(Path::new("/project/inc/b.h"), base), "inc/b.h");
    }

    #[test]
    fn test_display_path_outside_base() {
        let base = Path::new("/project");
        assert_eq!(display_path(Path::new("/usr/include/b.h"), base), "/usr/include/b.h");
        assert_eq!(display_path(Path::new("rel/b.h"), base), "rel/b.h");
        assert_eq!(display_path(Path::new("./rel/b.h"), base), "rel/b.h");
    }

    #[test]
    fn test_display_path_equal_to_base() {
        let base = Path::new("/project");
        assert_eq!(display_path(base, base), "/project");
    }
}
