//! Flattening errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("unknown include file {name} at file {} at line {line}", .file.display())]
    UnresolvedInclude {
        name: String,
        file: PathBuf,
        line: usize,
    },

    #[error(
        "cyclic include of {} at file {} at line {line}",
        .path.display(),
        .file.display()
    )]
    CyclicInclude {
        path: PathBuf,
        file: PathBuf,
        line: usize,
        /// Expansion chain from the root down to the repeated file
        chain: Vec<PathBuf>,
    },

    #[error(
        "include of output file {} at file {} at line {line}",
        .path.display(),
        .file.display()
    )]
    OutputInclude {
        path: PathBuf,
        file: PathBuf,
        line: usize,
    },

    #[error("include depth limit of {limit} exceeded at file {} at line {line}", .file.display())]
    DepthExceeded {
        limit: usize,
        file: PathBuf,
        line: usize,
    },

    #[error("failed to open source file {}", .path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read source file {}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write flattened output")]
    Write(#[source] std::io::Error),
}

impl FlattenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            FlattenError::UnresolvedInclude { .. } => "UNRESOLVED_INCLUDE",
            FlattenError::CyclicInclude { .. } => "CYCLIC_INCLUDE",
            FlattenError::OutputInclude { .. } => "OUTPUT_INCLUDE",
            FlattenError::DepthExceeded { .. } => "DEPTH_EXCEEDED",
            FlattenError::OpenSource { .. } | FlattenError::ReadSource { .. } => "SOURCE_IO",
            FlattenError::Write(_) => "OUTPUT_IO",
        }
    }

    /// Including file and line, for errors tied to a directive
    pub fn site(&self) -> Option<(&PathBuf, usize)> {
        match self {
            FlattenError::UnresolvedInclude { file, line, .. }
            | FlattenError::CyclicInclude { file, line, .. }
            | FlattenError::OutputInclude { file, line, .. }
            | FlattenError::DepthExceeded { file, line, .. } => Some((file, *line)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message() {
        let err = FlattenError::UnresolvedInclude {
            name: "dummy.txt".to_string(),
            file: PathBuf::from("sources/a.cpp"),
            line: 8,
        };
        assert_eq!(
            err.to_string(),
            "unknown include file dummy.txt at file sources/a.cpp at line 8"
        );
        assert_eq!(err.code(), "UNRESOLVED_INCLUDE");
        assert_eq!(err.site(), Some((&PathBuf::from("sources/a.cpp"), 8)));
    }

    #[test]
    fn test_output_include_message() {
        let err = FlattenError::OutputInclude {
            path: PathBuf::from("inc/out.h"),
            file: PathBuf::from("a.c"),
            line: 2,
        };
        assert_eq!(
            err.to_string(),
            "include of output file inc/out.h at file a.c at line 2"
        );
        assert_eq!(err.code(), "OUTPUT_INCLUDE");
        assert_eq!(err.site(), Some((&PathBuf::from("a.c"), 2)));
    }

    #[test]
    fn test_io_errors_have_no_site() {
        let err = FlattenError::Write(std::io::Error::other("disk full"));
        assert_eq!(err.code(), "OUTPUT_IO");
        assert!(err.site().is_none());
    }
}
