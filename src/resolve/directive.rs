//! Include directive parsing
//!
//! Recognizes the two directive forms, each matched against the whole line:
//! #include <name>
//! #include "name"
//!
//! There is no tokenizer: a directive-shaped line inside a comment or string
//! literal is still a directive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static regex for angle-bracket includes
/// Format: #include <name>
pub static ANGLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#\s*include\s*<([^>]*)>\s*$"#).expect("Invalid ANGLE_RE regex")
});

/// Static regex for quoted includes
/// Format: #include "name"
pub static QUOTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#\s*include\s*"([^"]*)"\s*$"#).expect("Invalid QUOTED_RE regex")
});

/// Syntactic form of an include directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeKind {
    /// `#include "name"`: local directory first, then search paths
    Quoted,
    /// `#include <name>`: search paths only
    Angle,
}

impl std::fmt::Display for IncludeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncludeKind::Quoted => write!(f, "quoted"),
            IncludeKind::Angle => write!(f, "angle"),
        }
    }
}

/// A parsed include directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeReference {
    pub kind: IncludeKind,

    /// Name exactly as written between the delimiters
    pub name: String,
}

impl IncludeReference {
    pub fn new(kind: IncludeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Final path component of the name, the only part used for lookup
    pub fn base_name(&self) -> Option<&str> {
        Path::new(&self.name).file_name().and_then(|n| n.to_str())
    }
}

/// Classify a single line (without its trailing newline)
pub fn parse_include(line: &str) -> Option<IncludeReference> {
    if let Some(caps) = ANGLE_RE.captures(line) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return Some(IncludeReference::new(IncludeKind::Angle, name));
    }

    QUOTED_RE.captures(line).map(|caps| {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        IncludeReference::new(IncludeKind::Quoted, name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_angle() {
        let r = parse_include("#include <vector>").unwrap();
        assert_eq!(r.kind, IncludeKind::Angle);
        assert_eq!(r.name, "vector");
    }

    #[test]
    fn test_parse_quoted() {
        let r = parse_include("#include \"dir1/b.h\"").unwrap();
        assert_eq!(r.kind, IncludeKind::Quoted);
        assert_eq!(r.name, "dir1/b.h");
    }

    #[test]
    fn test_parse_optional_whitespace() {
        assert!(parse_include("#include\"dir1/d.h\"").is_some());
        assert!(parse_include("  #  include   <std1.h>  ").is_some());
        assert!(parse_include("\t#include<a.h>\t").is_some());
    }

    #[test]
    fn test_parse_keeps_trailing_cr_as_whitespace() {
        let r = parse_include("#include <a.h>\r").unwrap();
        assert_eq!(r.name, "a.h");
    }

    #[test]
    fn test_parse_rejects_trailing_content() {
        assert!(parse_include("#include <a.h> // comment").is_none());
        assert!(parse_include("#include \"a.h\" x").is_none());
    }

    #[test]
    fn test_parse_rejects_non_directives() {
        assert!(parse_include("// this comment before include").is_none());
        assert!(parse_include("int x = 1;").is_none());
        assert!(parse_include("#define FOO 1").is_none());
        assert!(parse_include("x #include <a.h>").is_none());
        assert!(parse_include("#include <a.h\"").is_none());
        assert!(parse_include("").is_none());
    }

    #[test]
    fn test_parse_empty_name() {
        let r = parse_include("#include <>").unwrap();
        assert_eq!(r.name, "");
        assert_eq!(r.base_name(), None);
    }

    #[test]
    fn test_base_name() {
        let r = IncludeReference::new(IncludeKind::Angle, "sys/types.h");
        assert_eq!(r.base_name(), Some("types.h"));

        let r = IncludeReference::new(IncludeKind::Quoted, "b.h");
        assert_eq!(r.base_name(), Some("b.h"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(IncludeKind::Quoted.to_string(), "quoted");
        assert_eq!(IncludeKind::Angle.to_string(), "angle");
    }
}
