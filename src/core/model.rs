//! Unified Result Model
//!
//! Every report command maps its findings to this model before rendering.

use serde::{Deserialize, Serialize};

use crate::resolve::directive::IncludeKind;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    File,
    Include,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content hash (XXH3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Include nesting depth (root file is 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,

    /// Lines written by a flattening run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,

    /// Includes expanded by a flattening run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<usize>,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncflatError {
    pub code: String,
    pub message: String,
}

impl IncflatError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    pub kind: Kind,

    /// File path, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// 1-indexed line of the directive within `path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Include name as written in the directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeKind>,

    /// Resolved file for an include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IncflatError>,
}

impl ResultItem {
    /// Create a new file result
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: Kind::File,
            path: Some(path.into()),
            line: None,
            name: None,
            include: None,
            target: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new include result
    pub fn include(
        path: impl Into<String>,
        line: usize,
        name: impl Into<String>,
        kind: IncludeKind,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: Kind::Include,
            path: Some(path.into()),
            line: Some(line),
            name: Some(name.into()),
            include: Some(kind),
            target: Some(target.into()),
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new error result
    pub fn error(error: IncflatError) -> Self {
        Self {
            kind: Kind::Error,
            path: None,
            line: None,
            name: None,
            include: None,
            target: None,
            meta: Meta::default(),
            errors: vec![error],
        }
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Attach a source location
    pub fn at(mut self, path: impl Into<String>, line: usize) -> Self {
        self.path = Some(path.into());
        self.line = Some(line);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[allow(dead_code)]
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|item| item.kind == Kind::Error)
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
