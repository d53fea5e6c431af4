//! Recursive include flattening
//!
//! A source file is processed line by line. Include directives are resolved
//! and expanded in place, recursively; every other line is copied verbatim to
//! the shared output sink followed by `\n` and flushed. Output order is a
//! pre-order walk of the include tree.
//!
//! Resolution policy:
//! - `<name>`: base name looked up in the caller's search paths only
//! - `"name"`: `dir(source)/name` if it is a file, otherwise the base name is
//!   looked up in the caller's search paths plus `parent(dir(source)/name)`
//!
//! The first failure anywhere aborts the whole run. Output already flushed is
//! left in place.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::resolve::directive::{parse_include, IncludeKind, IncludeReference};
use crate::resolve::error::FlattenError;
use crate::resolve::locate::{parent_dir, FileLocator};

/// Default limit on include nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for a flattening run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Maximum include nesting below the root file (`None` = unlimited)
    pub max_depth: Option<usize>,

    /// Memoize file lookups for the duration of the run
    pub cache_lookups: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            cache_lookups: true,
        }
    }
}

/// One resolved include, recorded in expansion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeEdge {
    /// File containing the directive
    pub from: PathBuf,

    /// 1-indexed line of the directive
    pub line: usize,

    /// Name as written in the directive
    pub name: String,

    pub kind: IncludeKind,

    /// File the directive resolved to
    pub resolved: PathBuf,

    /// Nesting depth of `resolved` (the root file is depth 0)
    pub depth: usize,
}

/// Counters for a flattening run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlattenStats {
    /// Files opened, including the root
    pub files: usize,

    /// Include directives expanded
    pub includes: usize,

    /// Lines written to the output
    pub lines: usize,

    /// Deepest nesting reached
    pub max_depth: usize,
}

/// Outcome of a successful top-level run
#[derive(Debug, Clone, Default)]
pub struct FlattenReport {
    pub stats: FlattenStats,
    #[allow(dead_code)]
    pub edges: Vec<IncludeEdge>,
}

/// Flattener writing into a single shared sink
pub struct Flattener<W: Write> {
    out: W,
    locator: FileLocator,
    options: FlattenOptions,
    /// Canonical paths of the files currently being expanded
    expanding: Vec<PathBuf>,
    /// Canonical path of the file the sink writes to, if any
    output_path: Option<PathBuf>,
    edges: Vec<IncludeEdge>,
    stats: FlattenStats,
}

impl<W: Write> Flattener<W> {
    pub fn new(out: W, options: FlattenOptions) -> Self {
        let locator = if options.cache_lookups {
            FileLocator::cached()
        } else {
            FileLocator::uncached()
        };

        Self {
            out,
            locator,
            options,
            expanding: Vec::new(),
            output_path: None,
            edges: Vec::new(),
            stats: FlattenStats::default(),
        }
    }

    /// Refuse to expand `path`: it is the file the sink writes to
    pub fn with_output_path(mut self, path: &Path) -> Self {
        self.output_path = Some(canonical(path));
        self
    }

    /// Flatten `source` into the sink, resolving includes against `search_paths`
    pub fn flatten(&mut self, source: &Path, search_paths: &[PathBuf]) -> Result<(), FlattenError> {
        self.expand(source, search_paths, 0)
    }

    pub fn stats(&self) -> FlattenStats {
        self.stats
    }

    pub fn edges(&self) -> &[IncludeEdge] {
        &self.edges
    }

    pub fn into_report(self) -> FlattenReport {
        FlattenReport {
            stats: self.stats,
            edges: self.edges,
        }
    }

    fn expand(
        &mut self,
        source: &Path,
        search_paths: &[PathBuf],
        depth: usize,
    ) -> Result<(), FlattenError> {
        let file = File::open(source).map_err(|e| FlattenError::OpenSource {
            path: source.to_path_buf(),
            source: e,
        })?;

        self.stats.files += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        self.expanding.push(canonical(source));

        let result = self.expand_lines(BufReader::new(file), source, search_paths, depth);

        self.expanding.pop();
        result
    }

    fn expand_lines<R: BufRead>(
        &mut self,
        mut reader: R,
        source: &Path,
        search_paths: &[PathBuf],
        depth: usize,
    ) -> Result<(), FlattenError> {
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| FlattenError::ReadSource {
                    path: source.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            match parse_include(&String::from_utf8_lossy(&buf)) {
                Some(reference) => {
                    self.include(&reference, source, line_no, search_paths, depth)?
                }
                None => self.emit(&buf)?,
            }
        }

        Ok(())
    }

    fn include(
        &mut self,
        reference: &IncludeReference,
        source: &Path,
        line: usize,
        search_paths: &[PathBuf],
        depth: usize,
    ) -> Result<(), FlattenError> {
        let Some(resolved) = self.resolve(reference, source, search_paths) else {
            debug!(
                name = %reference.name,
                file = %source.display(),
                line,
                "unresolved include"
            );
            return Err(FlattenError::UnresolvedInclude {
                name: reference.name.clone(),
                file: source.to_path_buf(),
                line,
            });
        };

        let canonical_resolved = canonical(&resolved);
        if self.output_path.as_ref() == Some(&canonical_resolved) {
            return Err(FlattenError::OutputInclude {
                path: resolved,
                file: source.to_path_buf(),
                line,
            });
        }

        if self.expanding.contains(&canonical_resolved) {
            debug!(
                path = %resolved.display(),
                file = %source.display(),
                line,
                "cyclic include"
            );
            let mut chain = self.expanding.clone();
            chain.push(canonical_resolved);
            return Err(FlattenError::CyclicInclude {
                path: resolved,
                file: source.to_path_buf(),
                line,
                chain,
            });
        }

        if let Some(limit) = self.options.max_depth {
            if depth >= limit {
                return Err(FlattenError::DepthExceeded {
                    limit,
                    file: source.to_path_buf(),
                    line,
                });
            }
        }

        debug!(
            kind = %reference.kind,
            name = %reference.name,
            resolved = %resolved.display(),
            depth = depth + 1,
            "expanding include"
        );

        self.stats.includes += 1;
        self.edges.push(IncludeEdge {
            from: source.to_path_buf(),
            line,
            name: reference.name.clone(),
            kind: reference.kind,
            resolved: resolved.clone(),
            depth: depth + 1,
        });

        self.expand(&resolved, search_paths, depth + 1)
    }

    fn resolve(
        &mut self,
        reference: &IncludeReference,
        source: &Path,
        search_paths: &[PathBuf],
    ) -> Option<PathBuf> {
        match reference.kind {
            IncludeKind::Angle => {
                let name = reference.base_name()?;
                self.locator.locate(name, search_paths)
            }
            IncludeKind::Quoted => {
                let local_dir = source.parent().unwrap_or_else(|| Path::new(""));
                let candidate = local_dir.join(&reference.name);
                if candidate.is_file() {
                    return Some(candidate);
                }

                let name = candidate.file_name()?.to_str()?.to_string();
                let extended: Vec<PathBuf> = search_paths
                    .iter()
                    .cloned()
                    .chain(std::iter::once(parent_dir(&candidate)))
                    .collect();
                self.locator.locate(&name, &extended)
            }
        }
    }

    fn emit(&mut self, line: &[u8]) -> Result<(), FlattenError> {
        self.out.write_all(line).map_err(FlattenError::Write)?;
        self.out.write_all(b"\n").map_err(FlattenError::Write)?;
        self.out.flush().map_err(FlattenError::Write)?;
        self.stats.lines += 1;
        Ok(())
    }
}

/// Flatten `source` into `out` and return the run's stats and include edges
pub fn flatten_file<W: Write>(
    source: &Path,
    out: W,
    search_paths: &[PathBuf],
    options: FlattenOptions,
) -> Result<FlattenReport, FlattenError> {
    let mut flattener = Flattener::new(out, options);
    flattener.flatten(source, search_paths)?;
    Ok(flattener.into_report())
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
