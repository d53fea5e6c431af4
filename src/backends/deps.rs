//! Deps backend - Report the resolved include tree

use anyhow::{bail, Result};
use std::io;
use std::path::{Path, PathBuf};

use crate::core::model::{IncflatError, Meta, ResultItem, ResultSet};
use crate::core::paths::{current_dir, display_path};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, hash_file};
use crate::resolve::error::FlattenError;
use crate::resolve::flatten::{FlattenOptions, Flattener};

fn file_meta(path: &Path, depth: usize) -> Meta {
    Meta {
        size: get_file_size(path).ok(),
        hash: hash_file(path).ok(),
        depth: Some(depth),
        ..Meta::default()
    }
}

/// Resolve the include tree of `input` into a ResultSet
///
/// Items are the root file, then one include per resolved directive in
/// expansion order, then an error item if resolution stopped early.
pub fn collect_deps(
    input: &Path,
    include_dirs: &[PathBuf],
    options: FlattenOptions,
    base: &Path,
) -> (ResultSet, Option<FlattenError>) {
    let mut flattener = Flattener::new(io::sink(), options);
    let outcome = flattener.flatten(input, include_dirs);

    let mut result_set = ResultSet::new();

    if input.is_file() {
        let mut meta = file_meta(input, 0);
        meta.includes = Some(flattener.stats().includes);
        result_set.push(ResultItem::file(display_path(input, base)).with_meta(meta));
    }

    for edge in flattener.edges() {
        let item = ResultItem::include(
            display_path(&edge.from, base),
            edge.line,
            edge.name.clone(),
            edge.kind,
            display_path(&edge.resolved, base),
        )
        .with_meta(file_meta(&edge.resolved, edge.depth));
        result_set.push(item);
    }

    let error = outcome.err();
    if let Some(err) = &error {
        let mut item = ResultItem::error(IncflatError::new(err.code(), err.to_string()));
        if let Some((file, line)) = err.site() {
            item = item.at(display_path(file, base), line);
        }
        result_set.push(item);
    }

    (result_set, error)
}

/// Run the deps command
pub fn run_deps(
    input: &Path,
    include_dirs: &[PathBuf],
    options: FlattenOptions,
    config: RenderConfig,
) -> Result<()> {
    let (result_set, error) = collect_deps(input, include_dirs, options, &current_dir());

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    if let Some(err) = error {
        bail!(err);
    }
    Ok(())
}
