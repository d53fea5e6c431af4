//! Flatten backend - Write a flattened source file

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::paths::{current_dir, display_path};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, hash_file};
use crate::resolve::flatten::{flatten_file, FlattenOptions, FlattenReport, Flattener};

/// Output path meaning "write to stdout"
pub const STDOUT_PATH: &str = "-";

/// Flatten `input` into the file at `output`
///
/// The file is truncated first unless `append` is set; the core itself only
/// ever appends. An include that resolves to the output file fails the run.
pub fn flatten_to_path(
    input: &Path,
    output: &Path,
    append: bool,
    include_dirs: &[PathBuf],
    options: FlattenOptions,
) -> Result<FlattenReport> {
    if let (Ok(a), Ok(b)) = (input.canonicalize(), output.canonicalize()) {
        if a == b {
            bail!("Output {:?} is the same file as input", output);
        }
    }

    let mut open = OpenOptions::new();
    open.create(true);
    if append {
        open.append(true);
    } else {
        open.write(true).truncate(true);
    }
    let file = open
        .open(output)
        .with_context(|| format!("Failed to open output file: {:?}", output))?;

    let mut flattener =
        Flattener::new(BufWriter::new(file), options).with_output_path(output);
    flattener.flatten(input, include_dirs)?;
    Ok(flattener.into_report())
}

/// Run the flatten command
pub fn run_flatten(
    input: &Path,
    output: &Path,
    append: bool,
    include_dirs: &[PathBuf],
    options: FlattenOptions,
    config: RenderConfig,
) -> Result<()> {
    if output == Path::new(STDOUT_PATH) {
        let stdout = io::stdout();
        let report = flatten_file(input, stdout.lock(), include_dirs, options)?;
        info!(
            files = report.stats.files,
            includes = report.stats.includes,
            "flattened to stdout"
        );
        return Ok(());
    }

    let report = flatten_to_path(input, output, append, include_dirs, options)?;
    info!(
        files = report.stats.files,
        includes = report.stats.includes,
        lines = report.stats.lines,
        output = %output.display(),
        "flattened"
    );

    let meta = Meta {
        size: get_file_size(output).ok(),
        hash: hash_file(output).ok(),
        depth: Some(report.stats.max_depth),
        lines: Some(report.stats.lines),
        includes: Some(report.stats.includes),
    };

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::file(display_path(output, &current_dir())).with_meta(meta));

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_flatten_to_path_truncates() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("a.c");
        let output = temp.path().join("out/a.flat");
        fs::write(&input, "#include \"b.h\"\nmain\n").unwrap();
        fs::write(temp.path().join("b.h"), "b\n").unwrap();
        fs::create_dir_all(output.parent().unwrap()).unwrap();
        fs::write(&output, "stale\n").unwrap();

        let report =
            flatten_to_path(&input, &output, false, &[], FlattenOptions::default()).unwrap();
        assert_eq!(report.stats.includes, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "b\nmain\n");
    }

    #[test]
    fn test_flatten_to_path_appends() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("a.c");
        let output = temp.path().join("a.flat");
        fs::write(&input, "x\n").unwrap();
        fs::write(&output, "header\n").unwrap();

        flatten_to_path(&input, &output, true, &[], FlattenOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "header\nx\n");
    }

    #[test]
    fn test_flatten_to_path_rejects_input_as_output() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("a.c");
        fs::write(&input, "x\n").unwrap();

        let err = flatten_to_path(&input, &input, true, &[], FlattenOptions::default());
        assert!(err.is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), "x\n");
    }

    #[test]
    fn test_flatten_to_path_refuses_to_include_output() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("a.c");
        let output = temp.path().join("inc/out.h");
        fs::write(&input, "top\n#include <out.h>\nend\n").unwrap();
        fs::create_dir_all(output.parent().unwrap()).unwrap();

        let err = flatten_to_path(
            &input,
            &output,
            false,
            &[temp.path().join("inc")],
            FlattenOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("include of output file"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "top\n");
    }

    #[test]
    fn test_flatten_to_path_unopenable_output() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("a.c");
        fs::write(&input, "x\n").unwrap();

        let output = temp.path().join("missing/dir/a.flat");
        let err = flatten_to_path(&input, &output, false, &[], FlattenOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open output file"));
    }
}
