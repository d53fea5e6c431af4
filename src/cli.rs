//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::logging::init_logger;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::resolve::flatten::{FlattenOptions, DEFAULT_MAX_DEPTH};

/// incflat - flatten #include trees into a single file.
#[derive(Parser, Debug)]
#[command(name = "incflat")]
#[command(
    author,
    version,
    about,
    long_about = r#"incflat recursively inlines #include directives, producing one flattened
file with no unresolved includes.

Directive forms (each must span the whole line):
- #include "name": looked up next to the including file first, then in the
  include directories
- #include <name>: looked up in the include directories only, in order

All other lines are copied verbatim. Includes inside comments or string
literals are expanded too; there is no tokenizer.

Examples:
    incflat flatten src/main.c -o main.flat.c -I include -I vendor/include
    incflat deps src/main.c -I include --format md
"#
)]
pub struct Cli {
    /// Output format for reports (jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet reports.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\n\
This never affects the flattened source itself."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (log every resolved include).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log every resolved include on stderr. INCFLAT_LOG, when set, takes\n\
precedence (e.g. INCFLAT_LOG=incflat=trace)."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Include resolution settings shared by all commands
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Include search directory (repeatable, searched in order).
    #[arg(
        short = 'I',
        long = "include-dir",
        value_name = "DIR",
        long_help = "Add a directory to the include search list. May be repeated; directories\n\
are searched in the order given and each is walked recursively. Earlier\n\
directories shadow later ones. The value is taken as one path, even if it\n\
contains ':'."
    )]
    pub include_dirs: Vec<PathBuf>,

    /// PATH-style list of include directories, searched after every -I.
    #[arg(
        long = "include-path",
        value_name = "PATHS",
        env = "INCFLAT_INCLUDE_PATH",
        long_help = "A list of include directories in the platform PATH syntax (':' separated\n\
on Unix, ';' on Windows). They are searched after all -I directories.\n\n\
Defaults to INCFLAT_INCLUDE_PATH."
    )]
    pub include_path: Option<OsString>,

    /// Maximum include nesting depth (0 = unlimited).
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Walk the filesystem for every lookup instead of memoizing.
    #[arg(long)]
    pub no_cache: bool,
}

impl ResolveArgs {
    /// `-I` directories in order, then the split `--include-path` list
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let listed = self
            .include_path
            .as_deref()
            .map(|paths| std::env::split_paths(paths).collect::<Vec<_>>())
            .unwrap_or_default();

        self.include_dirs
            .iter()
            .cloned()
            .chain(listed.into_iter().filter(|dir| !dir.as_os_str().is_empty()))
            .collect()
    }

    pub fn options(&self) -> FlattenOptions {
        FlattenOptions {
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
            cache_lookups: !self.no_cache,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a source file and its includes into one output file.
    #[command(
        long_about = "Expand every include reachable from INPUT and write the result to\n\
OUTPUT. The first unresolved or cyclic include aborts the run with a non-zero\n\
exit status; lines written before the failure remain in OUTPUT.\n\n\
When OUTPUT is a file, a one-item summary is printed to stdout.\n\n\
Examples:\n\
  incflat flatten a.cpp -o a.in -I include1 -I include2\n\
  incflat flatten a.cpp -o - | less\n"
    )]
    Flatten {
        /// Root source file.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination file ('-' for stdout).
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Append to OUTPUT instead of truncating it first.
        #[arg(long)]
        append: bool,

        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// List the resolved include tree without writing output.
    #[command(
        long_about = "Resolve every include reachable from INPUT and emit one file item for\n\
INPUT followed by one include item per directive, in expansion order.\n\
Resolution failures are reported as an error item and a non-zero exit status.\n\n\
Example:\n\
  incflat deps a.cpp -I include1 --format md\n"
    )]
    Deps {
        /// Root source file.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        resolve: ResolveArgs,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_logger(cli.verbose, cli.quiet);

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::Flatten {
            input,
            output,
            append,
            resolve,
        } => crate::backends::flatten::run_flatten(
            &input,
            &output,
            append,
            &resolve.search_paths(),
            resolve.options(),
            render_config,
        ),

        Commands::Deps { input, resolve } => crate::backends::deps::run_deps(
            &input,
            &resolve.search_paths(),
            resolve.options(),
            render_config,
        ),
    }
}
