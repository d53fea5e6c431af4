//! incflat - Flatten #include trees into a single source file
//!
//! incflat provides:
//! - Whole-line recognition of quoted and angle-bracket includes
//! - Ordered, recursive lookup across include directories
//! - Recursive in-place expansion with cycle and depth guards
//! - Include tree reports (jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod resolve;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
