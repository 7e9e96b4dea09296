//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Converts a Things3 database in JSON format to a collection of Markdown
/// files and directories
#[derive(Parser, Debug)]
#[command(name = "things2md")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source Things3 database in JSON format (things-cli -j all)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target directory for generated files; must not exist yet
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also export completed and canceled items
    #[arg(short, long)]
    pub all: bool,
}
