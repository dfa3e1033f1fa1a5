use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::batch::RunOptions;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "renum")]
#[command(about = "Normalize numbered file names into a consistent \"NN - Title\" layout")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress tables, progress bars and summaries
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Propose (and optionally apply) normalized names for numbered files
    Rename(RenameArgs),

    /// Initialize a renum.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Folder whose files are renamed
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Include files in sub-folders
    #[arg(short, long)]
    pub subfolders: bool,

    /// Rename the files (without this only the change log is written)
    #[arg(short, long)]
    pub write: bool,

    /// Remove " (...)" suffixes from names
    #[arg(short = 'b', long)]
    pub remove_brackets: bool,

    /// Combined switches, any of the letters s, w and b (e.g. "swb")
    #[arg(short, long, value_name = "LETTERS")]
    pub mode: Option<String>,

    /// Change-log file name inside ROOT (overrides config)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Print the processed items as JSON (single line)
    #[arg(long)]
    pub json: bool,
}

impl RenameArgs {
    /// Fold the explicit flags and the letter switches into run options.
    pub fn options(&self) -> RunOptions {
        let letters = self
            .mode
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();

        RunOptions {
            subfolders: self.subfolders || letters.contains('s'),
            write: self.write || letters.contains('w'),
            remove_brackets: self.remove_brackets || letters.contains('b'),
        }
    }
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
