//! **renum** - Bulk normalizer for numbered file names
//!
//! Turns inconsistently numbered collections (`3 Intro.mp3`, `0101. Chapter One.mp4`,
//! `bs160131d1 08 Out in the Street.flac`) into a sortable `NN - Title.ext` layout.
//! Dry run by default: every run writes a change log, renames only with `--write`.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - classification, normalization and the rename/report collaborators
pub mod core {
    /// Stateless filename predicates (leading digit, boss marker, module codes)
    pub mod patterns;

    /// Directory/stem/extension split and noise removal
    pub mod decompose;
    pub use decompose::{Decomposed, NormalizeError, decompose};

    /// Ordinal inference, continuous numbering and padding
    pub mod ordinal;
    pub use ordinal::{NormalizationContext, Ordinal};

    /// Target name assembly per item style
    pub mod compose;
    pub use compose::ItemStyle;

    /// Ordered, single-threaded batch driver
    pub mod batch;
    pub use batch::{FileItem, RunOptions, classify, process};

    /// Filesystem moves with classified failures
    pub mod rename;
    pub use rename::{RenameError, RenameSummary};

    /// Plain-text change log
    pub mod report;

    /// `rename` subcommand orchestration
    pub mod run;
    pub use run::run as rename_run;
}

/// Infrastructure - Configuration and directory enumeration
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Ignore-aware directory walking with folder-contiguous ordering
    pub mod walk;
    pub use walk::FileWalker;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::rename_run;
pub use infra::{Config, FileWalker, load_config};

// Core types for external consumers
pub use crate::core::{FileItem, ItemStyle, NormalizationContext, RunOptions};
