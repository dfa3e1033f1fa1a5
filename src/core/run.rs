//! The `rename` command: enumerate, classify, normalize, log, then rename.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Style};
use tabled::{Table, Tabled};
use tracing::{info, instrument};

use super::batch::{FileItem, RunOptions, classify, process};
use super::compose::ItemStyle;
use super::ordinal::NormalizationContext;
use super::rename::{RenameSummary, apply};
use super::report::write_log;
use crate::cli::{AppContext, RenameArgs};
use crate::infra::config::{Config, load_config};
use crate::infra::walk::FileWalker;

/// Proposed names for one root, before anything is renamed.
#[derive(Debug)]
pub struct Plan {
    pub root: PathBuf,
    pub style: ItemStyle,
    pub continuous: bool,
    pub items: Vec<FileItem>,
}

impl Plan {
    pub fn changed(&self) -> impl Iterator<Item = &FileItem> {
        self.items.iter().filter(|i| i.changed)
    }
}

/// Expand `~`/`$VAR` and canonicalize the root folder.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let raw = root.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand root path {raw}"))?;
    let path = dunce::canonicalize(&*expanded)
        .with_context(|| format!("Root folder not found: {expanded}"))?;

    if !path.is_dir() {
        anyhow::bail!("Root is not a folder: {}", path.display());
    }
    Ok(path)
}

/// Enumerate and normalize every candidate below `root`.
pub fn plan(root: &Path, options: &RunOptions, config: &Config, log_path: &Path) -> Result<Plan> {
    let walker = FileWalker::new(&config.ignore_patterns)
        .context("Invalid ignore pattern in configuration")?
        .with_recursive(options.subfolders)
        .with_include_hidden(config.include_hidden)
        .with_respect_ignore_files(config.respect_ignore_files)
        .with_skip_extensions(&config.skip_extensions)
        .with_excluded(log_path.to_path_buf());

    let classified = classify(walker.walk_files(root), &config.document_extensions);
    let mut ctx = NormalizationContext::new(classified.style);
    let items = process(&classified.candidates, options, &mut ctx);

    Ok(Plan {
        root: root.to_path_buf(),
        style: classified.style,
        continuous: ctx.is_continuous(),
        items,
    })
}

#[instrument(skip(ctx))]
pub fn run(args: RenameArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;
    let options = args.options();
    let root = resolve_root(&args.root)?;
    let log_name = args.log_file.as_deref().unwrap_or(&config.log_file);
    let log_path = root.join(log_name);

    let plan = plan(&root, &options, &config, &log_path)?;
    let logged = write_log(&log_path, &plan.items)?;

    info!(
        root = %root.display(),
        files = plan.items.len(),
        changed = logged,
        style = %plan.style,
        continuous = plan.continuous,
        "planned renames"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&plan.items).context("Failed to serialize items")?
        );
    } else if !ctx.quiet {
        print_plan(&plan, ctx);
    }

    if !options.write {
        if !ctx.quiet && !args.json {
            println!(
                "{} of {} files need renaming; changes written to {}",
                logged,
                plan.items.len(),
                log_path.display()
            );
        }
        return Ok(());
    }

    let summary = apply(&plan.items, ctx.quiet || args.json);
    info!(renamed = summary.renamed, failed = summary.failed.len(), "rename finished");

    if !ctx.quiet && !args.json {
        print_summary(&summary, ctx);
    }
    Ok(())
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "#")]
    id: usize,
    folder: String,
    original: String,
    proposed: String,
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_plan(plan: &Plan, ctx: &AppContext) {
    let rows: Vec<Row> = plan
        .changed()
        .map(|item| Row {
            id: item.sequence_id,
            folder: item
                .original_path
                .parent()
                .and_then(|p| p.strip_prefix(&plan.root).ok())
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            original: file_name(&item.original_path),
            proposed: file_name(&item.proposed_path),
        })
        .collect();

    let header = if ctx.no_color { Style::new() } else { Style::new().yellow() };
    if rows.is_empty() {
        println!("{}", "Nothing to rename".style(header));
        return;
    }
    println!("{}", format!("Proposed renames ({} style):", plan.style).style(header));
    println!("{}", Table::new(rows));
}

fn print_summary(summary: &RenameSummary, ctx: &AppContext) {
    let (ok, bad) = if ctx.no_color {
        (Style::new(), Style::new())
    } else {
        (Style::new().green(), Style::new().red())
    };

    println!(
        "{} Renamed {} files, {} failed",
        "✓".style(ok),
        summary.renamed,
        summary.failed.len()
    );
    for (item, err) in &summary.failed {
        println!("  {} {}: {err}", "✗".style(bad), item.original_path.display());
    }
}
