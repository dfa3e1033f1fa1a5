//! Batch driver: classification of enumerated paths and the per-file
//! decompose → normalize → compose pipeline.
//!
//! Files must arrive folder-contiguous; the ordinal context depends on the
//! order in which folders and files are seen, so the pipeline runs on one
//! thread and returns the full list before anything is renamed.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use super::compose::{ItemStyle, compose};
use super::decompose::{NormalizeError, decompose};
use super::ordinal::{NormalizationContext, normalize};
use super::patterns::has_leading_digit_or_boss_marker;

/// The three switches of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Recurse into sub-folders
    pub subfolders: bool,
    /// Rename files instead of only reporting
    pub write: bool,
    /// Strip `" (...)"` suffixes
    pub remove_brackets: bool,
}

/// One processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileItem {
    pub sequence_id: usize,
    pub original_path: PathBuf,
    pub proposed_path: PathBuf,
    pub changed: bool,
}

impl FileItem {
    pub fn new(sequence_id: usize, original_path: PathBuf, proposed_path: PathBuf) -> Self {
        let changed = proposed_path != original_path;
        Self {
            sequence_id,
            original_path,
            proposed_path,
            changed,
        }
    }
}

/// Output of the classification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub candidates: Vec<PathBuf>,
    pub style: ItemStyle,
}

/// Keep paths whose file name starts with a digit or the boss marker and pick
/// the run's composition style. Order is preserved.
pub fn classify<I>(paths: I, document_extensions: &[String]) -> Classified
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut style = ItemStyle::Media;
    let candidates: Vec<PathBuf> = paths
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(has_leading_digit_or_boss_marker)
        })
        .inspect(|p| {
            if style == ItemStyle::Media && has_extension_in(p, document_extensions) {
                debug!(path = %p.display(), "document extension found, using document style");
                style = ItemStyle::Document;
            }
        })
        .collect();

    Classified { candidates, style }
}

fn has_extension_in(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Run the pipeline for one file at `folder_index` within its folder.
pub fn normalize_path(
    path: &Path,
    folder_index: usize,
    remove_brackets: bool,
    ctx: &mut NormalizationContext,
) -> Result<PathBuf, NormalizeError> {
    let parts = decompose(path, remove_brackets)?;
    let ordinal = normalize(&parts.cleaned, folder_index, ctx);

    Ok(compose(
        &parts.directory,
        &ordinal.prefix,
        &ordinal.title,
        &parts.extension,
        ctx.style(),
    ))
}

/// Process `candidates` in order. A file that fails normalization is kept
/// with its original path so sequence ids stay contiguous.
pub fn process(
    candidates: &[PathBuf],
    options: &RunOptions,
    ctx: &mut NormalizationContext,
) -> Vec<FileItem> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, original)| {
            let folder = original.parent().unwrap_or(Path::new(""));
            let folder_index = ctx.enter(folder);

            let proposed = match normalize_path(original, folder_index, options.remove_brackets, ctx) {
                Ok(p) => p,
                Err(e) => {
                    warn!("skipping {}: {e}", original.display());
                    original.clone()
                }
            };

            FileItem::new(i + 1, original.clone(), proposed)
        })
        .collect()
}
