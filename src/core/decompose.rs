//! Splits a path into directory, stem and extension, then strips the noise
//! that sits in front of the ordinal: boss prefix, parenthetical suffix and
//! module codes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::patterns;

/// Characters dropped from the front of a boss-marked stem (marker + session code).
pub const BOSS_PREFIX_LEN: usize = 11;

/// Per-file pipeline failures. The batch logs these and keeps going.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

/// One path taken apart. `extension` keeps its leading dot (empty when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    pub directory: PathBuf,
    pub stem: String,
    pub extension: String,
    pub cleaned: String,
}

/// Decompose `path` and produce the cleaned stem.
pub fn decompose(path: &Path, remove_brackets: bool) -> Result<Decomposed, NormalizeError> {
    let (directory, stem, extension) = split_path(path)?;
    let cleaned = clean_stem(&stem, remove_brackets);

    Ok(Decomposed {
        directory,
        stem,
        extension,
        cleaned,
    })
}

/// Split into `(directory, stem, extension)` without touching the name.
pub fn split_path(path: &Path) -> Result<(PathBuf, String, String), NormalizeError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| NormalizeError::NoFileName(path.to_path_buf()))?;
    file_name
        .to_str()
        .ok_or_else(|| NormalizeError::NonUtf8Name(path.to_path_buf()))?;

    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

    // file_name is UTF-8, so both halves are too
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    Ok((directory, stem, extension))
}

/// Apply the noise rules in order: boss prefix, brackets, module code.
pub fn clean_stem(stem: &str, remove_brackets: bool) -> String {
    let mut cleaned = if patterns::starts_with_boss_marker(stem) {
        strip_boss_prefix(stem).to_string()
    } else {
        stem.to_string()
    };

    if remove_brackets && patterns::has_parenthetical_suffix(&cleaned) {
        cleaned = patterns::strip_parenthetical_suffix(&cleaned);
    }

    strip_module_code(&cleaned).to_string()
}

/// Drop [`BOSS_PREFIX_LEN`] characters; stems that are too short come back unchanged.
pub fn strip_boss_prefix(stem: &str) -> &str {
    match stem.char_indices().nth(BOSS_PREFIX_LEN) {
        Some((offset, _)) => &stem[offset..],
        None if stem.chars().count() == BOSS_PREFIX_LEN => "",
        None => {
            debug!(stem, "boss-marked stem shorter than prefix, left as is");
            stem
        }
    }
}

/// Remove a module code sitting at position 0 of the stem.
pub fn strip_module_code(stem: &str) -> &str {
    // Both patterns match ASCII digits, so byte offsets 2 and 3 are char boundaries.
    if patterns::find_four_digit_module_code(stem) == Some(0) {
        &stem[2..]
    } else if patterns::find_separated_module_code(stem) == Some(0) {
        &stem[3..]
    } else {
        stem
    }
}
