//! Reassembles a target path from the normalized pieces.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Separator and suffix policy for a whole run.
///
/// The names follow the tool's history: `Document` is selected when the run
/// contains a video container (`.mp4` by default). Treat the variants as two
/// composition styles rather than a statement about the file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStyle {
    /// `NN - Title.ext`
    #[default]
    Media,
    /// `NN-Title.ext`, with a trailing `.zip` dropped from the title
    Document,
}

impl ItemStyle {
    pub fn separator(self) -> &'static str {
        match self {
            ItemStyle::Media => " - ",
            ItemStyle::Document => "-",
        }
    }
}

impl fmt::Display for ItemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStyle::Media => f.write_str("media"),
            ItemStyle::Document => f.write_str("document"),
        }
    }
}

/// Build the file name `prefix + separator + title + extension`.
pub fn compose_name(prefix: &str, title: &str, extension: &str, style: ItemStyle) -> String {
    let title = match style {
        ItemStyle::Document => title.strip_suffix(".zip").unwrap_or(title),
        ItemStyle::Media => title,
    };

    format!("{prefix}{}{title}{extension}", style.separator())
}

/// [`compose_name`] joined onto `directory`.
pub fn compose(
    directory: &Path,
    prefix: &str,
    title: &str,
    extension: &str,
    style: ItemStyle,
) -> PathBuf {
    directory.join(compose_name(prefix, title, extension, style))
}
