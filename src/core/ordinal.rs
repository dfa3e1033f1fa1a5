//! Ordinal inference and canonical padding.
//!
//! The normalizer is the only stateful stage of the pipeline. Its state lives
//! in [`NormalizationContext`], created once per run and threaded through every
//! call in file-list order:
//!
//! - the first file of each folder decides whether the run switches to
//!   *continuous* numbering (its leading number is greater than 1);
//! - once continuous numbering is on it stays on for the rest of the run,
//!   including later, unrelated folders;
//! - in continuous mode the ordinal is the file's 1-based position in its
//!   folder, and a decimal sub-ordinal `N.M` becomes `(position - 1).M`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::compose::ItemStyle;
use super::patterns::first_alpha_index;

/// Minimum width of the integer part of a rendered ordinal.
pub const ORDINAL_WIDTH: usize = 2;

/// Run-scoped state carried across every file of a batch.
#[derive(Debug, Clone)]
pub struct NormalizationContext {
    style: ItemStyle,
    continuous: bool,
    current_folder: Option<PathBuf>,
    folder_index: usize,
}

impl NormalizationContext {
    pub fn new(style: ItemStyle) -> Self {
        Self {
            style,
            continuous: false,
            current_folder: None,
            folder_index: 0,
        }
    }

    pub fn style(&self) -> ItemStyle {
        self.style
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn folder_index(&self) -> usize {
        self.folder_index
    }

    /// Register the next file living in `folder` and return its 1-based
    /// position within that folder. A different folder resets the counter.
    pub fn enter(&mut self, folder: &Path) -> usize {
        if self.current_folder.as_deref() != Some(folder) {
            debug!(folder = %folder.display(), "entering folder");
            self.current_folder = Some(folder.to_path_buf());
            self.folder_index = 0;
        }
        self.folder_index += 1;
        self.folder_index
    }
}

/// A canonical ordinal prefix and the title that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordinal {
    pub prefix: String,
    pub title: String,
}

/// Derive the canonical prefix for `cleaned`, the file at `folder_index`.
pub fn normalize(cleaned: &str, folder_index: usize, ctx: &mut NormalizationContext) -> Ordinal {
    let (raw, title) = cleaned.split_at(first_alpha_index(cleaned));
    let title = title.trim_end().to_string();

    let stripped = strip_noise(raw.trim_end());
    let stripped = stripped.trim_start_matches('0');

    if folder_index == 1 && !ctx.continuous && starts_above_one(stripped) {
        debug!(prefix = stripped, "first file numbered above 1, switching to continuous numbering");
        ctx.continuous = true;
    }

    let prefix = if ctx.continuous {
        renumber(stripped, folder_index)
    } else {
        stripped.to_string()
    };

    Ordinal {
        prefix: pad(&prefix),
        title,
    }
}

/// Drop whitespace, hyphens and underscores, then one trailing period.
pub fn strip_noise(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();
    if out.ends_with('.') {
        out.pop();
    }
    out
}

/// Anything that does not parse as a 32-bit integer counts as "not above one".
fn starts_above_one(prefix: &str) -> bool {
    prefix.parse::<i32>().is_ok_and(|n| n > 1)
}

fn renumber(prefix: &str, folder_index: usize) -> String {
    match prefix.split_once('.') {
        Some((_, sub)) => format!("{}.{sub}", folder_index.saturating_sub(1)),
        None => folder_index.to_string(),
    }
}

/// Left-pad the integer part to [`ORDINAL_WIDTH`]; a sub-ordinal is kept verbatim.
pub fn pad(prefix: &str) -> String {
    match prefix.split_once('.') {
        Some((int, sub)) => format!("{int:0>width$}.{sub}", width = ORDINAL_WIDTH),
        None => format!("{prefix:0>width$}", width = ORDINAL_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ctx() -> NormalizationContext {
        NormalizationContext::new(ItemStyle::Media)
    }

    fn continuous_ctx() -> NormalizationContext {
        let mut c = ctx();
        c.continuous = true;
        c
    }

    #[test]
    fn oversized_first_number_does_not_switch_mode() {
        let mut c = ctx();
        let o = normalize("99999999999 Long", 1, &mut c);
        assert!(!c.is_continuous());
        assert_eq!(o.prefix, "99999999999");

        let mut c = ctx();
        normalize("2147483647 Max", 1, &mut c);
        assert!(c.is_continuous());
    }

    #[test]
    fn first_file_above_one_turns_on_continuous() {
        let mut c = ctx();
        let o = normalize("3 Intro", 1, &mut c);
        assert!(c.is_continuous());
        assert_eq!(o.prefix, "01");
        assert_eq!(o.title, "Intro");

        let o = normalize("7 Outro", 2, &mut c);
        assert_eq!(o.prefix, "02");
    }

    #[test]
    fn as_found_numbering_keeps_the_number() {
        let mut c = ctx();
        assert_eq!(normalize("1 Opener", 1, &mut c).prefix, "01");
        assert_eq!(normalize("12 Song", 2, &mut c).prefix, "12");
        assert_eq!(normalize("007 Bond", 3, &mut c).prefix, "07");
        assert_eq!(normalize("123 Long", 4, &mut c).prefix, "123");
        assert!(!c.is_continuous());
    }

    #[test]
    fn later_files_never_switch_mode() {
        let mut c = ctx();
        normalize("01 First", 1, &mut c);
        normalize("9 Ninth", 2, &mut c);
        assert!(!c.is_continuous());
    }

    #[test]
    fn continuous_is_sticky_across_folders() {
        let mut c = ctx();
        assert_eq!(c.enter(Path::new("/a")), 1);
        normalize("5 Five", 1, &mut c);
        assert!(c.is_continuous());

        assert_eq!(c.enter(Path::new("/b")), 1);
        normalize("01 One", 1, &mut c);
        assert!(c.is_continuous());
        assert_eq!(normalize("14 Fourteen", 2, &mut c).prefix, "02");
    }

    #[test]
    fn sub_ordinals() {
        let mut c = ctx();
        assert_eq!(normalize("3.2 Part", 1, &mut c).prefix, "03.2");
        assert!(!c.is_continuous(), "3.2 does not parse as an integer");

        let mut c = continuous_ctx();
        assert_eq!(normalize("3.2 Part", 4, &mut c).prefix, "03.2");
        assert_eq!(normalize("1.10 Part", 1, &mut c).prefix, "00.10");
    }

    #[test]
    fn noise_is_stripped_from_prefix() {
        assert_eq!(strip_noise("0 1 - "), "01");
        assert_eq!(strip_noise("01."), "01");
        assert_eq!(strip_noise("1_2"), "12");
        assert_eq!(strip_noise(""), "");

        let mut c = ctx();
        let o = normalize("01. Chapter One", 1, &mut c);
        assert_eq!(o.prefix, "01");
        assert_eq!(o.title, "Chapter One");
    }

    #[test]
    fn no_alpha_means_empty_title() {
        let mut c = ctx();
        let o = normalize("0101 ", 2, &mut c);
        assert_eq!(o.prefix, "101");
        assert_eq!(o.title, "");
    }

    #[test]
    fn empty_prefix_pads_to_zeroes() {
        assert_eq!(pad(""), "00");
        assert_eq!(pad(".5"), "00.5");
        assert_eq!(pad("4"), "04");
        assert_eq!(pad("4.1"), "04.1");
        assert_eq!(pad("1234"), "1234");
    }

    #[test]
    fn folder_counter_resets() {
        let mut c = ctx();
        assert_eq!(c.enter(Path::new("a")), 1);
        assert_eq!(c.enter(Path::new("a")), 2);
        assert_eq!(c.enter(Path::new("b")), 1);
        assert_eq!(c.current_folder.as_deref(), Some(Path::new("b")));
        assert_eq!(c.folder_index(), 1);
    }

    proptest! {
        #[test]
        fn padded_width_is_at_least_two(n in 0u32..100_000) {
            let s = n.to_string();
            let p = pad(&s);
            prop_assert!(p.len() >= ORDINAL_WIDTH);
            prop_assert!(p.ends_with(&s) || s == "0");
        }

        #[test]
        fn continuous_prefix_is_folder_position(k in 1usize..500, n in 2u32..1000) {
            let mut c = continuous_ctx();
            let o = normalize(&format!("{n} Title"), k, &mut c);
            prop_assert_eq!(o.prefix.parse::<usize>().unwrap(), k);
        }

        #[test]
        fn as_found_prefix_matches_leading_number(n in 1u32..10_000) {
            let mut c = ctx();
            let o = normalize(&format!("{n:04} Title"), 2, &mut c);
            prop_assert_eq!(o.prefix, pad(&n.to_string()));
        }
    }
}
