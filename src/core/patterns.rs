//! Stateless filename predicates shared by the classification step and the
//! decomposer. All positions are byte offsets into the input.

use std::sync::LazyLock;

use regex::Regex;

/// Literal marker that flags a "boss" source file (matched case-insensitively).
pub const BOSS_MARKER: &str = "bs";

static LEADING_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]").expect("leading digit regex"));

// Greedy on purpose: spans from the first " (" to the last ")".
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(.*\)").expect("parenthetical regex"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run regex"));

static SEPARATED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}[ _\-.][0-9]{2}").expect("separated code regex"));

/// True when the bare file name starts with an ASCII digit or the boss marker.
pub fn has_leading_digit_or_boss_marker(name: &str) -> bool {
    LEADING_DIGIT.is_match(name) || starts_with_boss_marker(name)
}

/// Case-insensitive check for the boss marker at the start of `name`.
pub fn starts_with_boss_marker(name: &str) -> bool {
    name.get(..BOSS_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(BOSS_MARKER))
}

/// True when `stem` contains a space followed by a parenthesized group.
pub fn has_parenthetical_suffix(stem: &str) -> bool {
    PARENTHETICAL.is_match(stem)
}

/// Remove the first `" (...)"` span from `stem`.
pub fn strip_parenthetical_suffix(stem: &str) -> String {
    PARENTHETICAL.replace(stem, "").into_owned()
}

/// Position of the first run of exactly four ASCII digits.
pub fn find_four_digit_module_code(name: &str) -> Option<usize> {
    DIGIT_RUN
        .find_iter(name)
        .find(|m| m.len() == 4)
        .map(|m| m.start())
}

/// Position of the first `DD<sep>DD` code, `<sep>` being space, `_`, `-` or `.`.
pub fn find_separated_module_code(name: &str) -> Option<usize> {
    SEPARATED_CODE.find(name).map(|m| m.start())
}

/// Byte index of the first alphabetic character, or `stem.len()` if none.
pub fn first_alpha_index(stem: &str) -> usize {
    stem.char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map_or(stem.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_digit_or_marker() {
        assert!(has_leading_digit_or_boss_marker("3 Intro.mp3"));
        assert!(has_leading_digit_or_boss_marker("bs160131d1 08 Out.flac"));
        assert!(has_leading_digit_or_boss_marker("BS160131d1 08 Out.flac"));
        assert!(!has_leading_digit_or_boss_marker("Intro.mp3"));
        assert!(!has_leading_digit_or_boss_marker("b"));
        assert!(!has_leading_digit_or_boss_marker(""));
    }

    #[test]
    fn parenthetical_is_greedy_and_needs_leading_space() {
        assert!(has_parenthetical_suffix("12 Song (Live)"));
        assert!(!has_parenthetical_suffix("12 Song(Live)"));
        assert_eq!(strip_parenthetical_suffix("12 Song (Live)"), "12 Song");
        assert_eq!(strip_parenthetical_suffix("12 Song (Live) (2020)"), "12 Song");
        assert_eq!(strip_parenthetical_suffix("12 Song (Live) Extra"), "12 Song Extra");
    }

    #[test]
    fn four_digit_code_requires_exact_run() {
        assert_eq!(find_four_digit_module_code("0101. Chapter"), Some(0));
        assert_eq!(find_four_digit_module_code("01 Chapter 2020"), Some(11));
        assert_eq!(find_four_digit_module_code("123456 Chapter"), None);
        assert_eq!(find_four_digit_module_code("12 Chapter"), None);
    }

    #[test]
    fn separated_code_accepts_known_separators() {
        for name in ["01 02 Title", "01_02 Title", "01-02 Title", "01.02 Title"] {
            assert_eq!(find_separated_module_code(name), Some(0), "{name}");
        }
        assert_eq!(find_separated_module_code("01+02 Title"), None);
        assert_eq!(find_separated_module_code("Title 01 02"), Some(6));
    }

    #[test]
    fn alpha_boundary() {
        assert_eq!(first_alpha_index("08 Out in the Street"), 3);
        assert_eq!(first_alpha_index("Intro"), 0);
        assert_eq!(first_alpha_index("0123"), 4);
        assert_eq!(first_alpha_index("01 Étude"), 3);
        assert_eq!(first_alpha_index(""), 0);
    }
}
