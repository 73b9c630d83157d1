//! Marker pattern table.
//!
//! The pattern set is a closed set of variants evaluated in a fixed priority
//! order — first match wins per element. A text matches only when the ENTIRE
//! trimmed string satisfies the pattern; substring hits inside longer notes
//! are rejected so drawing prose is never flagged as a marker.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_PREFIXED: Regex = Regex::new(r"^[A-Z]{1,4}[0-9]{1,3}[a-z]?$").unwrap();
    static ref RE_HYPHENATED: Regex = Regex::new(r"^[A-Z]{1,2}-[0-9]{1,3}$").unwrap();
    static ref RE_LETTER_INDEX: Regex = Regex::new(r"^[A-Z][0-9]{1,3}[A-Z]?$").unwrap();
}

/// Discipline codes recognized without a numeric suffix, whole token only.
const BARE_DISCIPLINE_CODES: [&str; 7] = ["SC", "BP", "RW", "FB", "C", "B", "W"];

/// One marker pattern variant.
///
/// Kept as a plain enum rather than trait objects so the priority order
/// stays explicit and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPattern {
    /// 1-4 uppercase letters, 1-3 digits, optional single lowercase suffix
    /// (BP1, RW3a)
    PrefixedIndex,
    /// 1-2 uppercase letters, a hyphen, 1-3 digits (C-1, B-12)
    HyphenatedIndex,
    /// Single uppercase letter, 1-3 digits, optional trailing uppercase
    /// letter (A1, C3A)
    LetterIndex,
    /// Closed set of bare discipline codes, matched as a whole token
    /// (SC, BP, RW, FB, C, B, W)
    BareDiscipline,
}

impl MarkerPattern {
    /// All patterns in evaluation priority order.
    pub const PRIORITY: [MarkerPattern; 4] = [
        MarkerPattern::PrefixedIndex,
        MarkerPattern::HyphenatedIndex,
        MarkerPattern::LetterIndex,
        MarkerPattern::BareDiscipline,
    ];

    /// Whether the entire (already trimmed) text satisfies this pattern.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            MarkerPattern::PrefixedIndex => RE_PREFIXED.is_match(text),
            MarkerPattern::HyphenatedIndex => RE_HYPHENATED.is_match(text),
            MarkerPattern::LetterIndex => RE_LETTER_INDEX.is_match(text),
            MarkerPattern::BareDiscipline => BARE_DISCIPLINE_CODES.contains(&text),
        }
    }
}

/// Classify a text against the pattern table.
///
/// Returns the matching pattern and the normalized marker code (upper-cased,
/// whitespace-stripped), or `None` when no pattern matches the whole text.
pub fn classify_marker(text: &str) -> Option<(MarkerPattern, String)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let pattern = MarkerPattern::PRIORITY
        .into_iter()
        .find(|p| p.is_match(trimmed))?;
    let code: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    Some((pattern, code))
}
