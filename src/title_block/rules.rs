//! Field extraction rules for title-block parsing.
//!
//! Title blocks carry no machine-readable field tags, so each field is
//! recovered by an ordered list of independent tagged rules. Every rule
//! inspects the candidate elements on its own and returns an optional match
//! with a confidence score; new template heuristics slot in as new variants
//! without touching existing ones.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::fragment::PageMetadata;
use crate::geometry::Point;
use crate::layout::TextElement;

lazy_static! {
    static ref RE_DWG_INLINE: Regex =
        Regex::new(r"(?i)\b(?:DWG|DRAWING)\s*(?:NUMBER|NUM|NO)?\s*[.:#]?\s*([A-Z0-9][A-Z0-9-]{2,})\b")
            .unwrap();
    static ref RE_DWG_LABEL: Regex =
        Regex::new(r"(?i)^(?:DWG|DRAWING)\s*(?:NUMBER|NUM|NO)?\s*[.:#]?$").unwrap();
    static ref RE_CODE_SHAPE: Regex = Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)+$").unwrap();
    static ref RE_LABELED_VALUE: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9-]{2,}$").unwrap();
    static ref RE_REV_INLINE: Regex =
        Regex::new(r"(?i)\b(?:REVISION|REV)[\s.:]+([A-Z0-9]{1,2})\b").unwrap();
    static ref RE_REV_LABEL: Regex = Regex::new(r"(?i)^(?:REV|REVISION)[.:]?$").unwrap();
    static ref RE_REV_VALUE: Regex = Regex::new(r"^[A-Z0-9]{1,2}$").unwrap();
    static ref RE_SCALE_INLINE: Regex =
        Regex::new(r"(?i)\bSCALE[\s.:]*((?:\d+\s*:\s*\d+)|(?:\d+/\d+))").unwrap();
    static ref RE_SCALE_LABEL: Regex = Regex::new(r"(?i)^SCALE[.:]?$").unwrap();
    static ref RE_RATIO: Regex = Regex::new(r"^(?:\d{1,3}\s*:\s*\d{1,4}|\d+/\d+)$").unwrap();
    static ref RE_DATE_NUMERIC: Regex =
        Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap();
    static ref RE_DATE_MONTH: Regex = Regex::new(
        r"(?i)\b(\d{1,2}\s+(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?,?\s+\d{2,4}|(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?\s+\d{1,2},?\s+\d{2,4})\b"
    )
    .unwrap();
    static ref RE_SHEET: Regex =
        Regex::new(r"(?i)\b(?:SHEET|SHT)\s*(?:NO)?\s*[.:]?\s*(\d+)\s*(?:OF|/)\s*(\d+)\b").unwrap();
}

/// Date formats a numeric title-block date is checked against.
const NUMERIC_DATE_FORMATS: [&str; 8] = [
    "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%m-%d-%Y", "%d/%m/%y", "%m/%d/%y", "%d-%m-%y", "%m-%d-%y",
];

/// A recovered field value with the confidence of the rule that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Recovered field text
    pub value: String,
    /// Rule confidence in (0, 1]
    pub confidence: f32,
}

/// One tagged extraction rule.
///
/// Variants are grouped per field through the `*_RULES` tables below; rule
/// order within a table breaks confidence ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// "DWG NO. S-101" inline, or a "DWG" label with the value in the
    /// nearest neighboring element
    DrawingNumberLabeled,
    /// Hyphenated code of 5+ characters nearest the bottom-right corner
    DrawingNumberShape,
    /// Short token next to a "REV"/"REVISION" label element
    RevisionAdjacent,
    /// "REV A" inline form
    RevisionInline,
    /// "SCALE 1:100" inline, or a "SCALE" label with an adjacent ratio
    ScaleInline,
    /// Bare ratio or fraction token inside the title-block region
    ScaleBareRatio,
    /// Numeric date, confidence raised when chrono can parse it
    DateNumeric,
    /// Month-name date forms
    DateMonthName,
    /// "SHEET 3 OF 12" label form
    SheetLabeled,
}

/// Rules recovering the drawing number, in evaluation order.
pub const DRAWING_NUMBER_RULES: &[FieldRule] =
    &[FieldRule::DrawingNumberLabeled, FieldRule::DrawingNumberShape];
/// Rules recovering the revision, in evaluation order.
pub const REVISION_RULES: &[FieldRule] = &[FieldRule::RevisionAdjacent, FieldRule::RevisionInline];
/// Rules recovering the scale, in evaluation order.
pub const SCALE_RULES: &[FieldRule] = &[FieldRule::ScaleInline, FieldRule::ScaleBareRatio];
/// Rules recovering the date, in evaluation order.
pub const DATE_RULES: &[FieldRule] = &[FieldRule::DateNumeric, FieldRule::DateMonthName];
/// Rules recovering the sheet index, in evaluation order.
pub const SHEET_RULES: &[FieldRule] = &[FieldRule::SheetLabeled];

impl FieldRule {
    /// Evaluate this rule over the title-block candidate elements.
    pub fn evaluate(&self, candidates: &[&TextElement], page: &PageMetadata) -> Option<FieldMatch> {
        match self {
            FieldRule::DrawingNumberLabeled => drawing_number_labeled(candidates),
            FieldRule::DrawingNumberShape => drawing_number_shape(candidates, page),
            FieldRule::RevisionAdjacent => revision_adjacent(candidates),
            FieldRule::RevisionInline => capture(candidates, &RE_REV_INLINE, 0.8),
            FieldRule::ScaleInline => scale_inline(candidates),
            FieldRule::ScaleBareRatio => scale_bare_ratio(candidates),
            FieldRule::DateNumeric => date_numeric(candidates),
            FieldRule::DateMonthName => capture(candidates, &RE_DATE_MONTH, 0.7),
            FieldRule::SheetLabeled => sheet_labeled(candidates),
        }
    }
}

/// First capture of `re` across candidates, in element order.
fn capture(candidates: &[&TextElement], re: &Regex, confidence: f32) -> Option<FieldMatch> {
    candidates.iter().find_map(|element| {
        re.captures(&element.text).map(|caps| FieldMatch {
            value: caps[1].to_uppercase(),
            confidence,
        })
    })
}

fn drawing_number_labeled(candidates: &[&TextElement]) -> Option<FieldMatch> {
    if let Some(found) = capture(candidates, &RE_DWG_INLINE, 0.9) {
        // Guards against the label's own words ("NUMBER") being captured
        // as the value: real drawing numbers carry digits.
        if contains_digit(&found.value) {
            return Some(found);
        }
    }
    // Label and value split across elements, as CAD title blocks usually
    // render them.
    candidates
        .iter()
        .filter(|element| RE_DWG_LABEL.is_match(element.text.trim()))
        .find_map(|label| {
            nearest_value(label, candidates, |text| {
                RE_LABELED_VALUE.is_match(text) && contains_digit(text)
            })
            .map(|value| FieldMatch {
                value: value.text.trim().to_uppercase(),
                confidence: 0.9,
            })
        })
}

fn contains_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

fn drawing_number_shape(candidates: &[&TextElement], page: &PageMetadata) -> Option<FieldMatch> {
    let corner = Point::new(page.width, page.height);
    candidates
        .iter()
        .filter(|element| {
            let text = element.text.trim();
            text.len() >= 5 && RE_CODE_SHAPE.is_match(text) && contains_digit(text)
        })
        .min_by(|a, b| {
            crate::utils::safe_float_cmp(
                a.bbox.center().distance_to(&corner),
                b.bbox.center().distance_to(&corner),
            )
        })
        .map(|element| FieldMatch {
            value: element.text.trim().to_string(),
            confidence: 0.6,
        })
}

fn revision_adjacent(candidates: &[&TextElement]) -> Option<FieldMatch> {
    candidates
        .iter()
        .filter(|element| RE_REV_LABEL.is_match(element.text.trim()))
        .find_map(|label| {
            nearest_value(label, candidates, |text| RE_REV_VALUE.is_match(text)).map(|value| {
                FieldMatch {
                    value: value.text.trim().to_string(),
                    confidence: 0.9,
                }
            })
        })
}

fn scale_inline(candidates: &[&TextElement]) -> Option<FieldMatch> {
    if let Some(mut found) = capture(candidates, &RE_SCALE_INLINE, 0.9) {
        found.value.retain(|c| !c.is_whitespace());
        return Some(found);
    }
    candidates
        .iter()
        .filter(|element| RE_SCALE_LABEL.is_match(element.text.trim()))
        .find_map(|label| {
            nearest_value(label, candidates, |text| RE_RATIO.is_match(text)).map(|value| {
                FieldMatch {
                    value: value.text.trim().replace(' ', ""),
                    confidence: 0.9,
                }
            })
        })
}

fn scale_bare_ratio(candidates: &[&TextElement]) -> Option<FieldMatch> {
    candidates
        .iter()
        .find(|element| RE_RATIO.is_match(element.text.trim()))
        .map(|element| FieldMatch {
            value: element.text.trim().replace(' ', ""),
            confidence: 0.6,
        })
}

fn date_numeric(candidates: &[&TextElement]) -> Option<FieldMatch> {
    candidates.iter().find_map(|element| {
        RE_DATE_NUMERIC.captures(&element.text).map(|caps| {
            let value = caps[1].to_string();
            let parseable = NUMERIC_DATE_FORMATS
                .iter()
                .any(|format| NaiveDate::parse_from_str(&value, format).is_ok());
            FieldMatch {
                value,
                confidence: if parseable { 0.9 } else { 0.5 },
            }
        })
    })
}

fn sheet_labeled(candidates: &[&TextElement]) -> Option<FieldMatch> {
    candidates.iter().find_map(|element| {
        RE_SHEET.captures(&element.text).map(|caps| FieldMatch {
            value: format!("{} OF {}", &caps[1], &caps[2]),
            confidence: 0.9,
        })
    })
}

/// Nearest accepted element to a label, within a font-size-scaled radius.
///
/// Title-block values sit in the cell next to or below their label; anything
/// farther than a few line heights away is some other field's text.
fn nearest_value<'a>(
    label: &TextElement,
    candidates: &[&'a TextElement],
    accept: impl Fn(&str) -> bool,
) -> Option<&'a TextElement> {
    let center = label.bbox.center();
    let max_distance = label.size * 8.0;
    candidates
        .iter()
        .filter(|element| element.origin != label.origin || element.text != label.text)
        .filter(|element| accept(element.text.trim()))
        .map(|element| (element, element.bbox.center().distance_to(&center)))
        .filter(|(_, distance)| *distance <= max_distance)
        .min_by(|(_, a), (_, b)| crate::utils::safe_float_cmp(*a, *b))
        .map(|(element, _)| *element)
}
