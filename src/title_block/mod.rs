//! Title-block field recovery.
//!
//! Engineering sheets carry their metadata — drawing number, revision,
//! scale, date, sheet index — in a title block with no machine-readable
//! tags. The parser restricts candidates to a configurable page region and
//! applies the tagged extraction rules of [`rules`], keeping the
//! highest-confidence match per field.

pub mod rules;

pub use rules::{FieldMatch, FieldRule};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::TitleBlockConfig;
use crate::error::Result;
use crate::fragment::PageMetadata;
use crate::geometry::BoundingBox;
use crate::layout::TextElement;
use crate::utils::safe_float_cmp;

lazy_static! {
    static ref RE_SHEET_CANONICAL: Regex = Regex::new(r"^(\d+) OF (\d+)$").unwrap();
}

/// Position of a sheet within its drawing set ("SHEET 3 OF 12").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetIndex {
    /// Sheet number within the set
    pub number: u32,
    /// Total sheets in the set
    pub total: u32,
}

/// Recovered title-block fields. Every field is independently optional;
/// absence means the heuristics found nothing, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingInfo {
    /// Drawing number (e.g. "S-101-A")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_number: Option<String>,
    /// Revision token (e.g. "B")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Scale (e.g. "1:100")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    /// Issue date as drawn (e.g. "12/03/2024")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Sheet position within the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SheetIndex>,
}

impl DrawingInfo {
    /// Whether no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.drawing_number.is_none()
            && self.revision.is_none()
            && self.scale.is_none()
            && self.date.is_none()
            && self.sheet.is_none()
    }

    /// Fill every absent field from `other`, leaving present fields alone.
    ///
    /// Used by the merge-all-pages policy: earlier pages win.
    pub fn fill_missing_from(&mut self, other: DrawingInfo) {
        if self.drawing_number.is_none() {
            self.drawing_number = other.drawing_number;
        }
        if self.revision.is_none() {
            self.revision = other.revision;
        }
        if self.scale.is_none() {
            self.scale = other.scale;
        }
        if self.date.is_none() {
            self.date = other.date;
        }
        if self.sheet.is_none() {
            self.sheet = other.sheet;
        }
    }
}

/// Recovers title-block fields from a page's clustered elements.
pub struct TitleBlockParser {
    config: TitleBlockConfig,
}

impl TitleBlockParser {
    /// Create a parser, failing fast on an invalid region.
    pub fn new(config: TitleBlockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Recover fields from one page.
    ///
    /// This is the per-page building block; which pages feed the
    /// document-level result is decided by
    /// [`TitleBlockPolicy`](crate::config::TitleBlockPolicy) in the
    /// pipeline, not here.
    pub fn parse_page(&self, elements: &[TextElement], page: &PageMetadata) -> DrawingInfo {
        let region = self.absolute_region(page);
        let candidates: Vec<&TextElement> = elements
            .iter()
            .filter(|element| region.contains_point(&element.bbox.center()))
            .collect();
        debug!(
            "title block page {}: {} of {} elements in region",
            page.page,
            candidates.len(),
            elements.len()
        );

        DrawingInfo {
            drawing_number: best_match(rules::DRAWING_NUMBER_RULES, &candidates, page),
            revision: best_match(rules::REVISION_RULES, &candidates, page),
            scale: best_match(rules::SCALE_RULES, &candidates, page),
            date: best_match(rules::DATE_RULES, &candidates, page),
            sheet: best_match(rules::SHEET_RULES, &candidates, page)
                .as_deref()
                .and_then(parse_sheet_canonical),
        }
    }

    fn absolute_region(&self, page: &PageMetadata) -> BoundingBox {
        let region = self.config.region;
        BoundingBox::new(
            region.x0 * page.width,
            region.y0 * page.height,
            region.x1 * page.width,
            region.y1 * page.height,
        )
    }
}

/// Best match across a field's rules: highest confidence wins, ties go to
/// the earlier rule.
fn best_match(
    field_rules: &[FieldRule],
    candidates: &[&TextElement],
    page: &PageMetadata,
) -> Option<String> {
    let mut best: Option<FieldMatch> = None;
    for rule in field_rules {
        if let Some(found) = rule.evaluate(candidates, page) {
            let better = best
                .as_ref()
                .map_or(true, |b| safe_float_cmp(found.confidence, b.confidence).is_gt());
            if better {
                best = Some(found);
            }
        }
    }
    best.map(|found| found.value)
}

fn parse_sheet_canonical(value: &str) -> Option<SheetIndex> {
    let caps = RE_SHEET_CANONICAL.captures(value)?;
    Some(SheetIndex {
        number: caps[1].parse().ok()?,
        total: caps[2].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layout::ElementKind;

    fn element(text: &str, x: f32, y: f32) -> TextElement {
        TextElement {
            text: text.to_string(),
            origin: Point::new(x, y),
            bbox: BoundingBox::new(x, y, x + text.len() as f32 * 6.0, y + 10.0),
            font: "Arial".to_string(),
            size: 10.0,
            page: 1,
            kind: ElementKind::Text,
            fragment_count: 1,
        }
    }

    fn page() -> PageMetadata {
        PageMetadata {
            page: 1,
            width: 1190.0,
            height: 842.0,
            rotation: 0,
            extraction_failed: false,
        }
    }

    fn parser() -> TitleBlockParser {
        TitleBlockParser::new(TitleBlockConfig::default()).unwrap()
    }

    #[test]
    fn test_full_title_block() {
        // Default region: lower 35% of an 842pt page starts at y = 547.3.
        let elements = vec![
            element("DWG NO. S-101", 900.0, 800.0),
            element("REV", 1050.0, 800.0),
            element("B", 1075.0, 800.0),
            element("SCALE 1:100", 800.0, 820.0),
            element("12/03/2024", 700.0, 820.0),
            element("SHEET 3 OF 12", 600.0, 820.0),
        ];
        let info = parser().parse_page(&elements, &page());
        assert_eq!(info.drawing_number.as_deref(), Some("S-101"));
        assert_eq!(info.revision.as_deref(), Some("B"));
        assert_eq!(info.scale.as_deref(), Some("1:100"));
        assert_eq!(info.date.as_deref(), Some("12/03/2024"));
        assert_eq!(info.sheet, Some(SheetIndex { number: 3, total: 12 }));
    }

    #[test]
    fn test_elements_outside_region_ignored() {
        // A perfect ratio token in the drawing area must not leak into the
        // title block.
        let elements = vec![element("1:20", 400.0, 100.0)];
        let info = parser().parse_page(&elements, &page());
        assert!(info.scale.is_none());
        assert!(info.is_empty());
    }

    #[test]
    fn test_absence_is_not_an_error() {
        let info = parser().parse_page(&[], &page());
        assert!(info.is_empty());
    }

    #[test]
    fn test_higher_confidence_rule_wins() {
        // Both the labeled rule (0.9) and the shape rule (0.6) hit; the
        // labeled value must win even though the shape candidate sits
        // closer to the corner.
        let elements = vec![
            element("DWG NO. S-101", 600.0, 780.0),
            element("X-9999-Y", 1120.0, 830.0),
        ];
        let info = parser().parse_page(&elements, &page());
        assert_eq!(info.drawing_number.as_deref(), Some("S-101"));
    }

    #[test]
    fn test_fill_missing_from() {
        let mut first = DrawingInfo {
            drawing_number: Some("S-101".to_string()),
            ..Default::default()
        };
        let second = DrawingInfo {
            drawing_number: Some("S-999".to_string()),
            revision: Some("C".to_string()),
            ..Default::default()
        };
        first.fill_missing_from(second);
        assert_eq!(first.drawing_number.as_deref(), Some("S-101"));
        assert_eq!(first.revision.as_deref(), Some("C"));
    }

    #[test]
    fn test_drawing_info_skips_absent_fields_in_json() {
        let info = DrawingInfo {
            scale: Some("1:50".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({ "scale": "1:50" }));
    }
}
