//! Marker detection over clustered text elements.
//!
//! Detection runs on clustered elements, never raw fragments — a split
//! marker ("B" + "P1") would otherwise be missed or misfired.

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::DetectionConfig;
use crate::error::Result;
use crate::geometry::{BoundingBox, Point};
use crate::layout::{ElementKind, TextElement};
use crate::markers::patterns::classify_marker;

/// One detected marker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOccurrence {
    /// X coordinate of the originating element's origin
    pub x: f32,
    /// Y coordinate of the originating element's origin
    pub y: f32,
    /// Page index (1-based)
    pub page: u32,
    /// Bounding box of the originating element, for traceability
    pub bbox: BoundingBox,
}

/// Mapping from normalized marker code to its occurrences.
///
/// Values keep insertion order (detection order: top-to-bottom,
/// left-to-right per page, pages ascending). The key order is an
/// implementation detail callers must not depend on.
pub type MarkerMap = IndexMap<String, Vec<MarkerOccurrence>>;

/// Classifies text elements against the marker pattern table and collects
/// deduplicated occurrences per code.
pub struct MarkerDetector {
    config: DetectionConfig,
}

impl MarkerDetector {
    /// Create a detector, failing fast on invalid tunables.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Detect markers among one page's elements, in element order.
    ///
    /// Matching elements get their kind switched to [`ElementKind::Marker`].
    /// Two occurrences of the same code on the same page whose origins lie
    /// within the dedup radius collapse into one (first seen wins); the
    /// later element still carries the marker kind, it just contributes no
    /// new occurrence.
    pub fn detect_page(&self, elements: &mut [TextElement]) -> MarkerMap {
        let mut markers = MarkerMap::new();

        for element in elements.iter_mut() {
            let Some((pattern, code)) = classify_marker(&element.text) else {
                continue;
            };
            trace!(
                "page {}: '{}' matched {:?} as {}",
                element.page,
                element.text,
                pattern,
                code
            );
            element.kind = ElementKind::Marker;

            let occurrence = MarkerOccurrence {
                x: element.origin.x,
                y: element.origin.y,
                page: element.page,
                bbox: element.bbox,
            };
            let occurrences = markers.entry(code).or_default();
            if !self.is_duplicate(occurrences, &occurrence) {
                occurrences.push(occurrence);
            }
        }

        markers
    }

    fn is_duplicate(&self, occurrences: &[MarkerOccurrence], candidate: &MarkerOccurrence) -> bool {
        occurrences.iter().any(|existing| {
            existing.page == candidate.page
                && Point::new(existing.x, existing.y)
                    .distance_to(&Point::new(candidate.x, candidate.y))
                    < self.config.dedup_radius
        })
    }
}
