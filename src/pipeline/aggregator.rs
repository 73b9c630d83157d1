//! Final result assembly.
//!
//! The aggregator performs no classification of its own — pure composition
//! and counting over per-page outcomes. It is the single synchronization
//! point of the pipeline: workers may finish in any order, the merge is
//! always by ascending page index.

use serde::{Deserialize, Serialize};

use crate::fragment::PageMetadata;
use crate::layout::TextElement;
use crate::markers::MarkerMap;
use crate::title_block::DrawingInfo;

/// Everything one pipeline worker produced for one page.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// Page metadata, with the failure flag already set for dropped pages
    pub metadata: PageMetadata,
    /// Clustered (and kind-tagged) elements, empty for dropped pages
    pub elements: Vec<TextElement>,
    /// Markers detected on this page
    pub markers: MarkerMap,
    /// Title-block fields, present only on pages the policy scanned
    pub drawing_info: Option<DrawingInfo>,
}

/// One page's element breakdown in the final result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElements {
    /// Page index (1-based)
    pub page: u32,
    /// Elements on this page, in reading order
    pub elements: Vec<TextElement>,
}

/// Summary statistics over the whole extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of pages in the document
    pub total_pages: usize,
    /// Number of distinct marker codes
    pub total_markers: usize,
    /// Number of text elements across all pages
    pub total_text_elements: usize,
    /// Sorted list of the distinct marker codes
    pub marker_types: Vec<String>,
}

/// The complete structured result of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingExtraction {
    /// Per-page metadata, ascending page index
    pub metadata: Vec<PageMetadata>,
    /// Per-page element breakdown, ascending page index
    pub pages: Vec<PageElements>,
    /// Marker code to occurrences, values in detection order
    pub markers: MarkerMap,
    /// Every text element in the document, pages in ascending order
    pub all_text_elements: Vec<TextElement>,
    /// Recovered title-block fields
    pub drawing_info: DrawingInfo,
    /// Summary statistics
    pub summary: Summary,
}

/// Combines per-page outcomes into a [`DrawingExtraction`].
pub struct ResponseAggregator;

impl ResponseAggregator {
    /// Merge page outcomes, deterministically, by ascending page index.
    ///
    /// The result is always structurally complete: a document with zero
    /// markers or zero recoverable title-block fields yields empty
    /// collections, never a different shape.
    pub fn aggregate(mut outcomes: Vec<PageOutcome>) -> DrawingExtraction {
        outcomes.sort_by_key(|outcome| outcome.metadata.page);

        let mut metadata = Vec::with_capacity(outcomes.len());
        let mut pages = Vec::with_capacity(outcomes.len());
        let mut markers = MarkerMap::new();
        let mut all_text_elements = Vec::new();
        let mut drawing_info = DrawingInfo::default();

        for outcome in outcomes {
            for (code, occurrences) in outcome.markers {
                markers.entry(code).or_default().extend(occurrences);
            }
            if let Some(info) = outcome.drawing_info {
                drawing_info.fill_missing_from(info);
            }
            pages.push(PageElements {
                page: outcome.metadata.page,
                elements: outcome.elements.clone(),
            });
            all_text_elements.extend(outcome.elements);
            metadata.push(outcome.metadata);
        }

        let mut marker_types: Vec<String> = markers.keys().cloned().collect();
        marker_types.sort();

        let summary = Summary {
            total_pages: metadata.len(),
            total_markers: markers.len(),
            total_text_elements: all_text_elements.len(),
            marker_types,
        };

        DrawingExtraction {
            metadata,
            pages,
            markers,
            all_text_elements,
            drawing_info,
            summary,
        }
    }
}
