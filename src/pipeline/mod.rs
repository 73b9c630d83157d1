//! The drawing extraction pipeline.
//!
//! ```text
//! PageContent (fragments from the external PDF reader)
//!     ↓
//! [TextClusterer] (fragments → TextElement[])
//!     ↓
//! [MarkerDetector] ──→ MarkerMap        (per page, in parallel)
//! [TitleBlockParser] → DrawingInfo
//!     ↓
//! [ResponseAggregator] (indexed merge, ascending page index)
//!     ↓
//! DrawingExtraction
//! ```
//!
//! Pages are independent, so they fan out across a rayon parallel iterator;
//! each worker reads only its own page's fragments and writes only its own
//! [`PageOutcome`]. The aggregator is the single synchronization point and
//! merges by page index, never by completion order.

pub mod aggregator;

pub use aggregator::{
    DrawingExtraction, PageElements, PageOutcome, ResponseAggregator, Summary,
};

use log::{debug, warn};
use rayon::prelude::*;

use crate::config::{ExtractionConfig, TitleBlockPolicy};
use crate::error::Result;
use crate::fragment::{PageContent, PageMetadata};
use crate::layout::TextClusterer;
use crate::markers::{MarkerDetector, MarkerMap};
use crate::title_block::TitleBlockParser;

/// The extraction pipeline — orchestrates the full per-document flow.
///
/// Construction validates every tunable, so a configuration error fails the
/// whole extraction before any page is touched; [`extract`](Self::extract)
/// itself is infallible (malformed pages are flagged, not fatal).
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    clusterer: TextClusterer,
    detector: MarkerDetector,
    title_block: TitleBlockParser,
}

impl ExtractionPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clusterer: TextClusterer::new(config.clustering)?,
            detector: MarkerDetector::new(config.detection)?,
            title_block: TitleBlockParser::new(config.title_block)?,
            config,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run the full pipeline over one document.
    ///
    /// All entities live only for the duration of this call; running the
    /// pipeline twice on the same input yields identical results.
    pub fn extract(&self, pages: &[PageContent]) -> DrawingExtraction {
        let outcomes: Vec<PageOutcome> = pages
            .par_iter()
            .enumerate()
            .map(|(position, page)| self.process_page(page, self.scans_title_block(position)))
            .collect();

        let result = ResponseAggregator::aggregate(outcomes);
        debug!(
            "extracted {} pages: {} marker codes, {} text elements",
            result.summary.total_pages,
            result.summary.total_markers,
            result.summary.total_text_elements
        );
        result
    }

    /// Whether the page at this input position feeds title-block parsing.
    fn scans_title_block(&self, position: usize) -> bool {
        match self.config.title_block.policy {
            TitleBlockPolicy::FirstPage => position == 0,
            TitleBlockPolicy::MergeAllPages => true,
        }
    }

    fn process_page(&self, page: &PageContent, scan_title_block: bool) -> PageOutcome {
        let mut metadata = PageMetadata::from_page(page);

        if let Err(err) = page.validate() {
            warn!("dropping contribution of page {}: {}", page.index, err);
            metadata.extraction_failed = true;
            return PageOutcome {
                metadata,
                elements: Vec::new(),
                markers: MarkerMap::new(),
                drawing_info: None,
            };
        }

        let mut elements = self.clusterer.cluster_page(&page.fragments);
        let markers = self.detector.detect_page(&mut elements);
        let drawing_info =
            scan_title_block.then(|| self.title_block.parse_page(&elements, &metadata));

        PageOutcome {
            metadata,
            elements,
            markers,
            drawing_info,
        }
    }
}

/// Convenience entry point: build a pipeline and extract in one call.
pub fn extract_drawing(
    pages: &[PageContent],
    config: ExtractionConfig,
) -> Result<DrawingExtraction> {
    Ok(ExtractionPipeline::with_config(config)?.extract(pages))
}
