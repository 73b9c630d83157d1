//! # Drawing Oxide
//!
//! Structured data extraction from engineering/construction drawing PDFs:
//! positioned text, construction markers, and title-block metadata for
//! downstream quantity-takeoff tools.
//!
//! ## What it does
//!
//! An external PDF content reader yields, per page, an ordered sequence of
//! positioned text fragments. This crate turns that raw stream into
//! queryable structure:
//!
//! - **Text reconstruction**: CAD exports split labels into fragments
//!   (sometimes individual characters); [`layout::TextClusterer`] merges
//!   them back into logical elements.
//! - **Marker recognition**: [`markers::MarkerDetector`] classifies elements
//!   against a fixed-priority pattern table ("BP1", "C-1", "RW3a", bare
//!   discipline codes) and groups deduplicated occurrences by code.
//! - **Title-block parsing**: [`title_block::TitleBlockParser`] recovers
//!   drawing number, revision, scale, date, and sheet index from the
//!   title-block region with confidence-scored rules.
//!
//! PDF byte decoding, font interpretation, raster extraction, and network
//! transport are out of scope — the reader upstream and the service layer
//! downstream own those.
//!
//! ## Quick Start
//!
//! ```
//! use drawing_oxide::fragment::{Fragment, PageContent};
//! use drawing_oxide::geometry::{BoundingBox, Point};
//! use drawing_oxide::pipeline::ExtractionPipeline;
//!
//! # fn main() -> drawing_oxide::Result<()> {
//! let page = PageContent {
//!     index: 1,
//!     width: 1190.0,
//!     height: 842.0,
//!     rotation: 0,
//!     fragments: vec![Fragment {
//!         text: "BP1".to_string(),
//!         origin: Point::new(300.0, 400.0),
//!         bbox: BoundingBox::new(300.0, 400.0, 318.0, 410.0),
//!         font: "Arial".to_string(),
//!         size: 10.0,
//!         page: 1,
//!         rotation: 0,
//!     }],
//! };
//!
//! let pipeline = ExtractionPipeline::new()?;
//! let result = pipeline.extract(&[page]);
//! assert_eq!(result.summary.total_markers, 1);
//! assert!(result.markers.contains_key("BP1"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input model
pub mod fragment;
pub mod geometry;

// Text reconstruction
pub mod layout;

// Marker recognition
pub mod markers;

// Title-block parsing
pub mod title_block;

// Pipeline orchestration and aggregation
pub mod pipeline;

// Re-exports
pub use config::ExtractionConfig;
pub use error::{Error, Result};
pub use fragment::{Fragment, PageContent, PageMetadata};
pub use layout::{ElementKind, TextElement};
pub use markers::{MarkerMap, MarkerOccurrence};
pub use pipeline::{extract_drawing, DrawingExtraction, ExtractionPipeline, Summary};
pub use title_block::DrawingInfo;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting operations never panic on NaN.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap(),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
