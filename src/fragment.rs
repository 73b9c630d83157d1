//! Input model for the extraction pipeline.
//!
//! The crate does not read PDF bytes itself. An upstream content-stream
//! reader yields, per page, an ordered sequence of [`Fragment`]s — raw
//! positioned text runs, often sub-word pieces — wrapped in a
//! [`PageContent`]. Fragments are immutable once produced by the reader.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Point};

/// One raw positioned text run as emitted by a PDF content-stream reader.
///
/// CAD exports routinely split a single label into several fragments (and
/// sometimes into individual characters); reconstruction is the job of
/// [`TextClusterer`](crate::layout::TextClusterer), not of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// The fragment text, exactly as decoded from the content stream
    pub text: String,
    /// Origin point of the fragment (top-left of its box in reader space)
    pub origin: Point,
    /// Bounding box in page coordinates
    pub bbox: BoundingBox,
    /// Font family name reported by the reader
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Page index (1-based) this fragment belongs to
    pub page: u32,
    /// Rotation of the containing page in degrees (0/90/180/270)
    pub rotation: u16,
}

impl Fragment {
    /// Check the fragment's geometry.
    ///
    /// A fragment is malformed when its origin or bounding box carries
    /// non-finite coordinates, or when the box corners are inverted. Font
    /// size must be a finite positive number since the clusterer scales its
    /// gap thresholds by it.
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() {
            return Err(Error::MalformedFragment {
                page: self.page,
                reason: format!("non-finite origin ({}, {})", self.origin.x, self.origin.y),
            });
        }
        if !self.bbox.is_valid() {
            return Err(Error::MalformedFragment {
                page: self.page,
                reason: format!(
                    "invalid bounding box [{}, {}, {}, {}]",
                    self.bbox.x0, self.bbox.y0, self.bbox.x1, self.bbox.y1
                ),
            });
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::MalformedFragment {
                page: self.page,
                reason: format!("font size {} is not a positive number", self.size),
            });
        }
        Ok(())
    }

    /// Whether the fragment text is empty or whitespace-only.
    ///
    /// Such fragments contribute no information and would corrupt gap
    /// calculations, so the clusterer drops them up front.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One page of reader output: dimensions plus the ordered fragment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page index (1-based)
    pub index: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Page rotation in degrees (0/90/180/270)
    pub rotation: u16,
    /// Fragments in content-stream order
    pub fragments: Vec<Fragment>,
}

impl PageContent {
    /// Validate every fragment on the page, returning the first defect.
    pub fn validate(&self) -> Result<()> {
        for fragment in &self.fragments {
            fragment.validate()?;
        }
        Ok(())
    }
}

/// Per-page metadata echoed into the extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page index (1-based)
    pub page: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Page rotation in degrees (0/90/180/270)
    pub rotation: u16,
    /// True when the page's fragments were malformed and its contribution
    /// was dropped (the page is flagged, never silently omitted)
    pub extraction_failed: bool,
}

impl PageMetadata {
    /// Build the metadata entry for a page, with the failure flag cleared.
    pub fn from_page(page: &PageContent) -> Self {
        Self {
            page: page.index,
            width: page.width,
            height: page.height,
            rotation: page.rotation,
            extraction_failed: false,
        }
    }
}
