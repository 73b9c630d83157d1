//! Reconstructed text elements.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};

/// Classification of a reconstructed text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Ordinary drawing text (notes, labels, dimensions)
    #[default]
    Text,
    /// A construction marker code (BP1, C-1, ...)
    Marker,
}

/// A logical text unit reconstructed from one or more fragments.
///
/// Produced by [`TextClusterer`](crate::layout::TextClusterer) and never
/// mutated afterwards, except that
/// [`MarkerDetector`](crate::markers::MarkerDetector) attaches the
/// [`ElementKind`] tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Reconstructed text (concatenation of constituent fragments)
    pub text: String,
    /// Representative origin: the first (leftmost) constituent's origin
    #[serde(flatten)]
    pub origin: Point,
    /// Union of the constituent bounding boxes
    pub bbox: BoundingBox,
    /// Font family of the dominant (widest) constituent
    pub font: String,
    /// Font size of the dominant constituent, in points
    pub size: f32,
    /// Page index (1-based)
    pub page: u32,
    /// Element classification, assigned after clustering
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Number of fragments merged into this element
    pub fragment_count: usize,
}

impl TextElement {
    /// Whether this element was classified as a construction marker.
    pub fn is_marker(&self) -> bool {
        self.kind == ElementKind::Marker
    }
}
