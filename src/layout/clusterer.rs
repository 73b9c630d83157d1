//! Greedy baseline-band clustering of text fragments.
//!
//! CAD exports split labels into fragments, sometimes into individual
//! characters. The clusterer reconstructs logical text by sorting fragments
//! into reading order and merging horizontally adjacent runs that share a
//! baseline band and font.

use log::debug;

use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::layout::text_element::{ElementKind, TextElement};
use crate::utils::safe_float_cmp;

/// Merges fragmented text runs into logical [`TextElement`]s.
///
/// Clustering is applied independently per page; elements never merge across
/// pages. Every non-blank input fragment lands in exactly one output element
/// (the clusterer partitions the fragment set — no duplication, no loss).
pub struct TextClusterer {
    config: ClusteringConfig,
}

impl TextClusterer {
    /// Create a clusterer, failing fast on invalid tunables.
    pub fn new(config: ClusteringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Reconstruct the logical text elements of one page.
    ///
    /// Fragments are sorted by vertical band (origin y quantized to the
    /// baseline tolerance) then by x, walked greedily, and merged when they
    /// share a band, sit within the font-size-scaled merge gap, and carry a
    /// compatible font. A single space is inserted where the gap exceeds the
    /// space threshold, distinguishing a split word from separate words on
    /// one line.
    pub fn cluster_page(&self, fragments: &[Fragment]) -> Vec<TextElement> {
        let mut ordered: Vec<&Fragment> = fragments.iter().filter(|f| !f.is_blank()).collect();
        if ordered.is_empty() {
            return Vec::new();
        }

        ordered.sort_by(|a, b| {
            self.band(a.origin.y)
                .cmp(&self.band(b.origin.y))
                .then_with(|| safe_float_cmp(a.origin.x, b.origin.x))
        });

        let mut elements = Vec::new();
        let mut current = ClusterBuilder::start(ordered[0], self.band(ordered[0].origin.y));

        for &fragment in &ordered[1..] {
            let band = self.band(fragment.origin.y);
            if self.joins(&current, fragment, band) {
                let gap = fragment.bbox.x0 - current.bbox_x1();
                current.push(fragment, gap > self.config.space_gap * current.last_size);
            } else {
                elements.push(current.finish());
                current = ClusterBuilder::start(fragment, band);
            }
        }
        elements.push(current.finish());

        debug!(
            "clustered page {}: {} fragments -> {} elements",
            elements[0].page,
            ordered.len(),
            elements.len()
        );
        elements
    }

    /// Quantized baseline band of an origin y-coordinate.
    fn band(&self, y: f32) -> i64 {
        (y / self.config.baseline_tolerance).round() as i64
    }

    fn joins(&self, current: &ClusterBuilder, next: &Fragment, band: i64) -> bool {
        if band != current.band {
            return false;
        }
        let gap = next.bbox.x0 - current.bbox_x1();
        if gap > self.config.merge_gap * current.last_size {
            return false;
        }
        next.font == current.last_font
            && (next.size - current.last_size).abs() <= self.config.font_size_tolerance
    }
}

/// Accumulates one cluster during the greedy walk.
struct ClusterBuilder<'a> {
    first: &'a Fragment,
    text: String,
    bbox: crate::geometry::BoundingBox,
    band: i64,
    last_font: &'a str,
    last_size: f32,
    // dominant constituent: widest bbox, ties to the earliest
    dominant_font: &'a str,
    dominant_size: f32,
    dominant_width: f32,
    fragment_count: usize,
}

impl<'a> ClusterBuilder<'a> {
    fn start(fragment: &'a Fragment, band: i64) -> Self {
        Self {
            first: fragment,
            text: fragment.text.trim().to_string(),
            bbox: fragment.bbox,
            band,
            last_font: &fragment.font,
            last_size: fragment.size,
            dominant_font: &fragment.font,
            dominant_size: fragment.size,
            dominant_width: fragment.bbox.width(),
            fragment_count: 1,
        }
    }

    fn bbox_x1(&self) -> f32 {
        self.bbox.x1
    }

    fn push(&mut self, fragment: &'a Fragment, separate_words: bool) {
        if separate_words {
            self.text.push(' ');
        }
        self.text.push_str(fragment.text.trim());
        self.bbox = self.bbox.union(&fragment.bbox);
        self.last_font = &fragment.font;
        self.last_size = fragment.size;
        if fragment.bbox.width() > self.dominant_width {
            self.dominant_font = &fragment.font;
            self.dominant_size = fragment.size;
            self.dominant_width = fragment.bbox.width();
        }
        self.fragment_count += 1;
    }

    fn finish(self) -> TextElement {
        TextElement {
            text: self.text,
            origin: self.first.origin,
            bbox: self.bbox,
            font: self.dominant_font.to_string(),
            size: self.dominant_size,
            page: self.first.page,
            kind: ElementKind::Text,
            fragment_count: self.fragment_count,
        }
    }
}
