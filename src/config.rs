//! Unified configuration for the extraction pipeline.
//!
//! All tunables live here, grouped per stage. Every parameter is validated
//! once, before any page is processed; a bad value fails the whole
//! extraction with [`Error::Configuration`](crate::error::Error).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for text clustering.
///
/// The gap thresholds are expressed in font-size units rather than absolute
/// points: CAD exports use the working font size as the natural word-spacing
/// unit, so a gap of `0.5` means "half the font size".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Vertical tolerance in points for two fragments to share a baseline
    /// band (same text line). Default: 2.0.
    pub baseline_tolerance: f32,
    /// Maximum horizontal gap, in font-size units, for two fragments to be
    /// merged into one element. Default: 0.6.
    pub merge_gap: f32,
    /// Horizontal gap, in font-size units, above which a single space is
    /// inserted between merged fragments (separating "split word" from
    /// "separate words on one line"). Default: 0.25.
    pub space_gap: f32,
    /// Maximum font-size difference in points for two fragments to be
    /// considered the same run. Default: 0.5.
    pub font_size_tolerance: f32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            baseline_tolerance: 2.0,
            merge_gap: 0.6,
            space_gap: 0.25,
            font_size_tolerance: 0.5,
        }
    }
}

impl ClusteringConfig {
    /// Validate the clustering tunables.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("baseline_tolerance", self.baseline_tolerance)?;
        ensure_positive("merge_gap", self.merge_gap)?;
        ensure_positive("space_gap", self.space_gap)?;
        if !self.font_size_tolerance.is_finite() || self.font_size_tolerance < 0.0 {
            return Err(Error::Configuration {
                parameter: "font_size_tolerance",
                reason: format!("must be non-negative, got {}", self.font_size_tolerance),
            });
        }
        Ok(())
    }
}

/// Tunables for marker detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Radius in points within which two occurrences of the same code on the
    /// same page collapse into one (absorbs duplicate renderings such as
    /// overlapping leader-line labels). Default: 3.0.
    pub dedup_radius: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { dedup_radius: 3.0 }
    }
}

impl DetectionConfig {
    /// Validate the detection tunables.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("dedup_radius", self.dedup_radius)
    }
}

/// Fractional page region searched for title-block fields.
///
/// Expressed as fractions of the page dimensions so one configuration works
/// across sheet sizes. The default covers the bottom band of the sheet,
/// where title blocks conventionally sit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitleBlockRegion {
    /// Left edge as a fraction of page width
    pub x0: f32,
    /// Top edge as a fraction of page height
    pub y0: f32,
    /// Right edge as a fraction of page width
    pub x1: f32,
    /// Bottom edge as a fraction of page height
    pub y1: f32,
}

impl Default for TitleBlockRegion {
    fn default() -> Self {
        // Lower 35% of the sheet, full width.
        Self {
            x0: 0.0,
            y0: 0.65,
            x1: 1.0,
            y1: 1.0,
        }
    }
}

impl TitleBlockRegion {
    /// Validate the region fractions.
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !(in_unit(self.x0) && in_unit(self.y0) && in_unit(self.x1) && in_unit(self.y1)) {
            return Err(Error::Configuration {
                parameter: "title_block.region",
                reason: "fractions must lie in [0, 1]".to_string(),
            });
        }
        if self.x0 >= self.x1 || self.y0 >= self.y1 {
            return Err(Error::Configuration {
                parameter: "title_block.region",
                reason: "region must have positive extent".to_string(),
            });
        }
        Ok(())
    }
}

/// Which pages contribute title-block fields to the document-level result.
///
/// Multi-sheet sets do not always share one title block, so the aggregation
/// policy is a configuration choice; per-page extraction is available as a
/// building block either way via
/// [`TitleBlockParser::parse_page`](crate::title_block::TitleBlockParser::parse_page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TitleBlockPolicy {
    /// Scan only the first page (drawing metadata assumed document-global).
    #[default]
    FirstPage,
    /// Scan every page; the first recovered value per field in ascending
    /// page order wins.
    MergeAllPages,
}

/// Tunables for title-block parsing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TitleBlockConfig {
    /// Page region searched for fields
    pub region: TitleBlockRegion,
    /// Aggregation policy across pages
    pub policy: TitleBlockPolicy,
}

impl TitleBlockConfig {
    /// Validate the title-block tunables.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()
    }
}

/// Top-level configuration for [`ExtractionPipeline`](crate::pipeline::ExtractionPipeline).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Text clustering tunables
    pub clustering: ClusteringConfig,
    /// Marker detection tunables
    pub detection: DetectionConfig,
    /// Title-block parsing tunables
    pub title_block: TitleBlockConfig,
}

impl ExtractionConfig {
    /// Validate every tunable, returning the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        self.clustering.validate()?;
        self.detection.validate()?;
        self.title_block.validate()?;
        Ok(())
    }
}

fn ensure_positive(parameter: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Configuration {
            parameter,
            reason: format!("must be positive, got {}", value),
        });
    }
    Ok(())
}
