//! Construction marker recognition.
//!
//! Markers are short alphanumeric codes referencing structural details
//! ("BP1", "C-1", "RW3a"). This module classifies reconstructed text
//! elements against a fixed-priority pattern table and collects the matches
//! into an ordered code-to-occurrences mapping:
//! - [`MarkerPattern`]: the closed pattern variant set
//! - [`MarkerDetector`]: classification + radius deduplication

pub mod detector;
pub mod patterns;

pub use detector::{MarkerDetector, MarkerMap, MarkerOccurrence};
pub use patterns::{classify_marker, MarkerPattern};
