//! Error types for the drawing extraction library.
//!
//! This module defines all error types that can occur while running the
//! extraction pipeline.

/// Result type alias for drawing extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during drawing extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid tunable parameter (non-positive tolerance, empty region, ...).
    ///
    /// Configuration errors are fatal: they are reported before any page is
    /// processed and fail the whole extraction.
    #[error("Invalid configuration: {parameter}: {reason}")]
    Configuration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A fragment on the given page carries unusable geometry.
    ///
    /// Raised for non-finite coordinates or an inverted bounding box. The
    /// owning page's contribution is dropped and the page is flagged as
    /// failed in the result metadata; sibling pages are unaffected.
    #[error("Malformed fragment on page {page}: {reason}")]
    MalformedFragment {
        /// Page index (1-based) the fragment belongs to
        page: u32,
        /// Description of the geometry defect
        reason: String,
    },
}
