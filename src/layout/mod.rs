//! Text reconstruction for fragmented CAD exports.
//!
//! CAD/PDF export chains routinely split one logical label into several
//! positioned fragments ("B" + "P1"). This module reassembles them:
//! - [`TextElement`]: a reconstructed logical text unit
//! - [`TextClusterer`]: the per-page fragment-to-element merge

pub mod clusterer;
pub mod text_element;

pub use clusterer::TextClusterer;
pub use text_element::{ElementKind, TextElement};
