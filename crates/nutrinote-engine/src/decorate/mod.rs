//! # Decorations
//!
//! Position-accurate output for an editor: highlight ranges over entry
//! values and calorie hints at the end of entry lines. All offsets are
//! absolute byte positions, derived from the offset the caller passes for
//! the start of the text.

pub mod annotate;
pub mod highlight;

pub use annotate::{CalorieAnnotation, extract_inline_calorie_annotations};
pub use highlight::{
    HighlightKind, HighlightRange, extract_document_highlights, extract_highlight_ranges,
};
