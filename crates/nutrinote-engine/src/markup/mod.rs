//! # Entry Recognition
//!
//! Finds food and workout markup in note text.
//!
//! ## Forms
//!
//! - **Linked**: `#food [[Bread]] 150g` or `#food [Bread](Bread.md)150g`.
//!   The amount must directly follow the reference, separated only by
//!   whitespace.
//! - **Inline**: `#food Apple 95kcal 0.3fat`. A free-text name followed by
//!   a contiguous run of `<number><keyword>` tokens. A `[[` anywhere before
//!   the run disqualifies the line.
//!
//! ## Access Modes
//!
//! - [`match_line`]: at most one entry per line, either form, with spans
//!   for highlighting.
//! - [`scan_entries`]: every line of a document, first linked match and
//!   first inline match per line, for aggregation.

pub mod entry;
pub mod link;
pub mod scan;
pub mod span;

pub use entry::{Entry, InlineEntry, LineMatch, LinkedEntry};
pub use link::normalize_link_name;
pub use scan::{NutrientToken, match_line, nutrient_tokens, parse_nutrient_values, scan_entries};
pub use span::Span;
