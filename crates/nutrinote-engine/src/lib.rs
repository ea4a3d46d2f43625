pub mod decorate;
pub mod grammar;
pub mod markup;
pub mod nutrients;
pub mod provider;
pub mod suggest;
pub mod totals;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use decorate::*;
pub use grammar::{Grammar, GrammarError, TagConfig, TagRole, unit_multiplier};
pub use markup::{Entry, InlineEntry, LinkedEntry, normalize_link_name, scan_entries};
pub use nutrients::*;
pub use provider::*;
pub use suggest::*;
pub use totals::*;
