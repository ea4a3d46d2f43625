use crate::grammar::TagRole;
use crate::nutrients::NutrientVector;

use super::span::Span;

/// `#tag [[Food]] <amount><unit>`: a reference to a food file plus a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedEntry {
    /// Tag exactly as written.
    pub tag: String,
    pub role: TagRole,
    /// Normalized food name (see [`super::normalize_link_name`]).
    pub name: String,
    pub amount: f64,
    /// Unit as written, e.g. `g` or `cups`.
    pub unit: String,
    /// The whole matched markup.
    pub span: Span,
}

/// `#tag <name> <n><kw> ...`: literal nutrient values for a free-text item.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEntry {
    pub tag: String,
    pub role: TagRole,
    pub name: String,
    /// Values with repeated keywords summed.
    pub values: NutrientVector,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Linked(LinkedEntry),
    Inline(InlineEntry),
}

impl Entry {
    pub fn role(&self) -> TagRole {
        match self {
            Entry::Linked(e) => e.role,
            Entry::Inline(e) => e.role,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Entry::Linked(e) => e.span,
            Entry::Inline(e) => e.span,
        }
    }
}

/// The first entry on a line, as found by the combined highlight pattern.
///
/// Spans are absolute, offset by the line start given to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Linked {
        tag: String,
        full: Span,
        link: Span,
        /// Amount and unit together, e.g. `150g`.
        amount: Span,
    },
    Inline {
        tag: String,
        full: Span,
        name: Span,
        /// The run of `<n><kw>` tokens.
        values: Span,
    },
}

impl LineMatch {
    pub fn tag(&self) -> &str {
        match self {
            LineMatch::Linked { tag, .. } | LineMatch::Inline { tag, .. } => tag,
        }
    }

    pub fn full(&self) -> Span {
        match self {
            LineMatch::Linked { full, .. } | LineMatch::Inline { full, .. } => *full,
        }
    }
}
