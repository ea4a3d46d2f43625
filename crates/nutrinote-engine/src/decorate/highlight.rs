use serde::Serialize;

use crate::grammar::Grammar;
use crate::markup::{LineMatch, NutrientToken, Span, match_line, nutrient_tokens};
use crate::markup::span::lines_with_offsets;
use crate::nutrients::NutrientKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightKind {
    /// An inline nutrient value.
    Nutrition,
    /// A linked entry's amount and unit.
    Amount,
    /// A calorie value that subtracts: negative food calories or workout
    /// calories.
    NegativeKcal,
}

/// A document range to decorate. Offsets are absolute bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: HighlightKind,
}

impl HighlightRange {
    fn new(span: Span, kind: HighlightKind) -> Self {
        Self {
            start: span.start,
            end: span.end,
            kind,
        }
    }
}

/// Highlight ranges for the first entry on `line`, which starts at
/// `line_start` in its document.
pub fn extract_highlight_ranges(line: &str, line_start: usize, grammar: &Grammar) -> Vec<HighlightRange> {
    let Some(found) = match_line(line, line_start, grammar) else {
        return Vec::new();
    };

    match found {
        LineMatch::Linked { amount, .. } => vec![HighlightRange::new(amount, HighlightKind::Amount)],
        LineMatch::Inline { tag, values, .. } => {
            let is_workout = grammar.tags().is_workout(&tag);
            // values is absolute; slice the line with its local range
            let Some(run) = line.get(values.start - line_start..values.end - line_start) else {
                return Vec::new();
            };
            nutrient_tokens(run)
                .filter_map(|token| {
                    let kind = classify(&token, is_workout)?;
                    let start = values.start + token.local.start;
                    let end = values.start + token.local.end;
                    Some(HighlightRange::new(Span::new(start, end), kind))
                })
                .collect()
        }
    }
}

/// Highlight ranges for every line of `text`.
pub fn extract_document_highlights(text: &str, grammar: &Grammar) -> Vec<HighlightRange> {
    lines_with_offsets(text, 0)
        .flat_map(|(start, line)| extract_highlight_ranges(line, start, grammar))
        .collect()
}

fn classify(token: &NutrientToken<'_>, is_workout: bool) -> Option<HighlightKind> {
    let value = token.value?;
    if token.key != NutrientKey::Calories {
        return Some(HighlightKind::Nutrition);
    }
    let negative = value < 0.0;
    match (negative, is_workout) {
        (true, true) => None,
        (true, false) | (false, true) => Some(HighlightKind::NegativeKcal),
        (false, false) => Some(HighlightKind::Nutrition),
    }
}
