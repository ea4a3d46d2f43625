use serde::Serialize;

use crate::grammar::{Grammar, unit_multiplier};
use crate::markup::LinkedEntry;
use crate::markup::scan::linked_entry;
use crate::markup::span::lines_with_offsets;
use crate::provider::CalorieProvider;

/// A calorie hint shown at the end of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalorieAnnotation {
    /// Absolute offset of the end of the line holding the entry.
    pub position: usize,
    /// e.g. `29kcal`, or `-300kcal` for a workout.
    pub text: String,
}

impl CalorieAnnotation {
    fn new(position: usize, kcal: f64) -> Self {
        Self {
            position,
            text: format!("{}kcal", kcal as i64),
        }
    }
}

/// Calorie hints for every entry in `text`, which starts at `start_offset`
/// in its document.
///
/// Unlike highlighting, every match on a line produces a hint. Linked
/// entries are priced through `provider`; inline entries use their literal
/// `kcal` value. Workout hints are negated.
pub fn extract_inline_calorie_annotations<P: CalorieProvider + ?Sized>(
    text: &str,
    start_offset: usize,
    grammar: &Grammar,
    provider: &P,
) -> Vec<CalorieAnnotation> {
    let tags = grammar.tags();
    let mut annotations = Vec::new();

    for (line_start, line) in lines_with_offsets(text, start_offset) {
        let line_end = line_start + line.len();

        if let Some(re) = grammar.linked() {
            for caps in re.captures_iter(line) {
                if let Some(entry) = linked_entry(&caps, tags, line_start)
                    && let Some(kcal) = linked_calories(&entry, provider)
                {
                    annotations.push(CalorieAnnotation::new(line_end, entry.role.apply(kcal)));
                }
            }
        }

        if let Some(re) = grammar.inline_calorie() {
            for caps in re.captures_iter(line) {
                let Some(role) = caps.name("tag").and_then(|t| tags.role_of(t.as_str())) else {
                    continue;
                };
                let Some(kcal) = caps
                    .name("kcal")
                    .and_then(|k| k.as_str().parse::<f64>().ok())
                    .map(f64::round)
                    .filter(|k| *k >= 0.0)
                else {
                    continue;
                };
                annotations.push(CalorieAnnotation::new(line_end, role.apply(kcal)));
            }
        }
    }

    annotations
}

/// Rounded calories for a linked entry, or `None` when the food is
/// unknown or the result is not a finite, non-negative number.
fn linked_calories<P: CalorieProvider + ?Sized>(entry: &LinkedEntry, provider: &P) -> Option<f64> {
    let per_basis = provider.calories_for_food(&entry.name)?;
    let serving_size = provider.serving_size(&entry.name);
    let kcal = (per_basis * unit_multiplier(entry.amount, &entry.unit, serving_size)).round();
    (kcal.is_finite() && kcal >= 0.0).then_some(kcal)
}
