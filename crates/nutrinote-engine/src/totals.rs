//! # Aggregation
//!
//! Turns the entries of a note into nutrition totals.
//!
//! Linked entries are looked up through a [`NutrientProvider`] and scaled
//! by [`unit_multiplier`]. Inline food entries add their literal values;
//! valid inline workout entries subtract theirs. The combined totals may go
//! negative; `clamped` floors each field at zero and is what goal progress
//! is measured against.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::grammar::{Grammar, GrammarError, TagConfig, TagRole, unit_multiplier};
use crate::markup::{Entry, InlineEntry, LinkedEntry, scan_entries};
use crate::nutrients::{GoalProgress, Goals, NutrientKey, NutrientVector, goal_progress};
use crate::provider::NutrientProvider;

/// Why a linked entry contributed nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IssueKind {
    /// The provider has no data for the name.
    Missing,
    /// The provider failed; the message is its error.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryIssue {
    pub name: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionTotals {
    /// Linked food entries, scaled to their amounts.
    pub linked: NutrientVector,
    /// Inline food entries minus valid inline workout entries.
    pub inline: NutrientVector,
    /// Valid inline workout entries, not negated.
    pub workout: NutrientVector,
    /// `linked + inline`.
    pub combined: NutrientVector,
    /// `combined` with every field floored at zero.
    pub clamped: NutrientVector,
    /// Present only when goals were supplied.
    pub goal_progress: Option<BTreeMap<NutrientKey, GoalProgress>>,
    /// Linked entries skipped because their lookup failed.
    pub issues: Vec<EntryIssue>,
}

/// A workout entry counts only if it has a positive field and no negative
/// field. Otherwise all of its values are dropped.
pub fn is_valid_workout(values: &NutrientVector) -> bool {
    values.has_positive() && values.nutrients().all(|(_, v)| v >= 0.0)
}

/// Computes totals for `content`, or `None` when it holds no entries at all.
pub fn calculate_totals<P: NutrientProvider + ?Sized>(
    content: &str,
    grammar: &Grammar,
    provider: &P,
    goals: Option<&Goals>,
) -> Option<NutritionTotals> {
    let entries = scan_entries(content, grammar);
    if entries.is_empty() {
        return None;
    }

    let mut linked = NutrientVector::new();
    let mut inline = NutrientVector::new();
    let mut workout = NutrientVector::new();
    let mut issues = Vec::new();

    for entry in &entries {
        match entry {
            Entry::Linked(entry) => match linked_contribution(entry, provider) {
                Ok(values) => linked.add(&values),
                Err(issue) => issues.push(issue),
            },
            Entry::Inline(entry) => add_inline(entry, &mut inline, &mut workout),
        }
    }

    let mut combined = linked.clone();
    combined.add(&inline);
    let clamped = combined.clamped();
    let goal_progress = goals.map(|goals| goal_progress(&clamped, goals));

    Some(NutritionTotals {
        linked,
        inline,
        workout,
        combined,
        clamped,
        goal_progress,
        issues,
    })
}

/// Compiles a grammar for `tags` and calls [`calculate_totals`].
pub fn calculate_totals_for_tags<P: NutrientProvider + ?Sized>(
    content: &str,
    tags: &TagConfig,
    provider: &P,
    goals: Option<&Goals>,
) -> Result<Option<NutritionTotals>, GrammarError> {
    let grammar = Grammar::compile(tags)?;
    Ok(calculate_totals(content, &grammar, provider, goals))
}

fn linked_contribution<P: NutrientProvider + ?Sized>(
    entry: &LinkedEntry,
    provider: &P,
) -> Result<NutrientVector, EntryIssue> {
    match provider.nutrition_data(&entry.name) {
        Ok(Some(data)) => {
            let factor = unit_multiplier(entry.amount, &entry.unit, data.serving_size());
            Ok(data.scaled(factor))
        }
        Ok(None) => {
            log::warn!("No nutrition data for {}", entry.name);
            Err(EntryIssue {
                name: entry.name.clone(),
                kind: IssueKind::Missing,
            })
        }
        Err(e) => {
            log::warn!("Nutrition lookup failed for {}: {e}", entry.name);
            Err(EntryIssue {
                name: entry.name.clone(),
                kind: IssueKind::Failed(e.to_string()),
            })
        }
    }
}

fn add_inline(entry: &InlineEntry, inline: &mut NutrientVector, workout: &mut NutrientVector) {
    if entry.role == TagRole::Workout {
        if !is_valid_workout(&entry.values) {
            log::debug!("Dropping invalid workout entry {}", entry.name);
            return;
        }
        workout.add(&entry.values);
    }
    inline.add(&entry.values.scaled(entry.role.sign()));
}
