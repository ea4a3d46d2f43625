//! # Grammar
//!
//! Shared vocabulary for the entry markup: unit conversion, nutrient
//! keywords, tag configuration and the compiled pattern set.
//!
//! A [`Grammar`] is immutable once built. When the configured tags change,
//! build a new one with [`Grammar::compile`] and swap it in; never patch a
//! grammar that another caller may be using.

pub mod keywords;
pub mod patterns;
pub mod units;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use keywords::{CALORIE_KEYWORD, MEASURE_KEYWORDS, NUTRIENT_KEYWORDS, keyword_field};
pub use patterns::escape_tag;
pub use units::{Unit, unit_multiplier};

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("Failed to compile pattern {pattern}: {source}")]
    Compile {
        pattern: String,
        source: regex::Error,
    },
}

/// The two configured tag names. Matching ignores case; an empty name
/// disables that tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub food: String,
    pub workout: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            food: "food".to_string(),
            workout: "workout".to_string(),
        }
    }
}

impl TagConfig {
    pub fn new(food: impl Into<String>, workout: impl Into<String>) -> Self {
        Self {
            food: food.into(),
            workout: workout.into(),
        }
    }

    /// Classifies a matched tag. The workout tag is checked first.
    ///
    /// Comparison folds Unicode case, matching the `(?i)` tag patterns.
    pub fn role_of(&self, tag: &str) -> Option<TagRole> {
        let tag = tag.to_lowercase();
        if !self.workout.is_empty() && tag == self.workout.to_lowercase() {
            Some(TagRole::Workout)
        } else if !self.food.is_empty() && tag == self.food.to_lowercase() {
            Some(TagRole::Food)
        } else {
            None
        }
    }

    pub fn is_workout(&self, tag: &str) -> bool {
        self.role_of(tag) == Some(TagRole::Workout)
    }

    /// `-1.0` for the workout tag, `1.0` for anything else.
    pub fn effective_sign(&self, tag: &str) -> f64 {
        self.role_of(tag).unwrap_or(TagRole::Food).sign()
    }

    fn both(&self) -> [&str; 2] {
        [self.food.as_str(), self.workout.as_str()]
    }
}

/// Whether an entry adds to or subtracts from the day's totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagRole {
    Food,
    Workout,
}

impl TagRole {
    /// Sign applied to an entry's values when they are combined into totals
    /// or shown as calorie hints.
    pub fn sign(self) -> f64 {
        match self {
            TagRole::Food => 1.0,
            TagRole::Workout => -1.0,
        }
    }

    /// Applies [`TagRole::sign`] to a value, folding `-0` into `0`.
    pub fn apply(self, value: f64) -> f64 {
        let signed = value * self.sign();
        if signed == 0.0 { 0.0 } else { signed }
    }
}

/// Every pattern the engine needs for one tag configuration.
#[derive(Debug, Clone)]
pub struct Grammar {
    tags: TagConfig,
    linked: Option<Regex>,
    linked_food: Option<Regex>,
    inline: Option<Regex>,
    highlight: Option<Regex>,
    inline_calorie: Option<Regex>,
    tag_marker: Option<Regex>,
}

impl Grammar {
    /// Compiles a fresh pattern set for `tags`.
    pub fn compile(tags: &TagConfig) -> Result<Self, GrammarError> {
        let both = tags.both();
        Ok(Self {
            tags: tags.clone(),
            linked: patterns::linked_entry_pattern(&both)?,
            linked_food: patterns::linked_entry_pattern(&[tags.food.as_str()])?,
            inline: patterns::inline_entry_pattern(&both)?,
            highlight: patterns::highlight_pattern(&both)?,
            inline_calorie: patterns::inline_calorie_pattern(&both)?,
            tag_marker: patterns::tag_marker_pattern(&both)?,
        })
    }

    pub fn tags(&self) -> &TagConfig {
        &self.tags
    }

    /// Linked entries under either tag.
    pub fn linked(&self) -> Option<&Regex> {
        self.linked.as_ref()
    }

    /// Linked entries under the food tag only.
    pub fn linked_food(&self) -> Option<&Regex> {
        self.linked_food.as_ref()
    }

    pub fn inline(&self) -> Option<&Regex> {
        self.inline.as_ref()
    }

    pub fn highlight(&self) -> Option<&Regex> {
        self.highlight.as_ref()
    }

    pub fn inline_calorie(&self) -> Option<&Regex> {
        self.inline_calorie.as_ref()
    }

    pub fn tag_marker(&self) -> Option<&Regex> {
        self.tag_marker.as_ref()
    }
}
