use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A nutrient field tracked by the engine.
///
/// `ServingSize` is carried by provider data to size piece units; it is
/// never summed into totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Calories,
    Fats,
    SaturatedFats,
    Protein,
    Carbs,
    Fiber,
    Sugar,
    Sodium,
    ServingSize,
}

impl NutrientKey {
    /// Every key that contributes to totals, in display order.
    pub const NUTRIENTS: [NutrientKey; 8] = [
        NutrientKey::Calories,
        NutrientKey::Fats,
        NutrientKey::SaturatedFats,
        NutrientKey::Protein,
        NutrientKey::Carbs,
        NutrientKey::Fiber,
        NutrientKey::Sugar,
        NutrientKey::Sodium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NutrientKey::Calories => "calories",
            NutrientKey::Fats => "fats",
            NutrientKey::SaturatedFats => "saturated_fats",
            NutrientKey::Protein => "protein",
            NutrientKey::Carbs => "carbs",
            NutrientKey::Fiber => "fiber",
            NutrientKey::Sugar => "sugar",
            NutrientKey::Sodium => "sodium",
            NutrientKey::ServingSize => "serving_size",
        }
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse nutrient values. A missing key means "not specified", not zero.
///
/// Non-finite values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientVector(BTreeMap<NutrientKey, f64>);

impl NutrientVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: NutrientKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sets `key` to `value`, ignoring non-finite values.
    pub fn set(&mut self, key: NutrientKey, value: f64) {
        if value.is_finite() {
            self.0.insert(key, value);
        }
    }

    /// Adds `value` to whatever is stored under `key` (absent counts as zero).
    pub fn accumulate(&mut self, key: NutrientKey, value: f64) {
        if !value.is_finite() {
            return;
        }
        let sum = self.0.get(&key).copied().unwrap_or(0.0) + value;
        if sum.is_finite() {
            self.0.insert(key, sum);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Iterates nutrient fields only, skipping `ServingSize`.
    pub fn nutrients(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        self.iter().filter(|(k, _)| *k != NutrientKey::ServingSize)
    }

    /// Elementwise sum; keys present in either side are present in the result.
    pub fn add(&mut self, other: &NutrientVector) {
        for (key, value) in other.nutrients() {
            self.accumulate(key, value);
        }
    }

    /// Elementwise difference; keys only in `other` become negative here.
    pub fn subtract(&mut self, other: &NutrientVector) {
        for (key, value) in other.nutrients() {
            self.accumulate(key, -value);
        }
    }

    /// Returns the nutrient fields multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> NutrientVector {
        let mut out = NutrientVector::new();
        for (key, value) in self.nutrients() {
            out.set(key, value * factor);
        }
        out
    }

    /// Returns a copy with every present field floored at zero.
    pub fn clamped(&self) -> NutrientVector {
        NutrientVector(self.nutrients().map(|(k, v)| (k, v.max(0.0))).collect())
    }

    pub fn has_positive(&self) -> bool {
        self.nutrients().any(|(_, v)| v > 0.0)
    }

    pub fn serving_size(&self) -> Option<f64> {
        self.get(NutrientKey::ServingSize)
    }
}

impl FromIterator<(NutrientKey, f64)> for NutrientVector {
    fn from_iter<I: IntoIterator<Item = (NutrientKey, f64)>>(iter: I) -> Self {
        let mut out = NutrientVector::new();
        for (key, value) in iter {
            out.set(key, value);
        }
        out
    }
}

impl<const N: usize> From<[(NutrientKey, f64); N]> for NutrientVector {
    fn from(pairs: [(NutrientKey, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Daily targets keyed by nutrient.
pub type Goals = BTreeMap<NutrientKey, f64>;

/// Progress against one daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: f64,
    pub consumed: f64,
    pub remaining: f64,
    /// Whole-number percentage of the goal consumed.
    pub percent_consumed: f64,
    /// `100 - percent_consumed`, never below zero.
    pub percent_remaining: f64,
}

impl GoalProgress {
    pub fn new(goal: f64, consumed: f64) -> Self {
        let (percent_consumed, percent_remaining) = if goal > 0.0 {
            let pct = (consumed / goal * 100.0).round();
            (pct, (100.0 - pct).max(0.0))
        } else {
            (0.0, 0.0)
        };
        Self {
            goal,
            consumed,
            remaining: goal - consumed,
            percent_consumed,
            percent_remaining,
        }
    }
}

/// Computes progress for every key in `goals`, reading consumption from
/// `consumed` (absent keys count as zero).
pub fn goal_progress(
    consumed: &NutrientVector,
    goals: &Goals,
) -> BTreeMap<NutrientKey, GoalProgress> {
    goals
        .iter()
        .map(|(key, goal)| {
            let eaten = consumed.get(*key).unwrap_or(0.0);
            (*key, GoalProgress::new(*goal, eaten))
        })
        .collect()
}
