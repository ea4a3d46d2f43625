//! Lookups the engine needs from its host.
//!
//! Names passed in are already normalized with
//! [`crate::markup::normalize_link_name`]. [`FoodTable`] is an in-memory
//! implementation of all three traits.

use std::collections::BTreeMap;

use crate::nutrients::{NutrientKey, NutrientVector};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Lookup failed for {name}: {message}")]
    Lookup { name: String, message: String },
}

/// Nutrient data per 100 grams-equivalent, keyed by food name.
pub trait NutrientProvider {
    /// `Ok(None)` when the food is unknown.
    fn nutrition_data(&self, name: &str) -> Result<Option<NutrientVector>, ProviderError>;
}

/// Calorie data for inline calorie hints.
pub trait CalorieProvider {
    /// Calories per 100 grams-equivalent.
    fn calories_for_food(&self, name: &str) -> Option<f64>;
    /// Grams-equivalent of one piece.
    fn serving_size(&self, name: &str) -> Option<f64>;
}

/// Food names offered by autocomplete.
pub trait NutrientNameProvider {
    /// All known names, sorted.
    fn nutrient_names(&self) -> Vec<String>;
    /// File name to link to for a suggested name.
    fn file_name_for(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq)]
struct FoodRecord {
    name: String,
    file_name: String,
    nutrients: NutrientVector,
}

/// Foods held in memory, looked up case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTable {
    foods: BTreeMap<String, FoodRecord>,
}

impl FoodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a food whose file name matches its display name.
    pub fn insert(&mut self, name: impl Into<String>, nutrients: NutrientVector) {
        let name = name.into();
        let file_name = name.clone();
        self.insert_with_file(name, file_name, nutrients);
    }

    pub fn insert_with_file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        nutrients: NutrientVector,
    ) {
        let name = name.into();
        self.foods.insert(
            name.to_lowercase(),
            FoodRecord {
                name,
                file_name: file_name.into(),
                nutrients,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    fn record(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.get(&name.to_lowercase())
    }
}

impl FromIterator<(String, NutrientVector)> for FoodTable {
    fn from_iter<I: IntoIterator<Item = (String, NutrientVector)>>(iter: I) -> Self {
        let mut table = FoodTable::new();
        for (name, nutrients) in iter {
            table.insert(name, nutrients);
        }
        table
    }
}

impl NutrientProvider for FoodTable {
    fn nutrition_data(&self, name: &str) -> Result<Option<NutrientVector>, ProviderError> {
        Ok(self.record(name).map(|r| r.nutrients.clone()))
    }
}

impl CalorieProvider for FoodTable {
    fn calories_for_food(&self, name: &str) -> Option<f64> {
        self.record(name)?.nutrients.get(NutrientKey::Calories)
    }

    fn serving_size(&self, name: &str) -> Option<f64> {
        self.record(name)?.nutrients.serving_size()
    }
}

impl NutrientNameProvider for FoodTable {
    fn nutrient_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.foods.values().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    fn file_name_for(&self, name: &str) -> Option<String> {
        self.record(name).map(|r| r.file_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FoodTable {
        let mut table = FoodTable::new();
        table.insert(
            "Bread",
            NutrientVector::from([
                (NutrientKey::Calories, 290.0),
                (NutrientKey::ServingSize, 35.0),
            ]),
        );
        table.insert_with_file(
            "Apple",
            "Fruit - Apple",
            NutrientVector::from([(NutrientKey::Calories, 52.0)]),
        );
        table
    }

    #[test]
    fn lookups_ignore_case() {
        let table = table();
        assert_eq!(table.calories_for_food("bread"), Some(290.0));
        assert_eq!(table.serving_size("BREAD"), Some(35.0));
        assert!(table.nutrition_data("apple").unwrap().is_some());
    }

    #[test]
    fn unknown_food_is_none() {
        let table = table();
        assert_eq!(table.calories_for_food("Cheese"), None);
        assert_eq!(table.nutrition_data("Cheese").unwrap(), None);
    }

    #[test]
    fn names_are_sorted_and_map_to_files() {
        let table = table();
        assert_eq!(table.nutrient_names(), vec!["Apple", "Bread"]);
        assert_eq!(table.file_name_for("apple").as_deref(), Some("Fruit - Apple"));
        assert_eq!(table.file_name_for("Pear"), None);
    }
}
