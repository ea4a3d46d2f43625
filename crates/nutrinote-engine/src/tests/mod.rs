use crate::grammar::{Grammar, TagConfig};
use crate::nutrients::{NutrientKey, NutrientVector};
use crate::provider::FoodTable;

/// Helper function to compile the grammar for the default `food`/`workout` tags
pub fn default_grammar() -> Grammar {
    Grammar::compile(&TagConfig::default()).expect("Failed to compile default grammar")
}

/// Helper function to create a small food table (values per 100g)
pub fn food_table() -> FoodTable {
    let mut table = FoodTable::new();
    table.insert(
        "Bread",
        NutrientVector::from([
            (NutrientKey::Calories, 290.0),
            (NutrientKey::Protein, 9.0),
            (NutrientKey::Carbs, 49.0),
            (NutrientKey::Fats, 3.2),
        ]),
    );
    table.insert(
        "Egg",
        NutrientVector::from([
            (NutrientKey::Calories, 155.0),
            (NutrientKey::Protein, 13.0),
            (NutrientKey::Fats, 11.0),
            (NutrientKey::ServingSize, 50.0),
        ]),
    );
    table.insert(
        "Milk",
        NutrientVector::from([
            (NutrientKey::Calories, 64.0),
            (NutrientKey::Protein, 3.3),
            (NutrientKey::Fats, 3.6),
        ]),
    );
    table.insert(
        "Rice",
        NutrientVector::from([
            (NutrientKey::Calories, 130.0),
            (NutrientKey::Carbs, 28.0),
            (NutrientKey::Protein, 2.7),
        ]),
    );
    table
}
