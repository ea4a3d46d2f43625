// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_daily_note(days: usize) -> String {
    let base = "## Breakfast\n\n- #food [[Oats]] 40g\n- #food [[Milk]] 1cup\n- #food Coffee 5kcal\n\n## Lunch\n\n- #food [Rice](foods/Rice.md)150g\n- #food Chicken curry 450kcal 20fat 35prot\n\n## Exercise\n\n- #workout Run 5k 320kcal\n- felt good today\n\n";
    base.repeat(days)
}

#[allow(dead_code)]
pub fn food_table() -> nutrinote_engine::FoodTable {
    use nutrinote_engine::{NutrientKey, NutrientVector};

    [("Oats", 389.0), ("Milk", 64.0), ("Rice", 130.0)]
        .into_iter()
        .map(|(name, kcal)| {
            (
                name.to_string(),
                NutrientVector::from([(NutrientKey::Calories, kcal)]),
            )
        })
        .collect()
}
