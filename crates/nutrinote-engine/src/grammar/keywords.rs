use crate::nutrients::NutrientKey;

/// Inline nutrient keywords and the field each one fills.
pub const NUTRIENT_KEYWORDS: [(&str, NutrientKey); 8] = [
    ("kcal", NutrientKey::Calories),
    ("fat", NutrientKey::Fats),
    ("satfat", NutrientKey::SaturatedFats),
    ("prot", NutrientKey::Protein),
    ("carbs", NutrientKey::Carbs),
    ("sugar", NutrientKey::Sugar),
    ("fiber", NutrientKey::Fiber),
    ("sodium", NutrientKey::Sodium),
];

/// The calorie keyword, the only one allowed for workouts and negative values.
pub const CALORIE_KEYWORD: &str = "kcal";

/// Units offered when completing a linked entry's amount.
pub const MEASURE_KEYWORDS: [&str; 12] = [
    "g", "kg", "ml", "l", "oz", "lb", "cup", "cups", "tbsp", "tsp", "pc", "pcs",
];

/// Looks up the nutrient field for an inline keyword, case-insensitively.
pub fn keyword_field(keyword: &str) -> Option<NutrientKey> {
    NUTRIENT_KEYWORDS
        .iter()
        .find(|(kw, _)| kw.eq_ignore_ascii_case(keyword))
        .map(|(_, key)| *key)
}

pub fn nutrient_keywords() -> impl Iterator<Item = &'static str> {
    NUTRIENT_KEYWORDS.iter().map(|(kw, _)| *kw)
}
