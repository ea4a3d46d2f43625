//! # Suggestions
//!
//! Classifies what the user is typing after a tag and offers completions.
//!
//! Given a line and a cursor, the nearest tag before the cursor decides the
//! context:
//!
//! 1. `#food [[Bread]] 15` → **measure**: complete a unit (`15g`, `15kg`, ...)
//! 2. `#food Apple 95kcal 3` → **nutrition**: complete a keyword (`3fat`, ...)
//! 3. `#food App` → **food name**: complete a known food
//!
//! Workout tags never get food-name completion, and their values only
//! complete to positive `kcal`.

use regex::Regex;
use std::sync::OnceLock;

use crate::grammar::{
    CALORIE_KEYWORD, Grammar, GrammarError, MEASURE_KEYWORDS, TagConfig, TagRole, keywords,
    patterns,
};
use crate::markup::link::{MarkdownLink, WikiLink};
use crate::provider::NutrientNameProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionKind {
    FoodName,
    Nutrition { number: String, letters: String },
    Measure { number: String, letters: String },
}

/// What to complete, and which part of the line a completion replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionContext {
    pub kind: SuggestionKind,
    pub role: TagRole,
    /// Byte offset in the line where the replaced text starts.
    pub start: usize,
    /// Byte offset in the line where the replaced text ends (the cursor).
    pub end: usize,
    /// The replaced text.
    pub query: String,
}

fn measure_regex() -> &'static Regex {
    static MEASURE: OnceLock<Regex> = OnceLock::new();
    MEASURE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)(?:{})\s*(?P<number>{})(?P<letters>[a-z]*)$",
            patterns::FILE_REFERENCE,
            patterns::NUMBER
        ))
        .expect("Invalid measure regex")
    })
}

fn nutrition_regex() -> &'static Regex {
    static NUTRITION: OnceLock<Regex> = OnceLock::new();
    NUTRITION.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)^(?P<text>.*?\S)\s+(?P<number>{})(?P<letters>[a-z]*)$",
            patterns::SIGNED_NUMBER
        ))
        .expect("Invalid nutrition regex")
    })
}

/// Per-keystroke classifier holding the tag pattern for one configuration.
///
/// Build a new trigger when the tags change.
#[derive(Debug, Clone)]
pub struct SuggestionTrigger {
    tags: TagConfig,
    marker: Option<Regex>,
}

impl SuggestionTrigger {
    pub fn new(tags: &TagConfig) -> Result<Self, GrammarError> {
        Ok(Self {
            tags: tags.clone(),
            marker: patterns::tag_marker_pattern(&[tags.food.as_str(), tags.workout.as_str()])?,
        })
    }

    /// A fresh trigger for changed tags. `self` is left untouched.
    pub fn recompile(&self, tags: &TagConfig) -> Result<Self, GrammarError> {
        Self::new(tags)
    }

    /// Reuses the tag pattern already compiled into `grammar`.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        Self {
            tags: grammar.tags().clone(),
            marker: grammar.tag_marker().cloned(),
        }
    }

    /// Classifies the text between the nearest tag and `cursor`.
    pub fn classify(&self, line: &str, cursor: usize) -> Option<SuggestionContext> {
        if cursor == 0 {
            return None;
        }
        let before = line.get(..cursor)?;
        let marker = self.marker.as_ref()?.captures_iter(before).last()?;
        let role = self.tags.role_of(marker.name("tag")?.as_str())?;
        let content_start = marker.get(0)?.end();
        let content = &before[content_start..];

        if let Some(caps) = measure_regex().captures(content) {
            let number = caps.name("number")?;
            return Some(SuggestionContext {
                kind: SuggestionKind::Measure {
                    number: number.as_str().to_string(),
                    letters: caps.name("letters")?.as_str().to_string(),
                },
                role,
                start: content_start + number.start(),
                end: cursor,
                query: content[number.start()..].to_string(),
            });
        }

        if let Some(caps) = nutrition_regex().captures(content)
            && !has_link(caps.name("text")?.as_str())
        {
            let number = caps.name("number")?;
            return Some(SuggestionContext {
                kind: SuggestionKind::Nutrition {
                    number: number.as_str().to_string(),
                    letters: caps.name("letters")?.as_str().to_string(),
                },
                role,
                start: content_start + number.start(),
                end: cursor,
                query: content[number.start()..].to_string(),
            });
        }

        if role == TagRole::Workout {
            return None;
        }

        Some(SuggestionContext {
            kind: SuggestionKind::FoodName,
            role,
            start: content_start,
            end: cursor,
            query: content.to_string(),
        })
    }
}

fn has_link(text: &str) -> bool {
    text.starts_with('[')
        || text.contains(WikiLink::OPEN)
        || text.contains(MarkdownLink::TARGET_OPEN)
}

/// Completions for `context`, best first.
pub fn suggestions<P: NutrientNameProvider + ?Sized>(
    context: &SuggestionContext,
    provider: &P,
) -> Vec<String> {
    match &context.kind {
        SuggestionKind::FoodName => food_name_suggestions(&context.query, provider.nutrient_names()),
        SuggestionKind::Measure { number, letters } => {
            value_suggestions(number, letters, context.role, MEASURE_KEYWORDS.iter().copied())
        }
        SuggestionKind::Nutrition { number, letters } => {
            value_suggestions(number, letters, context.role, keywords::nutrient_keywords())
        }
    }
}

/// Filters `names` by a case-insensitive substring of `query`. Names that
/// start with the query come first; order is otherwise kept.
fn food_name_suggestions(query: &str, names: Vec<String>) -> Vec<String> {
    let needle = query
        .trim_start()
        .trim_start_matches(WikiLink::OPEN)
        .trim()
        .to_lowercase();
    if needle.is_empty() {
        return names;
    }

    let (mut prefixed, contained): (Vec<String>, Vec<String>) = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .partition(|name| name.to_lowercase().starts_with(&needle));
    prefixed.extend(contained);
    prefixed
}

fn value_suggestions<'a>(
    number: &str,
    letters: &str,
    role: TagRole,
    keywords: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let Ok(value) = number.parse::<f64>() else {
        return Vec::new();
    };
    let is_workout = role == TagRole::Workout;
    if is_workout && value <= 0.0 {
        return Vec::new();
    }
    let calories_only = is_workout || number.starts_with('-');
    let letters = letters.to_lowercase();

    keywords
        .filter(|kw| kw.starts_with(&letters))
        .filter(|kw| !calories_only || *kw == CALORIE_KEYWORD)
        .map(|kw| format!("{number}{kw}"))
        .collect()
}

/// Text inserted when a food-name suggestion is accepted: a wikilink to the
/// food's file followed by a space, ready for the amount.
pub fn completion_text<P: NutrientNameProvider + ?Sized>(name: &str, provider: &P) -> String {
    let file = provider
        .file_name_for(name)
        .unwrap_or_else(|| name.to_string());
    format!("{}{file}{} ", WikiLink::OPEN, WikiLink::CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::food_table;
    use pretty_assertions::assert_eq;

    fn trigger() -> SuggestionTrigger {
        SuggestionTrigger::new(&TagConfig::default()).unwrap()
    }

    fn classify(line: &str) -> Option<SuggestionContext> {
        trigger().classify(line, line.len())
    }

    fn suggest(line: &str) -> Vec<String> {
        classify(line)
            .map(|ctx| suggestions(&ctx, &food_table()))
            .unwrap_or_default()
    }

    #[test]
    fn cursor_at_start_is_rejected() {
        assert_eq!(trigger().classify("#food Apple", 0), None);
    }

    #[test]
    fn no_tag_before_cursor() {
        assert_eq!(classify("just typing"), None);
        assert_eq!(trigger().classify("apple #food Pear", 5), None);
    }

    #[test]
    fn cursor_off_char_boundary_is_rejected() {
        assert_eq!(trigger().classify("#food é", 7), None);
    }

    #[test]
    fn food_name_context() {
        let ctx = classify("#food Bre").unwrap();
        assert_eq!(ctx.kind, SuggestionKind::FoodName);
        assert_eq!(ctx.role, TagRole::Food);
        assert_eq!((ctx.start, ctx.end), (6, 9));
        assert_eq!(ctx.query, "Bre");
    }

    #[test]
    fn measure_context_after_link() {
        let ctx = classify("#food [[Bread]] 15k").unwrap();
        assert_eq!(
            ctx.kind,
            SuggestionKind::Measure {
                number: "15".to_string(),
                letters: "k".to_string(),
            }
        );
        assert_eq!(ctx.start, 16);
        assert_eq!(ctx.query, "15k");
    }

    #[test]
    fn measure_context_after_markdown_link() {
        let ctx = classify("#food [Bread](Bread.md)2").unwrap();
        assert!(matches!(ctx.kind, SuggestionKind::Measure { .. }));
        assert_eq!(ctx.start, 23);
    }

    #[test]
    fn nutrition_context_after_text() {
        let ctx = classify("#food Apple 95kcal 3f").unwrap();
        assert_eq!(
            ctx.kind,
            SuggestionKind::Nutrition {
                number: "3".to_string(),
                letters: "f".to_string(),
            }
        );
        assert_eq!(ctx.start, 19);
    }

    #[test]
    fn binds_to_nearest_tag() {
        let ctx = classify("#food Apple 95kcal #workout Swim 2").unwrap();
        assert_eq!(ctx.role, TagRole::Workout);
        assert!(matches!(ctx.kind, SuggestionKind::Nutrition { .. }));

        let ctx = classify("#workout Swim 200kcal #food Ban").unwrap();
        assert_eq!(ctx.role, TagRole::Food);
        assert_eq!(ctx.query, "Ban");
    }

    #[test]
    fn workout_free_text_is_suppressed() {
        assert_eq!(classify("#workout Runn"), None);
    }

    #[test]
    fn food_names_filtered_by_substring() {
        assert_eq!(suggest("#food ea"), vec!["Bread"]);
        assert_eq!(suggest("#food rI"), vec!["Rice"]);
        assert_eq!(suggest("#food [[Mi"), vec!["Milk"]);
    }

    #[test]
    fn prefix_matches_rank_first() {
        assert_eq!(suggest("#food e"), vec!["Egg", "Bread", "Rice"]);
    }

    #[test]
    fn empty_query_lists_all_names() {
        assert_eq!(suggest("#food "), vec!["Bread", "Egg", "Milk", "Rice"]);
    }

    #[test]
    fn measure_units_filtered_by_prefix() {
        assert_eq!(suggest("#food [[Bread]] 15t"), vec!["15tbsp", "15tsp"]);
        assert_eq!(suggest("#food [[Bread]] 2c"), vec!["2cup", "2cups"]);
        assert_eq!(suggest("#food [[Bread]] 2").len(), MEASURE_KEYWORDS.len());
    }

    #[test]
    fn nutrition_keywords_filtered_by_prefix() {
        assert_eq!(suggest("#food Apple 3s"), vec!["3satfat", "3sugar", "3sodium"]);
        assert_eq!(suggest("#food Apple 3F"), vec!["3fat", "3fiber"]);
    }

    #[test]
    fn negative_values_only_complete_calories() {
        assert_eq!(suggest("#food Recovery -150"), vec!["-150kcal"]);
        assert_eq!(suggest("#food Recovery -150f"), Vec::<String>::new());
    }

    #[test]
    fn workout_values_complete_positive_calories_only() {
        assert_eq!(suggest("#workout Run 300"), vec!["300kcal"]);
        assert_eq!(suggest("#workout Run 300k"), vec!["300kcal"]);
        assert_eq!(suggest("#workout Run 0"), Vec::<String>::new());
        assert_eq!(suggest("#workout Run -5"), Vec::<String>::new());
    }

    #[test]
    fn completion_links_to_file_name() {
        let mut table = food_table();
        table.insert_with_file("Oats", "Rolled Oats", Default::default());
        assert_eq!(completion_text("Oats", &table), "[[Rolled Oats]] ");
        assert_eq!(completion_text("Unknown", &table), "[[Unknown]] ");
    }

    #[test]
    fn trigger_from_grammar_uses_same_tags() {
        let grammar = Grammar::compile(&TagConfig::new("meal", "sport")).unwrap();
        let trigger = SuggestionTrigger::from_grammar(&grammar);
        assert!(trigger.classify("#meal Ric", 9).is_some());
        assert_eq!(trigger.classify("#food Ric", 9), None);
    }

    #[test]
    fn recompile_switches_tags() {
        let old = trigger();
        let new = old.recompile(&TagConfig::new("ate", "gym")).unwrap();
        assert!(new.classify("#ate Ric", 8).is_some());
        assert_eq!(new.classify("#food Ric", 9), None);
        assert!(old.classify("#food Ric", 9).is_some());
    }
}
