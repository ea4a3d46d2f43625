//! Pattern factories for the entry markup.
//!
//! Each factory compiles a fresh [`Regex`] from the given tag names. The
//! names are escaped here, so callers pass them exactly as configured.
//! Empty names are skipped; when no name remains the factory returns
//! `Ok(None)` and nothing can match.
//!
//! The markup forms recognised:
//!
//! - linked: `#food [[Bread]] 10g` or `#food [Bread](Bread.md)10g`
//! - inline: `#food Apple 95kcal 0.3fat`

use regex::Regex;

use super::GrammarError;
use super::keywords::NUTRIENT_KEYWORDS;

/// Unsigned decimal amount.
pub const NUMBER: &str = r"\d+(?:\.\d+)?";

/// Decimal that may carry a leading minus.
pub const SIGNED_NUMBER: &str = r"-?\d+(?:\.\d+)?";

/// Units accepted after a linked entry's amount.
pub const UNITS: &str = "kg|g|lb|cups?|tbsp|tsp|ml|oz|l|pcs?";

/// A wikilink `[[...]]` or a markdown link `[...](...)`.
pub const FILE_REFERENCE: &str = r"\[\[[^\]\n]+\]\]|\[[^\]\n]*\]\([^)\n]+\)";

/// Escapes every regex metacharacter in a tag name.
pub fn escape_tag(tag: &str) -> String {
    regex::escape(tag)
}

pub(crate) fn keyword_alternation() -> String {
    NUTRIENT_KEYWORDS
        .iter()
        .map(|(kw, _)| *kw)
        .collect::<Vec<_>>()
        .join("|")
}

/// One `<number><keyword>` token.
pub fn nutrient_value() -> String {
    format!(r"{SIGNED_NUMBER}(?:{})\b", keyword_alternation())
}

/// One nutrient token with `number` and `keyword` captures, for splitting
/// a matched run back into its values.
pub fn nutrient_token() -> String {
    format!(
        r"(?i)(?P<number>{SIGNED_NUMBER})(?P<keyword>{})\b",
        keyword_alternation()
    )
}

/// A whitespace separated run of nutrient tokens.
fn nutrient_run() -> String {
    let value = nutrient_value();
    format!(r"{value}(?:\s+{value})*")
}

fn tag_alternation(tags: &[&str]) -> Option<String> {
    let escaped: Vec<String> = tags
        .iter()
        .filter(|tag| !tag.is_empty())
        .map(|tag| escape_tag(tag))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn build(tags: &[&str], body: &str) -> Result<Option<Regex>, GrammarError> {
    let Some(alternation) = tag_alternation(tags) else {
        return Ok(None);
    };
    let source = format!(r"(?i)#(?P<tag>{alternation})\s+{body}");
    Regex::new(&source)
        .map(Some)
        .map_err(|source_err| GrammarError::Compile {
            pattern: source,
            source: source_err,
        })
}

/// `#tag <reference> <amount><unit>`, capturing `tag`, `link`, `amount`, `unit`.
pub fn linked_entry_pattern(tags: &[&str]) -> Result<Option<Regex>, GrammarError> {
    build(
        tags,
        &format!(r"(?P<link>{FILE_REFERENCE})\s*(?P<amount>{NUMBER})(?P<unit>{UNITS})\b"),
    )
}

/// `#tag <name> <n><kw> ...`, capturing `tag`, `name`, `values`.
///
/// The name is lazy, so `values` starts at the first nutrient token.
/// Callers reject names that contain a wikilink.
pub fn inline_entry_pattern(tags: &[&str]) -> Result<Option<Regex>, GrammarError> {
    build(tags, &format!(r"(?P<name>\S.*?)\s+(?P<values>{})", nutrient_run()))
}

/// Linked or inline entry in one pattern. A linked match populates `link`
/// and `amount` (amount plus unit); an inline match populates `name` and
/// `values`.
pub fn highlight_pattern(tags: &[&str]) -> Result<Option<Regex>, GrammarError> {
    build(
        tags,
        &format!(
            r"(?:(?P<link>{FILE_REFERENCE})\s*(?P<amount>{NUMBER}(?:{UNITS}))\b|(?P<name>\S.*?)\s+(?P<values>{}))",
            nutrient_run()
        ),
    )
}

/// `#tag <text> <n>kcal`, where the text starts with neither a link nor a
/// tag. Capturing `tag`, `name`, `kcal`.
pub fn inline_calorie_pattern(tags: &[&str]) -> Result<Option<Regex>, GrammarError> {
    build(
        tags,
        &format!(r"(?P<name>[^\s\[#][^#\n]*?)\s+(?P<kcal>{SIGNED_NUMBER})kcal\b"),
    )
}

/// Bare `#tag ` marker, capturing `tag`.
pub fn tag_marker_pattern(tags: &[&str]) -> Result<Option<Regex>, GrammarError> {
    build(tags, "")
}
