use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::grammar::{Grammar, TagConfig, keyword_field, patterns};
use crate::nutrients::{NutrientKey, NutrientVector};

use super::entry::{Entry, InlineEntry, LineMatch, LinkedEntry};
use super::link::{WikiLink, normalize_link_name};
use super::span::{Span, lines_with_offsets};

fn nutrient_token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(&patterns::nutrient_token()).expect("Invalid nutrient token regex")
    })
}

/// One `<number><keyword>` token inside a matched value run.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientToken<'a> {
    /// Token text, e.g. `-150kcal`.
    pub text: &'a str,
    /// Byte range of the token within the run it was taken from.
    pub local: Span,
    pub key: NutrientKey,
    /// `None` when the number fails to parse.
    pub value: Option<f64>,
}

/// Splits a run such as `95kcal 0.3fat` into its tokens.
pub fn nutrient_tokens(run: &str) -> impl Iterator<Item = NutrientToken<'_>> {
    nutrient_token_regex().captures_iter(run).filter_map(|caps| {
        let whole = caps.get(0)?;
        let key = keyword_field(caps.name("keyword")?.as_str())?;
        let value = caps
            .name("number")?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        Some(NutrientToken {
            text: whole.as_str(),
            local: Span::new(whole.start(), whole.end()),
            key,
            value,
        })
    })
}

/// Sums a value run into a vector. Any unparseable number rejects the
/// whole run.
pub fn parse_nutrient_values(run: &str) -> Option<NutrientVector> {
    let mut values = NutrientVector::new();
    for token in nutrient_tokens(run) {
        values.accumulate(token.key, token.value?);
    }
    (!values.is_empty()).then_some(values)
}

/// Builds a linked entry from a match of the linked pattern.
pub(crate) fn linked_entry(caps: &Captures<'_>, tags: &TagConfig, base: usize) -> Option<LinkedEntry> {
    let tag = caps.name("tag")?.as_str();
    let role = tags.role_of(tag)?;
    let amount = caps
        .name("amount")?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())?;
    Some(LinkedEntry {
        tag: tag.to_string(),
        role,
        name: normalize_link_name(caps.name("link")?.as_str()),
        amount,
        unit: caps.name("unit")?.as_str().to_string(),
        span: Span::of_match(&caps.get(0)?, base),
    })
}

/// Builds an inline entry from a match of the inline pattern, rejecting
/// names that carry a wikilink.
pub(crate) fn inline_entry(caps: &Captures<'_>, tags: &TagConfig, base: usize) -> Option<InlineEntry> {
    let tag = caps.name("tag")?.as_str();
    let role = tags.role_of(tag)?;
    let name = caps.name("name")?.as_str().trim();
    if name.contains(WikiLink::OPEN) {
        return None;
    }
    Some(InlineEntry {
        tag: tag.to_string(),
        role,
        name: name.to_string(),
        values: parse_nutrient_values(caps.name("values")?.as_str())?,
        span: Span::of_match(&caps.get(0)?, base),
    })
}

/// Finds the first entry on `line`, linked or inline.
///
/// `base` is the absolute offset of the line in its document; all spans in
/// the result include it.
pub fn match_line(line: &str, base: usize, grammar: &Grammar) -> Option<LineMatch> {
    let caps = grammar.highlight()?.captures(line)?;
    let tag = caps.name("tag")?.as_str().to_string();
    let full = Span::of_match(&caps.get(0)?, base);

    if let (Some(link), Some(amount)) = (caps.name("link"), caps.name("amount")) {
        return Some(LineMatch::Linked {
            tag,
            full,
            link: Span::of_match(&link, base),
            amount: Span::of_match(&amount, base),
        });
    }

    let name = caps.name("name")?;
    if name.as_str().contains(WikiLink::OPEN) {
        return None;
    }
    let values = caps.name("values")?;
    Some(LineMatch::Inline {
        tag,
        full,
        name: Span::of_match(&name, base),
        values: Span::of_match(&values, base),
    })
}

/// Collects entries from every line of `content` for aggregation.
///
/// Each line is tried once with the food-tag linked pattern and once with
/// the inline pattern, keeping only the first match of each. A second entry
/// of the same form on one line is not counted.
pub fn scan_entries(content: &str, grammar: &Grammar) -> Vec<Entry> {
    let tags = grammar.tags();
    let mut entries = Vec::new();

    for (base, line) in lines_with_offsets(content, 0) {
        if let Some(re) = grammar.linked_food()
            && let Some(caps) = re.captures(line)
            && let Some(entry) = linked_entry(&caps, tags, base)
        {
            entries.push(Entry::Linked(entry));
        }

        if let Some(re) = grammar.inline()
            && let Some(caps) = re.captures(line)
        {
            match inline_entry(&caps, tags, base) {
                Some(entry) => entries.push(Entry::Inline(entry)),
                None => log::debug!("Skipping inline candidate at offset {base}"),
            }
        }
    }

    entries
}
