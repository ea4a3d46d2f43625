pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: char = '|';
}

pub struct MarkdownLink;

impl MarkdownLink {
    pub const TARGET_OPEN: &'static str = "](";
    pub const TARGET_CLOSE: char = ')';
}

const HEADING: char = '#';
const MARKDOWN_EXTENSION: &str = ".md";

/// Reduces a file reference to the food name a provider is keyed by.
///
/// Accepts `[[target|alias]]`, `[display](path)` or a bare target. Drops
/// the alias, any `#heading` fragment, directory prefixes and a trailing
/// `.md`, then percent-decodes what is left.
///
/// ```
/// use nutrinote_engine::markup::normalize_link_name;
/// assert_eq!(normalize_link_name("[[foods/Rye Bread.md|bread]]"), "Rye Bread");
/// assert_eq!(normalize_link_name("[Oats](foods/Rolled%20Oats.md)"), "Rolled Oats");
/// ```
pub fn normalize_link_name(reference: &str) -> String {
    let reference = reference.trim();
    let target = if let Some(inner) = reference
        .strip_prefix(WikiLink::OPEN)
        .and_then(|rest| rest.strip_suffix(WikiLink::CLOSE))
    {
        inner.split(WikiLink::ALIAS).next().unwrap_or(inner)
    } else if let Some(open) = reference.find(MarkdownLink::TARGET_OPEN) {
        let rest = &reference[open + MarkdownLink::TARGET_OPEN.len()..];
        rest.strip_suffix(MarkdownLink::TARGET_CLOSE).unwrap_or(rest)
    } else {
        reference
    };

    let target = target.split(HEADING).next().unwrap_or(target);
    let file = target.rsplit('/').next().unwrap_or(target);
    let stem = strip_extension(file.trim());

    match urlencoding::decode(stem) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => stem.to_string(),
    }
}

fn strip_extension(file: &str) -> &str {
    let cut = file.len().saturating_sub(MARKDOWN_EXTENSION.len());
    match file.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION) => &file[..cut],
        _ => file,
    }
}
