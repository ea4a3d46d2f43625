use std::ops::Range;

/// A byte range `[start, end)` into the scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span of a regex match found in a line that begins at `base`.
    pub fn of_match(m: &regex::Match<'_>, base: usize) -> Self {
        Self::new(base + m.start(), base + m.end())
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits `text` on `\n`, yielding each line with its absolute start offset.
///
/// Offsets advance by `line.len() + 1`, so a trailing `\r` stays part of
/// the line it ends.
pub fn lines_with_offsets(text: &str, base: usize) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = base;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}
