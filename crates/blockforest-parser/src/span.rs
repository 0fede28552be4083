//! Byte ranges inside a model document.

use std::ops::Range;

/// A byte range inside one XML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create an empty span at the byte offset of a 1-based row/column
    /// position, as reported by the XML parser.
    ///
    /// Positions past the end of `text` clamp to its length.
    pub fn at_text_pos(text: &str, row: u32, col: u32) -> Self {
        let line_start = text
            .split_inclusive('\n')
            .take(row.saturating_sub(1) as usize)
            .map(str::len)
            .sum::<usize>()
            .min(text.len());

        let offset = text[line_start..]
            .char_indices()
            .nth(col.saturating_sub(1) as usize)
            .map_or(text.len(), |(idx, _)| line_start + idx);

        Self::new(offset..offset)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
