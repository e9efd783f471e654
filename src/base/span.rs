//! Line/column positions and conversion to byte offsets.

use std::fmt;

use text_size::TextSize;

/// A zero-indexed line and column position in script source.
///
/// Columns count UTF-8 bytes. Editor protocols that speak one-indexed
/// positions convert at their own boundary.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Maps between byte offsets and [`LineCol`] positions for one script.
///
/// Built once per text snapshot; queries are binary searches over the
/// recorded line starts.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// The position containing `offset`. Offsets past the last line start
    /// land on the last line.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32,
            col: (offset - self.line_starts[line]).into(),
        }
    }

    /// The byte offset of `pos`, or `None` when the line does not exist.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = self.line_starts.get(pos.line as usize)?;
        Some(*start + TextSize::from(pos.col))
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
