use std::fmt;

use serde::Serialize;

/// A [`Span`] represents a contiguous region of the input, measured in characters (not bytes).
/// It is used to point a token or a diagnostic back at its source. An invariant to be maintained
/// is that `lo <= hi`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    /// Construct a new span. Will panic if `lo > hi`. Prefer this constructor over direct struct
    /// initialization.
    pub const fn new(lo: usize, hi: usize) -> Self {
        assert!(lo <= hi, "`lo` must not be larger than `hi`");
        Span { lo, hi }
    }

    /// An empty span sitting at `offset`, used for end-of-input diagnostics.
    pub const fn point(offset: usize) -> Self {
        Span::new(offset, offset)
    }

    pub fn into_range(self) -> std::ops::Range<usize> {
        self.lo..self.hi
    }

    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }
}

/// A 1-based line/column pair. Columns count characters and reset to 1 after every newline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Position { line, col }
    }

    /// Advance past `c`.
    pub(crate) fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}
