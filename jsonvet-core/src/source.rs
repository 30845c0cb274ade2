//! A character stream with one character of lookahead.
//!
//! Scanners [`peek`](Source::peek) at the next character and only [`bump`](Source::bump) it once
//! they decide it belongs to the current lexeme. A rejected lookahead is therefore never consumed,
//! and the line/column bookkeeping never has to be rolled back.

use crate::span::{Position, Span};

#[derive(Debug, Clone)]
pub struct Source<'a> {
    src: &'a str,
    /// Byte offset of the next character, for slicing lexemes out of `src`.
    byte: usize,
    /// Character offset of the next character, for spans.
    char_offset: usize,
    pos: Position,
}

/// Where a lexeme started, so the scanner can slice its text and build its span afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mark {
    byte: usize,
    char_offset: usize,
    pub pos: Position,
}

impl<'a> Source<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            byte: 0,
            char_offset: 0,
            pos: Position::default(),
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.src[self.byte..].chars().next()
    }

    /// Consume the next character, updating the position.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        self.char_offset += 1;
        self.pos.advance(c);
        Some(c)
    }

    pub fn is_at_end(&self) -> bool {
        self.byte >= self.src.len()
    }

    /// Position of the next (unconsumed) character.
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn mark(&self) -> Mark {
        Mark {
            byte: self.byte,
            char_offset: self.char_offset,
            pos: self.pos,
        }
    }

    /// Source text consumed since `mark`.
    pub fn slice_from(&self, mark: Mark) -> &'a str {
        &self.src[mark.byte..self.byte]
    }

    /// Span of the text consumed since `mark`.
    pub fn span_from(&self, mark: Mark) -> Span {
        Span::new(mark.char_offset, self.char_offset)
    }

    /// Span covering the next character, or an empty span at end of input.
    pub fn lookahead_span(&self) -> Span {
        match self.peek() {
            Some(_) => Span::new(self.char_offset, self.char_offset + 1),
            None => Span::point(self.char_offset),
        }
    }
}
