//! Error types for both validation stages. Every error is fatal: the first one encountered ends
//! the run.

use std::fmt;

use thiserror::Error;

use crate::lexer::LexState;
use crate::span::{Position, Span};
use crate::token::TokenKind;
use crate::validator::StructuralState;

/// What the lexer was looking at when it gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Char(char),
    /// A run of characters, e.g. a misspelled keyword.
    Text(String),
    EndOfInput,
}

impl From<Option<char>> for Found {
    fn from(c: Option<char>) -> Self {
        c.map_or(Found::EndOfInput, Found::Char)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{c:?}"),
            Found::Text(s) => write!(f, "{s:?}"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unescaped control character in string")]
    ControlCharacter,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("expected 4 hex digits after `\\u`")]
    InvalidUnicodeEscape,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("malformed keyword, expected `{expected}`")]
    MalformedKeyword { expected: &'static str },
    #[error("leading zero in number")]
    LeadingZero,
    #[error("malformed number")]
    MalformedNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: found {found} in {state} state at {pos}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub state: LexState,
    pub found: Found,
    pub pos: Position,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty document: expected `{{` but the input contains no tokens")]
    EmptyDocument,
    #[error("document must be an object: expected `{{` but found `{text}` at {pos}")]
    NotAnObject {
        found: TokenKind,
        text: String,
        pos: Position,
        span: Span,
    },
    #[error("unexpected token `{text}` in {state} state at {pos}; expected {expected}")]
    UnexpectedToken {
        state: StructuralState,
        expected: &'static str,
        found: TokenKind,
        text: String,
        pos: Position,
        span: Span,
    },
    #[error("duplicate key {key} at {pos}; first defined at {first_pos}")]
    DuplicateKey {
        key: String,
        pos: Position,
        span: Span,
        first_pos: Position,
        first_span: Span,
    },
    #[error("object opened at {pos} is never closed")]
    UnterminatedObject { pos: Position, span: Span },
    #[error("list opened at {pos} is never closed")]
    UnterminatedList { pos: Position, span: Span },
    #[error("unexpected token `{text}` after the top-level object at {pos}")]
    TrailingTokens {
        found: TokenKind,
        text: String,
        pos: Position,
        span: Span,
    },
    #[error("nesting deeper than {limit} levels at {pos}")]
    NestingTooDeep {
        limit: usize,
        pos: Position,
        span: Span,
    },
}

impl ParseError {
    /// Primary location of the error. `None` only for [`ParseError::EmptyDocument`].
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::EmptyDocument => None,
            ParseError::NotAnObject { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::DuplicateKey { span, .. }
            | ParseError::UnterminatedObject { span, .. }
            | ParseError::UnterminatedList { span, .. }
            | ParseError::TrailingTokens { span, .. }
            | ParseError::NestingTooDeep { span, .. } => Some(*span),
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::EmptyDocument => None,
            ParseError::NotAnObject { pos, .. }
            | ParseError::UnexpectedToken { pos, .. }
            | ParseError::DuplicateKey { pos, .. }
            | ParseError::UnterminatedObject { pos, .. }
            | ParseError::UnterminatedList { pos, .. }
            | ParseError::TrailingTokens { pos, .. }
            | ParseError::NestingTooDeep { pos, .. } => Some(*pos),
        }
    }
}

/// Either stage's failure, as returned by [`validate_str`](crate::validate_str).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex(e) => Some(e.pos),
            Error::Parse(e) => e.position(),
        }
    }
}
