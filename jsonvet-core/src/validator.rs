//! Recursive-descent validation over a token sequence.
//!
//! Objects and lists each run their own small state machine over token kinds and recurse into
//! one another for nested values. A single cursor (an index into the token slice) is threaded
//! through every call by `&mut` reference, so a nested call leaves it one past the closing
//! delimiter it consumed and the caller resumes from there.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::*;

use crate::error::ParseError;
use crate::span::{Position, Span};
use crate::token::{Token, TokenKind};

/// Default for [`Limits::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Resource limits for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of objects and lists. The top-level object counts as depth 1.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ObjectState {
    KeyOrEnd,
    /// After a comma: a key is mandatory, so a trailing comma is rejected here.
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

impl ObjectState {
    fn expected(self) -> &'static str {
        match self {
            ObjectState::KeyOrEnd => "a string key or `}`",
            ObjectState::Key => "a string key",
            ObjectState::Colon => "`:`",
            ObjectState::Value => "a value",
            ObjectState::CommaOrEnd => "`,` or `}`",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListState {
    ValueOrEnd,
    /// After a comma: a value is mandatory, so a trailing comma is rejected here.
    Value,
    CommaOrEnd,
}

impl ListState {
    fn expected(self) -> &'static str {
        match self {
            ListState::ValueOrEnd => "a value or `]`",
            ListState::Value => "a value",
            ListState::CommaOrEnd => "`,` or `]`",
        }
    }
}

/// The state a structural error was raised in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StructuralState {
    Object(ObjectState),
    List(ListState),
}

impl StructuralState {
    pub fn expected(self) -> &'static str {
        match self {
            StructuralState::Object(s) => s.expected(),
            StructuralState::List(s) => s.expected(),
        }
    }
}

impl fmt::Display for StructuralState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (production, state) = match self {
            StructuralState::Object(s) => (
                "object",
                match s {
                    ObjectState::KeyOrEnd => "key-or-end",
                    ObjectState::Key => "key",
                    ObjectState::Colon => "colon",
                    ObjectState::Value => "value",
                    ObjectState::CommaOrEnd => "comma-or-end",
                },
            ),
            StructuralState::List(s) => (
                "list",
                match s {
                    ListState::ValueOrEnd => "value-or-end",
                    ListState::Value => "value",
                    ListState::CommaOrEnd => "comma-or-end",
                },
            ),
        };
        write!(f, "{production} {state}")
    }
}

/// Walks a token sequence produced by [`tokenize`](crate::tokenize). The validator only reads the
/// tokens; all progress lives in the cursor passed to [`Validator::object`] and
/// [`Validator::list`].
#[derive(Debug, Clone)]
pub struct Validator<'t> {
    tokens: &'t [Token],
    limits: Limits,
    depth: usize,
}

impl<'t> Validator<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_limits(tokens, Limits::default())
    }

    pub fn with_limits(tokens: &'t [Token], limits: Limits) -> Self {
        Self {
            tokens,
            limits,
            depth: 0,
        }
    }

    /// Validate a whole document: exactly one object, and nothing after it.
    pub fn document(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let Some(first) = tokens.first() else {
            return Err(ParseError::EmptyDocument);
        };

        if first.kind != TokenKind::LeftBrace {
            return Err(ParseError::NotAnObject {
                found: first.kind,
                text: first.text.clone(),
                pos: first.position(),
                span: first.span,
            });
        }

        let mut cursor = 1;
        self.object(&mut cursor)?;

        if let Some(extra) = tokens.get(cursor) {
            return Err(ParseError::TrailingTokens {
                found: extra.kind,
                text: extra.text.clone(),
                pos: extra.position(),
                span: extra.span,
            });
        }

        debug_assert_eq!(cursor, tokens.len());
        Ok(())
    }

    /// Validate the rest of an object whose `{` sits just before `cursor`. On success the cursor
    /// points one past the matching `}`. That object counts towards [`Limits::max_depth`].
    pub fn object(&mut self, cursor: &mut usize) -> Result<(), ParseError> {
        self.nested(cursor, Self::object_body)
    }

    /// Validate the rest of a list whose `[` sits just before `cursor`. On success the cursor
    /// points one past the matching `]`. That list counts towards [`Limits::max_depth`].
    pub fn list(&mut self, cursor: &mut usize) -> Result<(), ParseError> {
        self.nested(cursor, Self::list_body)
    }

    /// Count the container opened just before `cursor`, then run `body` over its contents.
    fn nested(
        &mut self,
        cursor: &mut usize,
        body: fn(&mut Self, &mut usize) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        if self.depth >= self.limits.max_depth {
            let (pos, span) = self.opener(*cursor);
            return Err(ParseError::NestingTooDeep {
                limit: self.limits.max_depth,
                pos,
                span,
            });
        }

        self.depth += 1;
        body(self, cursor)?;
        self.depth -= 1;
        Ok(())
    }

    fn object_body(&mut self, cursor: &mut usize) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let opened = *cursor;
        let mut state = ObjectState::KeyOrEnd;
        // Keys are compared on their verbatim lexeme and only within this object.
        let mut keys: IndexMap<&'t str, &'t Token> = IndexMap::new();

        trace!(cursor = *cursor, depth = self.depth, "object");

        while let Some(token) = tokens.get(*cursor) {
            *cursor += 1;
            state = match (state, token.kind) {
                (ObjectState::KeyOrEnd | ObjectState::Key, TokenKind::StringLiteral) => {
                    match keys.entry(token.text.as_str()) {
                        Entry::Occupied(first) => {
                            let first = *first.get();
                            return Err(ParseError::DuplicateKey {
                                key: token.text.clone(),
                                pos: token.position(),
                                span: token.span,
                                first_pos: first.position(),
                                first_span: first.span,
                            });
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(token);
                        }
                    }
                    ObjectState::Colon
                }
                (ObjectState::KeyOrEnd | ObjectState::CommaOrEnd, TokenKind::RightBrace) => {
                    return Ok(())
                }
                (ObjectState::Colon, TokenKind::Colon) => ObjectState::Value,
                (ObjectState::Value, _) => {
                    if !self.value(token, cursor)? {
                        return Err(unexpected(StructuralState::Object(state), token));
                    }
                    ObjectState::CommaOrEnd
                }
                (ObjectState::CommaOrEnd, TokenKind::Comma) => ObjectState::Key,
                (state, _) => return Err(unexpected(StructuralState::Object(state), token)),
            };
        }

        let (pos, span) = self.opener(opened);
        Err(ParseError::UnterminatedObject { pos, span })
    }

    fn list_body(&mut self, cursor: &mut usize) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let opened = *cursor;
        let mut state = ListState::ValueOrEnd;

        trace!(cursor = *cursor, depth = self.depth, "list");

        while let Some(token) = tokens.get(*cursor) {
            *cursor += 1;
            state = match (state, token.kind) {
                (ListState::ValueOrEnd | ListState::CommaOrEnd, TokenKind::RightBracket) => {
                    return Ok(())
                }
                (ListState::ValueOrEnd | ListState::Value, _) => {
                    if !self.value(token, cursor)? {
                        return Err(unexpected(StructuralState::List(state), token));
                    }
                    ListState::CommaOrEnd
                }
                (ListState::CommaOrEnd, TokenKind::Comma) => ListState::Value,
                (ListState::CommaOrEnd, _) => {
                    return Err(unexpected(StructuralState::List(state), token))
                }
            };
        }

        let (pos, span) = self.opener(opened);
        Err(ParseError::UnterminatedList { pos, span })
    }

    /// Accept `token` (already consumed) as the start of a value, recursing into containers.
    /// Returns `Ok(false)` if the token cannot start a value at all.
    fn value(&mut self, token: &Token, cursor: &mut usize) -> Result<bool, ParseError> {
        match token.kind {
            TokenKind::LeftBrace => self.object(cursor)?,
            TokenKind::LeftBracket => self.list(cursor)?,
            kind if kind.is_scalar() => {}
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Location of the delimiter just before token index `opened`.
    fn opener(&self, opened: usize) -> (Position, Span) {
        opened
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or((Position::default(), Span::default()), |t| {
                (t.position(), t.span)
            })
    }
}

fn unexpected(state: StructuralState, token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        state,
        expected: state.expected(),
        found: token.kind,
        text: token.text.clone(),
        pos: token.position(),
        span: token.span,
    }
}

/// Validate a complete token sequence as a document.
pub fn validate_document(tokens: &[Token]) -> Result<(), ParseError> {
    Validator::new(tokens).document()
}

/// Validate an object whose opening `{` has already been consumed, advancing `cursor` past its
/// closing `}`.
pub fn validate_object(tokens: &[Token], cursor: &mut usize) -> Result<(), ParseError> {
    Validator::new(tokens).object(cursor)
}

/// Validate a list whose opening `[` has already been consumed, advancing `cursor` past its
/// closing `]`.
pub fn validate_list(tokens: &[Token], cursor: &mut usize) -> Result<(), ParseError> {
    Validator::new(tokens).list(cursor)
}
