//! Splits input text into [`Token`]s.
//!
//! Punctuation and keywords are recognised directly. String and number literals are handed to
//! their own finite-state scanners ([`StringState`], [`NumberState`]), which are driven one
//! character at a time by [`Lexer::run`].

mod number;
mod string;

use std::fmt;

use tracing::*;

pub use number::NumberState;
pub use string::StringState;

use crate::error::{Found, LexError, LexErrorKind};
use crate::source::Source;
use crate::token::{Token, TokenKind};

/// Outcome of feeding one lookahead character (or end of input) to a scanner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<S> {
    /// Consume the character and continue in the given state.
    Shift(S),
    /// The lexeme is complete. The lookahead is not consumed and stays in the stream.
    Accept,
    /// The lexeme cannot be completed.
    Reject(LexErrorKind),
}

/// A character-level scanner for one lexeme class. Transitions are pure functions of the current
/// state and the lookahead; every scan starts fresh from [`Dfa::START`].
pub trait Dfa: Copy + Into<LexState> {
    const START: Self;

    fn step(self, next: Option<char>) -> Step<Self>;

    /// Whether the scan is over without needing to look at another character.
    fn is_final(self) -> bool {
        false
    }
}

/// Where the lexer was when it failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Looking for the start of the next token.
    Token,
    Keyword,
    String(StringState),
    Number(NumberState),
}

impl From<StringState> for LexState {
    fn from(state: StringState) -> Self {
        LexState::String(state)
    }
}

impl From<NumberState> for LexState {
    fn from(state: NumberState) -> Self {
        LexState::Number(state)
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexState::Token => f.write_str("between-tokens"),
            LexState::Keyword => f.write_str("keyword"),
            LexState::String(s) => write!(f, "string {s}"),
            LexState::Number(n) => write!(f, "number {n}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: Source<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            source: Source::new(src),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.source.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.source.bump();
        }
    }

    /// Produce the next token, or `Ok(None)` once only whitespace remains.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(c) = self.source.peek() else {
            return Ok(None);
        };

        let mark = self.source.mark();
        let kind = match c {
            '"' => {
                self.run::<StringState>()?;
                TokenKind::StringLiteral
            }
            '-' | '0'..='9' => {
                self.run::<NumberState>()?;
                TokenKind::NumberLiteral
            }
            't' => {
                self.keyword("true")?;
                TokenKind::True
            }
            'f' => {
                self.keyword("false")?;
                TokenKind::False
            }
            'n' => {
                self.keyword("null")?;
                TokenKind::Null
            }
            c => match TokenKind::from_punctuation(c) {
                Some(kind) => {
                    self.source.bump();
                    kind
                }
                None => {
                    return Err(self.reject(
                        LexErrorKind::UnexpectedCharacter,
                        LexState::Token,
                        Some(c),
                    ))
                }
            },
        };

        let token = Token::new(
            kind,
            self.source.slice_from(mark),
            mark.pos,
            self.source.span_from(mark),
        );
        trace!(?token);
        Ok(Some(token))
    }

    /// Drive a scanner from its start state until it accepts or rejects. Characters are only
    /// consumed on [`Step::Shift`], so an accepting scanner leaves its lookahead in the stream.
    fn run<D: Dfa>(&mut self) -> Result<(), LexError> {
        let mut state = D::START;
        while !state.is_final() {
            let next = self.source.peek();
            match state.step(next) {
                Step::Shift(to) => {
                    self.source.bump();
                    state = to;
                }
                Step::Accept => break,
                Step::Reject(kind) => return Err(self.reject(kind, state.into(), next)),
            }
        }
        Ok(())
    }

    /// Consume as many characters as `expected` has and require them to spell it exactly.
    fn keyword(&mut self, expected: &'static str) -> Result<(), LexError> {
        let mark = self.source.mark();
        for _ in expected.chars() {
            if self.source.bump().is_none() {
                break;
            }
        }

        let read = self.source.slice_from(mark);
        if read != expected {
            let err = LexError {
                kind: LexErrorKind::MalformedKeyword { expected },
                state: LexState::Keyword,
                found: Found::Text(read.to_string()),
                pos: mark.pos,
                span: self.source.span_from(mark),
            };
            debug!(%err);
            return Err(err);
        }
        Ok(())
    }

    /// Error for the character under the cursor, which has not been consumed.
    fn reject(&self, kind: LexErrorKind, state: LexState, next: Option<char>) -> LexError {
        let err = LexError {
            kind,
            state,
            found: next.into(),
            pos: self.source.position(),
            span: self.source.lookahead_span(),
        };
        debug!(%err);
        err
    }
}

/// Split the whole input into tokens. Whitespace-only input yields an empty sequence.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    debug!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}
