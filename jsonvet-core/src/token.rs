use std::fmt;

use serde::Serialize;

use crate::span::{Position, Span};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,

    LeftBracket,
    RightBracket,

    Comma,
    Colon,

    True,
    False,
    Null,

    StringLiteral,
    NumberLiteral,
}

impl TokenKind {
    /// Kinds that form a complete value on their own.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral
                | TokenKind::NumberLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    pub(crate) fn from_punctuation(c: char) -> Option<TokenKind> {
        Some(match c {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            _ => return None,
        })
    }

    pub fn desc(self) -> &'static str {
        match self {
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::StringLiteral => "string",
            TokenKind::NumberLiteral => "number",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.desc())
    }
}

/// A classified lexeme. `text` is the exact source text, so string tokens keep their quotes and
/// escapes verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub col: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, pos: Position, span: Span) -> Self {
        Self {
            kind,
            text: text.to_string(),
            line: pos.line,
            col: pos.col,
            span,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }
}
