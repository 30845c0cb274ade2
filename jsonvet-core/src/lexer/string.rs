use std::fmt;

use super::{Dfa, Step};
use crate::error::LexErrorKind;

/// Characters that may follow a backslash on their own.
const SIMPLE_ESCAPES: [char; 11] = ['a', 'b', 'f', 'n', 'r', 't', 'v', '\'', '"', '?', '\\'];

const UNICODE_ESCAPE_DIGITS: u8 = 4;

/// States of the string literal scanner. The scan ends on the closing quote itself, so a string
/// never needs a lookahead character past its end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StringState {
    /// Nothing consumed yet; only `"` is acceptable.
    Start,
    /// Inside the string body.
    Body,
    /// A backslash was consumed and the escape character is pending.
    Escape,
    /// Inside `\u`, holding the number of hex digits collected so far.
    Unicode(u8),
    Closed,
}

impl Dfa for StringState {
    const START: Self = StringState::Start;

    fn step(self, next: Option<char>) -> Step<Self> {
        use StringState::*;

        match (self, next) {
            (Start, Some('"')) => Step::Shift(Body),
            (Start, _) => Step::Reject(LexErrorKind::UnexpectedCharacter),

            (Body, Some('"')) => Step::Shift(Closed),
            (Body, Some('\\')) => Step::Shift(Escape),
            (Body, Some(c)) if u32::from(c) < 0x20 => {
                Step::Reject(LexErrorKind::ControlCharacter)
            }
            (Body, Some(_)) => Step::Shift(Body),

            (Escape, Some('u')) => Step::Shift(Unicode(0)),
            (Escape, Some(c)) if SIMPLE_ESCAPES.contains(&c) => Step::Shift(Body),
            (Escape, Some(_)) => Step::Reject(LexErrorKind::InvalidEscape),

            (Unicode(n), Some(c)) if c.is_ascii_hexdigit() => {
                if n + 1 == UNICODE_ESCAPE_DIGITS {
                    Step::Shift(Body)
                } else {
                    Step::Shift(Unicode(n + 1))
                }
            }
            (Unicode(_), _) => Step::Reject(LexErrorKind::InvalidUnicodeEscape),

            (Body | Escape, None) => Step::Reject(LexErrorKind::UnterminatedString),

            (Closed, _) => Step::Accept,
        }
    }

    fn is_final(self) -> bool {
        self == StringState::Closed
    }
}

impl fmt::Display for StringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringState::Start => f.write_str("before-open-quote"),
            StringState::Body => f.write_str("after-open-quote"),
            StringState::Escape => f.write_str("after-backslash"),
            StringState::Unicode(_) => f.write_str("in-unicode-escape"),
            StringState::Closed => f.write_str("closed"),
        }
    }
}
