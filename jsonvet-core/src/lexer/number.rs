use std::fmt;

use super::{Dfa, Step};
use crate::error::LexErrorKind;

/// States of the number literal scanner, following the JSON number grammar:
///
/// ```text
/// number = [ "-" ] ( "0" | nonzero-digit *digit ) [ "." 1*digit ] [ ( "e" | "E" ) [ "+" | "-" ] 1*digit ]
/// ```
///
/// `Zero`, `Integer`, `Fraction` and `ExponentDigits` may end the number: the first character
/// that does not extend it is left in the stream for the next token. Every other state needs
/// one more specific character and fails otherwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NumberState {
    Start,
    Minus,
    Zero,
    Integer,
    Dot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl Dfa for NumberState {
    const START: Self = NumberState::Start;

    fn step(self, next: Option<char>) -> Step<Self> {
        use NumberState::*;

        match (self, next) {
            (Start, Some('-')) => Step::Shift(Minus),
            (Start | Minus, Some('0')) => Step::Shift(Zero),
            (Start | Minus, Some('1'..='9')) => Step::Shift(Integer),
            (Start | Minus, _) => Step::Reject(LexErrorKind::MalformedNumber),

            (Zero, Some('0'..='9')) => Step::Reject(LexErrorKind::LeadingZero),
            (Integer, Some('0'..='9')) => Step::Shift(Integer),
            (Zero | Integer, Some('.')) => Step::Shift(Dot),

            (Dot | Fraction, Some('0'..='9')) => Step::Shift(Fraction),
            (Dot, _) => Step::Reject(LexErrorKind::MalformedNumber),

            (Zero | Integer | Fraction, Some('e' | 'E')) => Step::Shift(Exponent),
            (Exponent, Some('+' | '-')) => Step::Shift(ExponentSign),
            (Exponent | ExponentSign | ExponentDigits, Some('0'..='9')) => {
                Step::Shift(ExponentDigits)
            }
            (Exponent | ExponentSign, _) => Step::Reject(LexErrorKind::MalformedNumber),

            (Zero | Integer | Fraction | ExponentDigits, _) => Step::Accept,
        }
    }
}

impl fmt::Display for NumberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberState::Start => "start",
            NumberState::Minus => "after-minus",
            NumberState::Zero => "after-zero",
            NumberState::Integer => "in-integer",
            NumberState::Dot => "after-decimal-point",
            NumberState::Fraction => "in-fraction",
            NumberState::Exponent => "after-exponent-marker",
            NumberState::ExponentSign => "after-exponent-sign",
            NumberState::ExponentDigits => "in-exponent",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the accepted prefix of `input`.
    fn scan(input: &str) -> Result<&str, (NumberState, LexErrorKind)> {
        let mut state = NumberState::START;
        let mut len = 0;
        let mut chars = input.chars();
        loop {
            let next = chars.clone().next();
            match state.step(next) {
                Step::Shift(s) => {
                    chars.next();
                    len += next.map_or(0, char::len_utf8);
                    state = s;
                }
                Step::Accept => return Ok(&input[..len]),
                Step::Reject(kind) => return Err((state, kind)),
            }
        }
    }

    #[test]
    fn test_valid_numbers() {
        let cases = [
            "0", "-0", "7", "1234", "-1234", "0.5", "1.0", "-0.25", "1e5", "1E5", "1e+5", "1e-5",
            "0e1", "12.5e10", "1.25E-003",
        ];

        for case in cases {
            assert_eq!(scan(case), Ok(case));
        }
    }

    #[test]
    fn test_boundary_is_left_for_next_token() {
        assert_eq!(scan("12,"), Ok("12"));
        assert_eq!(scan("0]"), Ok("0"));
        assert_eq!(scan("1.5}"), Ok("1.5"));
        assert_eq!(scan("3e2 "), Ok("3e2"));
        assert_eq!(scan("4\n"), Ok("4"));
        // The lexer rejects the `a` afterwards; the number itself is fine.
        assert_eq!(scan("1a"), Ok("1"));
    }

    #[test]
    fn test_leading_zero() {
        assert_eq!(scan("01"), Err((NumberState::Zero, LexErrorKind::LeadingZero)));
        assert_eq!(scan("-01"), Err((NumberState::Zero, LexErrorKind::LeadingZero)));
        assert_eq!(scan("00"), Err((NumberState::Zero, LexErrorKind::LeadingZero)));
    }

    #[test]
    fn test_incomplete_numbers() {
        let cases = [
            ("-", NumberState::Minus),
            ("-a", NumberState::Minus),
            ("1.", NumberState::Dot),
            ("1.e5", NumberState::Dot),
            ("1e", NumberState::Exponent),
            ("1e+", NumberState::ExponentSign),
            ("1E-x", NumberState::ExponentSign),
            ("1ex", NumberState::Exponent),
        ];

        for (source, state) in cases {
            assert_eq!(
                scan(source),
                Err((state, LexErrorKind::MalformedNumber)),
                "{source}"
            );
        }
    }
}
