//! A strict JSON validator. It answers one question, "is this document valid, and if not, where
//! did it first break?", and builds no value tree along the way.
//!
//! Validation runs in two stages:
//!
//! 1. [`tokenize`] splits the input into positioned [`Token`]s. Strings and numbers are recognised
//!    by explicit finite-state scanners that consume one character at a time with a single
//!    character of lookahead.
//! 2. [`validate_document`] walks the tokens by recursive descent, with one state machine for
//!    objects and one for lists. Duplicate keys within an object, trailing commas, and anything
//!    other than a single top-level object are rejected.
//!
//! The first error in either stage is fatal and carries the line and column where it occurred.
//!
//! ```
//! use jsonvet_core::{validate_str, Error, ParseError};
//!
//! assert!(validate_str(r#"{"x": [1, 2, 3]}"#).is_ok());
//!
//! let err = validate_str(r#"{"a": 1, "a": 2}"#).unwrap_err();
//! assert!(matches!(err, Error::Parse(ParseError::DuplicateKey { .. })));
//! ```

mod error;
pub mod lexer;
mod source;
mod span;
mod token;
pub mod validator;

pub use error::{Error, Found, LexError, LexErrorKind, ParseError};
pub use lexer::{tokenize, LexState, Lexer};
pub use span::{Position, Span};
pub use token::{Token, TokenKind};
pub use validator::{
    validate_document, validate_list, validate_object, Limits, StructuralState, Validator,
};

/// Run both stages over `src` with the default [`Limits`].
pub fn validate_str(src: &str) -> Result<(), Error> {
    validate_str_with_limits(src, Limits::default())
}

pub fn validate_str_with_limits(src: &str, limits: Limits) -> Result<(), Error> {
    let tokens = tokenize(src)?;
    Validator::with_limits(&tokens, limits).document()?;
    Ok(())
}
