//! Cross-checks the hand-written state machines against an independent combinator grammar for the
//! same JSON dialect: a top-level object, the extended escape set, no raw control characters in
//! strings.
//!
//! Adapted from: <https://github.com/zesterer/chumsky/blob/main/examples/json.rs>.
//!
//! Duplicate keys and nesting limits are not modelled by the grammar, so the corpus avoids them.

use chumsky::prelude::*;

use jsonvet_core::validate_str;

fn value<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> {
    recursive(|value| {
        let digits = text::digits(10).to_slice();

        let frac = just('.').then(digits.clone());

        let exp = just('e')
            .or(just('E'))
            .then(one_of("+-").or_not())
            .then(digits.clone());

        let number = just('-')
            .or_not()
            .then(text::int(10))
            .then(frac.or_not())
            .then(exp.or_not())
            .ignored()
            .boxed();

        let escape = just('\\')
            .then(choice((
                one_of("abfnrtv'\"?\\").ignored(),
                just('u').then(text::digits(16).exactly(4)).ignored(),
            )))
            .ignored()
            .boxed();

        let string = any()
            .filter(|c: &char| *c != '\\' && *c != '"' && u32::from(*c) >= 0x20)
            .ignored()
            .or(escape)
            .repeated()
            .delimited_by(just('"'), just('"'))
            .boxed();

        let array = value
            .clone()
            .separated_by(just(',').padded())
            .collect::<Vec<()>>()
            .padded()
            .delimited_by(just('['), just(']'))
            .ignored()
            .boxed();

        let member = string.clone().then_ignore(just(':').padded()).then(value);
        let object = member
            .separated_by(just(',').padded())
            .collect::<Vec<((), ())>>()
            .padded()
            .delimited_by(just('{'), just('}'))
            .ignored()
            .boxed();

        choice((
            just("null").ignored(),
            just("true").ignored(),
            just("false").ignored(),
            number,
            string,
            array,
            object,
        ))
        .padded()
    })
}

fn reference_accepts(src: &str) -> bool {
    let starts_with_object = src
        .trim_start_matches([' ', '\t', '\n', '\r'])
        .starts_with('{');
    let (output, errors) = value().then_ignore(end()).parse(src).into_output_errors();
    starts_with_object && output.is_some() && errors.is_empty()
}

const CORPUS: &[&str] = &[
    "{}",
    " { } ",
    "{\n}\n",
    r#"{"a":1}"#,
    r#"{"a": [1, 2.5, -3e2, 0, -0.0, 1E+9]}"#,
    r#"{"k": {"n": {"m": [[], {}, [{}]]}}}"#,
    r#"{"t": true, "f": false, "z": null}"#,
    r#"{"esc": "\n\t\\\"\a\v\'\?"}"#,
    r#"{"é": "ünïcödé"}"#,
    "",
    "   ",
    "[]",
    "[1, 2]",
    "\"top\"",
    "42",
    "null",
    "{} {}",
    "{}}",
    r#"{"a":1,}"#,
    r#"{"a":[1,2,]}"#,
    r#"{"a" 1}"#,
    r#"{"a":}"#,
    r#"{a:1}"#,
    r#"{"a":01}"#,
    r#"{"a":-01}"#,
    r#"{"a":1.}"#,
    r#"{"a":.5}"#,
    r#"{"a":1e}"#,
    r#"{"a":1e+}"#,
    r#"{"a":-}"#,
    r#"{"a":+1}"#,
    r#"{"a":tru}"#,
    r#"{"a":nulll}"#,
    r#"{"a":True}"#,
    r#"{"a":"unterminated}"#,
    r#"{"a":"bad \x escape"}"#,
    r#"{"a":"\/"}"#,
    "{\"a\":\"raw\ttab\"}",
    r#"{"a":[1 2]}"#,
    r#"{"a":[1,,2]}"#,
    r#"{"a":1 "b":2}"#,
    r#"{"a":['x']}"#,
    "{\"a\":[",
    "{\"a\":1",
    "[",
    "{",
];

#[test]
fn agrees_with_reference_grammar() {
    for src in CORPUS {
        assert_eq!(
            validate_str(src).is_ok(),
            reference_accepts(src),
            "disagreement on {src:?}: {:?}",
            validate_str(src)
        );
    }
}

#[test]
fn agrees_on_unicode_escapes() {
    let good = format!(r#"{{"a":"{}0041{}00e9"}}"#, "\\u", "\\u");
    let short = format!(r#"{{"a":"{}00"}}"#, "\\u");
    let not_hex = format!(r#"{{"a":"{}00g0"}}"#, "\\u");

    for src in [good, short, not_hex] {
        assert_eq!(validate_str(&src).is_ok(), reference_accepts(&src), "{src}");
    }
}

#[test]
fn corpus_contains_both_verdicts() {
    let accepted = CORPUS.iter().filter(|s| validate_str(s).is_ok()).count();
    assert!(accepted >= 9);
    assert!(accepted < CORPUS.len());
}
