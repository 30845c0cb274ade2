use std::ops::Range;

use ariadne::{Color, Fmt, Label, Report, ReportKind};
use jsonvet_core::{Error, LexError, LexErrorKind, ParseError, Span};

pub type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

fn label(path: &String, span: Span) -> Label<(&String, Range<usize>)> {
    Label::new((path, span.into_range()))
}

pub fn error_report<'a>(path: &'a String, err: &Error) -> DiagnosticReport<'a> {
    match err {
        Error::Lex(e) => lex_report(path, e),
        Error::Parse(e) => parse_report(path, e),
    }
}

fn lex_report<'a>(path: &'a String, err: &LexError) -> DiagnosticReport<'a> {
    let report = Report::build(ReportKind::Error, path, err.span.lo)
        .with_message(format!("{} at {}", err.kind, err.pos))
        .with_label(
            label(path, err.span)
                .with_message(format!(
                    "found {} in {} state",
                    err.found.to_string().fg(Color::Red),
                    err.state
                ))
                .with_color(Color::Red),
        );

    let help = match &err.kind {
        LexErrorKind::UnexpectedCharacter => {
            Some("strings and keys must be double-quoted; keywords are lowercase".to_string())
        }
        LexErrorKind::ControlCharacter => {
            Some("escape control characters, e.g. `\\n` or `\\t`".to_string())
        }
        LexErrorKind::MalformedKeyword { expected } => {
            Some(format!("did you mean `{}`?", expected.fg(Color::Blue)))
        }
        LexErrorKind::LeadingZero => Some("remove the leading zero".to_string()),
        _ => None,
    };

    match help {
        Some(help) => report.with_help(help).finish(),
        None => report.finish(),
    }
}

fn parse_report<'a>(path: &'a String, err: &ParseError) -> DiagnosticReport<'a> {
    let offset = err.span().map_or(0, |span| span.lo);
    let report = Report::build(ReportKind::Error, path, offset).with_message(err.to_string());

    match err {
        ParseError::EmptyDocument => report
            .with_help("a document must contain exactly one object, e.g. `{}`")
            .finish(),
        ParseError::NotAnObject { text, span, .. } => report
            .with_label(
                label(path, *span)
                    .with_message(format!("`{}` is not an object", text.fg(Color::Red)))
                    .with_color(Color::Red),
            )
            .finish(),
        ParseError::UnexpectedToken {
            expected,
            text,
            span,
            ..
        } => report
            .with_label(
                label(path, *span)
                    .with_message(format!(
                        "found `{}`, expected {}",
                        text.fg(Color::Red),
                        expected
                    ))
                    .with_color(Color::Red),
            )
            .finish(),
        ParseError::DuplicateKey {
            key,
            span,
            first_span,
            ..
        } => report
            .with_label(
                label(path, *first_span)
                    .with_message(format!("{} first defined here", key.fg(Color::Blue)))
                    .with_color(Color::Yellow),
            )
            .with_label(
                label(path, *span)
                    .with_message(format!("{} later redefined here", key.fg(Color::Blue)))
                    .with_color(Color::Red),
            )
            .with_help("keys must be unique within an object")
            .finish(),
        ParseError::UnterminatedObject { span, .. } => report
            .with_label(
                label(path, *span)
                    .with_message("this object is never closed")
                    .with_color(Color::Red),
            )
            .with_help(format!("add a matching `{}`", "}".fg(Color::Blue)))
            .finish(),
        ParseError::UnterminatedList { span, .. } => report
            .with_label(
                label(path, *span)
                    .with_message("this list is never closed")
                    .with_color(Color::Red),
            )
            .with_help(format!("add a matching `{}`", "]".fg(Color::Blue)))
            .finish(),
        ParseError::TrailingTokens { span, .. } => report
            .with_label(
                label(path, *span)
                    .with_message("the document already ended")
                    .with_color(Color::Red),
            )
            .finish(),
        ParseError::NestingTooDeep { limit, span, .. } => report
            .with_label(
                label(path, *span)
                    .with_message(format!("opens level {}", limit + 1))
                    .with_color(Color::Red),
            )
            .with_help("raise `max_depth` in the config or pass `--max-depth`")
            .finish(),
    }
}
