//! Error types for parsing and diagnostics

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::source::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Syntax error in a Rust source file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Input the lexer has no token for
    pub fn unrecognised(span: Span) -> Self {
        ParseError::Syntax {
            span,
            message: "unrecognised character".to_string(),
            expected: vec![],
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let note = if expected.is_empty() {
                    None
                } else {
                    Some(format!("expected {}", expected.join(", ")))
                };
                render_report(source, filename, span, message, note.as_deref())
            }
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let message = match err.reason() {
            RichReason::Custom(msg) => msg.to_string(),
            _ => match err.found() {
                Some(tok) => format!("unexpected {}", format_token(tok)),
                None => "unexpected end of input".to_string(),
            },
        };

        let expected = err
            .expected()
            .filter_map(|pattern| match pattern {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                _ => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Render a single-label ariadne report into a string.
///
/// Falls back to the bare message if the report cannot be written.
pub fn render_report(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    note: Option<&str>,
) -> String {
    let mut buf = Vec::new();
    let label = Label::new((filename, span.clone()))
        .with_message(message)
        .with_color(Color::Red);
    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(label);
    if let Some(note) = note {
        report = report.with_note(note);
    }
    match report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
    {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format!("{filename}: {message}"),
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::LineComment(_) | Token::BlockComment(_) => "comment".to_string(),
        Token::Blank => "blank line".to_string(),
        Token::Type => "keyword 'type'".to_string(),
        Token::Fn => "keyword 'fn'".to_string(),
        Token::Pub => "keyword 'pub'".to_string(),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Lt => "'<'".to_string(),
        Token::Gt => "'>'".to_string(),
        Token::Eq => "'='".to_string(),
        Token::Semi => "';'".to_string(),
        Token::Pound => "'#'".to_string(),
        Token::Bang => "'!'".to_string(),
        other => format!("{:?}", other),
    }
}
