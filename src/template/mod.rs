//! Template compiler
//!
//! Turns embedded-template text into the body of a generated writer function.
//!
//! # Example
//!
//! ```text
//! <h1><%= model.title %></h1>
//! <% for item in &model.items { %>
//! <li><%= item %></li>
//! <% } %>
//! ```
//!
//! `<% .. %>` runs code, `<%= .. %>` writes an HTML-escaped value, and the
//! `=`, `u` and `h` prefixes inside an output unit select raw output, URL
//! encoding and explicit HTML escaping.
//!
//! The prefix is the first character after leading whitespace, so an
//! expression that itself starts with `u` or `h` loses that letter:
//! `<%= user %>` URL-encodes `ser`. Write `<%= huser %>` or
//! `<%= (user) %>` instead.

pub mod lexer;
pub mod transform;
mod trim;

use thiserror::Error;

use crate::error::{render_report, Span};
use crate::source::ast::Spanned;

pub use lexer::Unit;
pub use transform::Emitter;
pub use trim::suppress_blank_lines;

/// Errors in template syntax
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// `<%` or `<%=` without a matching `%>`
    #[error("unterminated code unit")]
    Unterminated { span: Span },

    /// `<%= %>` with nothing to write
    #[error("output unit has no expression")]
    EmptyExpression { span: Span },

    /// Input the lexer could not classify
    #[error("unrecognised template input")]
    Lex { span: Span },
}

impl TemplateError {
    pub fn unterminated(span: Span) -> Self {
        Self::Unterminated { span }
    }

    pub fn empty_expression(span: Span) -> Self {
        Self::EmptyExpression { span }
    }

    pub fn lex(span: Span) -> Self {
        Self::Lex { span }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::Unterminated { span } | Self::EmptyExpression { span } | Self::Lex { span } => {
                span
            }
        }
    }

    /// Format the error with template context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let note = match self {
            Self::Unterminated { .. } => Some("close the unit with `%>`"),
            Self::EmptyExpression { .. } => {
                Some("write `<%= expr %>`, `<%= =expr %>`, `<%= uexpr %>` or `<%= hexpr %>`")
            }
            Self::Lex { .. } => None,
        };
        render_report(source, filename, self.span(), &self.to_string(), note)
    }
}

/// How an output value is sanitised before it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeMode {
    /// Written unchanged
    Raw,
    /// `application/x-www-form-urlencoded`
    UrlEncode,
    /// HTML escaping requested with the `h` prefix
    HtmlEscapeExplicit,
    /// HTML escaping applied when no prefix is given
    HtmlEscapeDefault,
}

/// A code region of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeUnit {
    /// Executed for its side effect only
    Statement(String),
    /// Evaluated and written
    Output { mode: EscapeMode, expr: String },
}

/// A classified template segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Text(String),
    Code(CodeUnit),
}

/// Pick the escape mode of an output unit from the first character after
/// leading whitespace, returning the expression with any prefix removed
fn classify_output(inner: &str) -> (EscapeMode, &str) {
    let rest = inner.trim_start();
    let mode = match rest.chars().next() {
        Some('=') => EscapeMode::Raw,
        Some('u') => EscapeMode::UrlEncode,
        Some('h') => EscapeMode::HtmlEscapeExplicit,
        _ => return (EscapeMode::HtmlEscapeDefault, rest.trim()),
    };
    (mode, rest[1..].trim())
}

fn classify(source: &str, unit: &Spanned<Unit>) -> Result<TemplateToken, TemplateError> {
    match &unit.node {
        Unit::Text => Ok(TemplateToken::Text(source[unit.span.clone()].to_string())),
        Unit::Code {
            output: false,
            inner,
        } => Ok(TemplateToken::Code(CodeUnit::Statement(
            source[inner.clone()].trim().to_string(),
        ))),
        Unit::Code {
            output: true,
            inner,
        } => {
            let (mode, expr) = classify_output(&source[inner.clone()]);
            if expr.is_empty() {
                return Err(TemplateError::empty_expression(unit.span.clone()));
            }
            Ok(TemplateToken::Code(CodeUnit::Output {
                mode,
                expr: expr.to_string(),
            }))
        }
    }
}

/// Tokenize template text, suppress statement-line padding, and classify
/// every segment
pub fn tokens(source: &str) -> Result<Vec<TemplateToken>, TemplateError> {
    let units = lexer::tokenize(source)?;
    suppress_blank_lines(source, units)
        .iter()
        .map(|unit| classify(source, unit))
        .collect()
}

/// Compile template text into the statements of a function body
pub fn compile(source: &str, emitter: &Emitter) -> Result<Vec<String>, TemplateError> {
    Ok(emitter.body(&tokens(source)?))
}
