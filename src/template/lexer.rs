//! Two-state template lexer using logos
//!
//! Text mode and code mode are separate logos token sets; the lexer morphs
//! between them at `<%`/`<%=` and `%>`.

use logos::Logos;

use super::TemplateError;
use crate::source::ast::Spanned;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TextToken {
    #[token("<%")]
    Open,
    #[token("<%=")]
    OpenOutput,
    #[regex(r"[^<]+")]
    Literal,
    /// A `<` that does not open a code unit
    #[token("<")]
    Angle,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum CodeToken {
    #[token("%>")]
    Close,
    #[regex(r"[^%]+")]
    Code,
    /// A `%` that does not close the unit
    #[token("%")]
    Percent,
}

/// A template segment before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// A maximal literal run
    Text,
    /// A code unit; `inner` excludes the markers
    Code { output: bool, inner: Span },
}

/// Split template text into literal runs and code units, in document order
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Unit>>, TemplateError> {
    let mut units = Vec::new();
    let mut literal: Option<Span> = None;
    let mut text = TextToken::lexer(source);

    while let Some(token) = text.next() {
        match token {
            Ok(TextToken::Literal | TextToken::Angle) => {
                let span = text.span();
                literal = Some(match literal.take() {
                    Some(run) => run.start..span.end,
                    None => span,
                });
            }
            Ok(open @ (TextToken::Open | TextToken::OpenOutput)) => {
                if let Some(run) = literal.take() {
                    units.push(Spanned::new(Unit::Text, run));
                }
                let start = text.span().start;
                let inner_start = text.span().end;

                let mut code = text.morph::<CodeToken>();
                let mut close = None;
                while let Some(token) = code.next() {
                    match token {
                        Ok(CodeToken::Close) => {
                            close = Some(code.span());
                            break;
                        }
                        Ok(CodeToken::Code | CodeToken::Percent) => {}
                        Err(()) => return Err(TemplateError::lex(code.span())),
                    }
                }
                let Some(close) = close else {
                    return Err(TemplateError::unterminated(start..source.len()));
                };

                units.push(Spanned::new(
                    Unit::Code {
                        output: open == TextToken::OpenOutput,
                        inner: inner_start..close.start,
                    },
                    start..close.end,
                ));
                text = code.morph();
            }
            Err(()) => return Err(TemplateError::lex(text.span())),
        }
    }

    if let Some(run) = literal {
        units.push(Spanned::new(Unit::Text, run));
    }
    Ok(units)
}
