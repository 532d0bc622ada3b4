//! Lexer for Rust source files using logos
//!
//! Only as much of Rust is recognised as the item grammar needs: comments are
//! kept (annotations live in them), blank lines are kept (they detach a
//! comment group from the following item), and literals are consumed whole so
//! that delimiters inside them do not unbalance the token trees.
//!
//! A comment that follows other tokens on its line belongs to that line and
//! never starts the comment group of the next item, so [`lex`] drops it.

use logos::{Lexer, Logos};

use crate::error::ParseError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f\x{FEFF}]+")]
pub enum Token {
    /// Two or more line breaks with only whitespace between them
    #[regex(r"\n[ \t\r\f]*\n[ \t\r\f\n]*")]
    Blank,

    /// Consumed by [`lex`], never handed to the grammar
    #[token("\n")]
    Newline,

    // Comments (kept, text includes the leading slashes)
    #[regex(r"//[^\r\n]*", |lex| lex.slice().to_string(), allow_greedy = true)]
    LineComment(String),

    #[token("/*", block_comment)]
    BlockComment(String),

    // Keywords the item grammar cares about
    #[token("type")]
    Type,
    #[token("fn")]
    Fn,
    #[token("pub")]
    Pub,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,

    // Punctuation (longer patterns first)
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("::")]
    PathSep,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token(";")]
    Semi,
    #[token("#")]
    Pound,
    #[token("!")]
    Bang,
    #[regex(r"[,.:+\-*/%^&|@?$~]")]
    Punct,

    // Literals - identifiers must come after keywords
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"'[\p{XID_Start}_]\p{XID_Continue}*")]
    Lifetime,

    #[regex(r#"b?"([^"\\]|\\(.|\n))*""#)]
    Str,

    #[regex(r##"b?r#*""##, raw_string)]
    RawStr,

    #[regex(r"b?'([^'\\\n]|\\[^\n][^'\n]*)'")]
    Char,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,
}

impl Token {
    /// Whether this token opens or closes a token tree
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            Token::BraceOpen
                | Token::BraceClose
                | Token::ParenOpen
                | Token::ParenClose
                | Token::BracketOpen
                | Token::BracketClose
        )
    }
}

/// Consume a (possibly nested) block comment after its opening `/*`
fn block_comment(lex: &mut Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let mut depth = 1usize;
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match (c, chars.peek().map(|&(_, next)| next)) {
            ('/', Some('*')) => {
                chars.next();
                depth += 1;
            }
            ('*', Some('/')) => {
                chars.next();
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 2);
                    return Some(lex.slice().to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Consume a raw string literal after its `r#*"` prefix
fn raw_string(lex: &mut Lexer<Token>) -> bool {
    let hashes = lex.slice().chars().filter(|&c| c == '#').count();
    let terminator = format!("\"{}", "#".repeat(hashes));
    match lex.remainder().find(&terminator) {
        Some(end) => {
            lex.bump(end + terminator.len());
            true
        }
        None => false,
    }
}

/// Lex input string into tokens with spans
///
/// Line breaks are consumed here; a comment after another token on the same
/// line is dropped. Characters outside the token set are errors.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Vec<ParseError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut line_start = true;

    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(Token::Newline) => line_start = true,
            Ok(Token::Blank) => {
                line_start = true;
                tokens.push((Token::Blank, span));
            }
            Ok(comment @ (Token::LineComment(_) | Token::BlockComment(_))) => {
                if line_start {
                    tokens.push((comment, span));
                }
            }
            Ok(tok) => {
                line_start = false;
                tokens.push((tok, span));
            }
            Err(()) => {
                let mut end = span.end.max(span.start + 1);
                while end < input.len() && !input.is_char_boundary(end) {
                    end += 1;
                }
                errors.push(ParseError::unrecognised(span.start..end.min(input.len())));
            }
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
