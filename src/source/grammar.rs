//! Item grammar for Rust source files using chumsky
//!
//! The grammar only distinguishes type aliases from every other item. Other
//! items are skipped as token trees: an item ends at a top-level `;` or at a
//! top-level brace group.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::source::ast::*;
use crate::source::lexer::Token;

/// Parse source text into its top-level declarations
pub fn parse(input: &str) -> Result<Vec<Declaration>, Vec<ParseError>> {
    let len = input.len();

    let tokens = crate::source::lexer::lex(input)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    file_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn file_parser<'a, I>() -> impl Parser<'a, I, Vec<Declaration>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Any balanced token tree
    let tree = recursive(|tree| {
        choice((
            tree.clone()
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
                .ignored(),
            tree.clone()
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
                .ignored(),
            tree.repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
                .ignored(),
            any().filter(|t: &Token| !t.is_delimiter()).ignored(),
        ))
    });

    let brace_group = tree
        .clone()
        .repeated()
        .collect::<Vec<()>>()
        .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
        .ignored();
    let paren_group = tree
        .clone()
        .repeated()
        .collect::<Vec<()>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
        .ignored();
    let bracket_group = tree
        .clone()
        .repeated()
        .collect::<Vec<()>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
        .ignored();

    // A piece of an item that cannot end it: no `;`, no brace group
    let item_piece = choice((
        paren_group.clone(),
        bracket_group.clone(),
        any()
            .filter(|t: &Token| !t.is_delimiter() && *t != Token::Semi)
            .ignored(),
    ));

    // A piece of a type: anything up to the terminating `;`
    let type_piece = choice((
        brace_group.clone(),
        paren_group.clone(),
        bracket_group.clone(),
        any()
            .filter(|t: &Token| !t.is_delimiter() && *t != Token::Semi)
            .ignored(),
    ));

    // Generic parameter list, balanced on angle brackets
    let generics = recursive(|generics| {
        choice((
            generics,
            brace_group.clone(),
            paren_group.clone(),
            bracket_group.clone(),
            any()
                .filter(|t: &Token| !t.is_delimiter() && !matches!(t, Token::Lt | Token::Gt))
                .ignored(),
        ))
        .repeated()
        .collect::<Vec<()>>()
        .delimited_by(just(Token::Lt), just(Token::Gt))
        .ignored()
    });

    let identifier = select! {
        Token::Ident(name) => name,
    }
    .map_with(|name, e| Spanned::new(name, span_range(&e.span())));

    let comment = select! {
        Token::LineComment(text) => text,
        Token::BlockComment(text) => text,
    }
    .map_with(|text, e| Spanned::new(text, span_range(&e.span())));

    let blank = just(Token::Blank).ignored();

    let attribute = just(Token::Pound)
        .then(just(Token::Bang).or_not())
        .then(bracket_group.clone())
        .ignored();

    let visibility = just(Token::Pub)
        .then(paren_group.clone().or_not())
        .map_with(|_, e| span_range(&e.span()));

    let type_node = just(Token::Fn)
        .or_not()
        .then(type_piece.repeated().collect::<Vec<()>>())
        .map_with(|(keyword, _), e| TypeNode {
            kind: if keyword.is_some() {
                TypeKind::Function
            } else {
                TypeKind::Other
            },
            span: span_range(&e.span()),
        });

    // Comments between attributes belong to the item's comment group
    let attributes = choice((
        attribute.clone().to(None),
        comment.clone().map(Some),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .map(|pieces| pieces.into_iter().flatten().collect::<Vec<_>>());

    let type_alias = attributes
        .then(visibility.or_not())
        .then_ignore(just(Token::Type))
        .then(identifier)
        .then(generics.map_with(|_, e| span_range(&e.span())).or_not())
        .then_ignore(just(Token::Eq))
        .then(type_node)
        .then_ignore(just(Token::Semi))
        .map(|((((comments, visibility), name), generics), ty)| {
            (
                comments,
                TypeSpec {
                    visibility,
                    name,
                    generics,
                    ty,
                },
            )
        });

    let other_item = item_piece
        .repeated()
        .collect::<Vec<()>>()
        .then(choice((just(Token::Semi).ignored(), brace_group)))
        .ignored();

    // `#![..]` has no terminator of its own
    let inner_attribute = just(Token::Pound)
        .then(just(Token::Bang))
        .then(bracket_group.clone())
        .ignored();

    let item = choice((
        type_alias.map(|(comments, spec)| (comments, DeclKind::Type(spec))),
        inner_attribute.to((Vec::new(), DeclKind::Other)),
        other_item.to((Vec::new(), DeclKind::Other)),
    ));

    // Comment groups followed by a blank line are detached from the item
    let detached = comment
        .clone()
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .then(blank.clone().repeated().at_least(1).collect::<Vec<()>>())
        .ignored();

    let doc = blank
        .clone()
        .repeated()
        .collect::<Vec<()>>()
        .ignore_then(detached.repeated().collect::<Vec<()>>())
        .ignore_then(comment.clone().repeated().collect::<Vec<_>>());

    let declaration = doc
        .then(item)
        .map_with(|(mut doc, (comments, kind)), e| {
            doc.extend(comments);
            Declaration {
                doc,
                kind,
                span: span_range(&e.span()),
            }
        })
        .boxed();

    declaration
        .repeated()
        .collect()
        .then_ignore(choice((comment.ignored(), blank)).repeated())
        .then_ignore(end())
}
