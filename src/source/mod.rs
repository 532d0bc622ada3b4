//! Parser/printer capability for scanned source files
//!
//! The scanner only talks to [`Syntax`]; [`RustSyntax`] is the implementation
//! for Rust sources, built from a logos lexer and a chumsky item grammar.

pub mod ast;
mod grammar;
pub mod lexer;

use std::path::Path;

use thiserror::Error;

pub use ast::*;

use crate::error::ParseError;

/// Errors produced by a [`Syntax`] implementation
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The source text could not be parsed
    #[error("{} parse error(s)", .0.len())]
    Parse(Vec<ParseError>),

    /// A type node could not be printed back to text
    #[error("cannot print type at {span:?}")]
    Print { span: Span },
}

/// Parser/printer facility the declaration scanner is written against
pub trait Syntax {
    /// Parse a compilation unit
    fn parse(&self, path: &Path, text: String) -> Result<SourceFile, SyntaxError>;

    /// Declarations of a parsed file, in source order
    fn list_declarations<'f>(&self, file: &'f SourceFile) -> &'f [Declaration] {
        &file.declarations
    }

    /// Whether a declaration's comment group contains the exact marker text
    fn has_annotation(&self, decl: &Declaration, marker: &str) -> bool {
        decl.doc.iter().any(|comment| comment.node == marker)
    }

    /// Print a type node back to source text
    fn serialize_type(&self, file: &SourceFile, ty: &TypeNode) -> Result<String, SyntaxError>;
}

/// [`Syntax`] for Rust source files
#[derive(Debug, Clone, Copy, Default)]
pub struct RustSyntax;

impl Syntax for RustSyntax {
    fn parse(&self, path: &Path, text: String) -> Result<SourceFile, SyntaxError> {
        let declarations = grammar::parse(&text).map_err(SyntaxError::Parse)?;
        Ok(SourceFile {
            path: path.to_path_buf(),
            text,
            declarations,
        })
    }

    fn serialize_type(&self, file: &SourceFile, ty: &TypeNode) -> Result<String, SyntaxError> {
        file.slice(&ty.span)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| SyntaxError::Print {
                span: ty.span.clone(),
            })
    }
}
