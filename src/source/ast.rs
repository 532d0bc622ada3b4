//! Declaration tree for scanned Rust source files

use std::path::{Path, PathBuf};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source text covered by a span, if the span is in range
    pub fn slice(&self, span: &Span) -> Option<&str> {
        self.text.get(span.clone())
    }
}

/// A top-level item together with the comment group directly above it
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Comments immediately preceding the item, with no blank line in between
    pub doc: Vec<Spanned<String>>,
    pub kind: DeclKind,
    pub span: Span,
}

impl Declaration {
    /// Type specs owned by this declaration
    pub fn type_specs(&self) -> &[TypeSpec] {
        match &self.kind {
            DeclKind::Type(spec) => std::slice::from_ref(spec),
            DeclKind::Other => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// `type Name<..> = ..;`
    Type(TypeSpec),
    /// Any other item; only its extent is recorded
    Other,
}

/// The name and underlying type of a type alias
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    /// Span of `pub` / `pub(..)`, if present
    pub visibility: Option<Span>,
    pub name: Spanned<String>,
    /// Span of the `<..>` parameter list, if present
    pub generics: Option<Span>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A function pointer type starting with the `fn` keyword
    Function,
    Other,
}
