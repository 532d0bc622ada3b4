//! Annotation-gated discovery of template-backed type aliases

use log::debug;
use thiserror::Error;

use crate::error::Span;
use crate::source::{SourceFile, Syntax, SyntaxError, TypeKind};

/// Errors raised while scanning a parsed file
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("annotated type `{name}` is not a function pointer type")]
    NotAFunctionType { name: String, span: Span },

    #[error("cannot serialize signature of `{name}`: {source}")]
    Syntax {
        name: String,
        #[source]
        source: SyntaxError,
    },
}

impl ScanError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            ScanError::NotAFunctionType { span, .. } => Some(span),
            ScanError::Syntax { .. } => None,
        }
    }
}

/// An annotated type alias that gets a generated function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligible {
    pub name: String,
    /// `pub`, `pub(crate)`, ... as written; `None` for a private alias
    pub visibility: Option<String>,
    /// `<..>` as written
    pub generics: Option<String>,
    /// The aliased type, starting with `fn`
    pub signature: String,
    pub span: Span,
}

/// Collect every eligible type alias of a file in declaration order
pub fn scan(
    syntax: &dyn Syntax,
    file: &SourceFile,
    marker: &str,
) -> Result<Vec<Eligible>, ScanError> {
    let mut found = Vec::new();

    for decl in syntax.list_declarations(file) {
        if !syntax.has_annotation(decl, marker) {
            continue;
        }
        for spec in decl.type_specs() {
            let name = spec.name.node.clone();
            if spec.ty.kind != TypeKind::Function {
                return Err(ScanError::NotAFunctionType {
                    name,
                    span: spec.ty.span.clone(),
                });
            }
            let signature = syntax
                .serialize_type(file, &spec.ty)
                .map_err(|source| ScanError::Syntax {
                    name: name.clone(),
                    source,
                })?;
            debug!("{}: found annotated type {}", file.path().display(), name);

            found.push(Eligible {
                visibility: spec
                    .visibility
                    .as_ref()
                    .and_then(|span| file.slice(span))
                    .map(str::to_string),
                generics: spec
                    .generics
                    .as_ref()
                    .and_then(|span| file.slice(span))
                    .map(str::to_string),
                name,
                signature,
                span: spec.name.span.clone(),
            });
        }
    }

    Ok(found)
}
