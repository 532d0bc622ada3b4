//! Assembly of generated functions and output files

use std::path::{Path, PathBuf};

use crate::scan::Eligible;
use crate::template::transform::RESULT_VAR;

/// Prefix of every generated function name
pub const FUNCTION_PREFIX: &str = "Write";

/// One generated writer function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    pub name: String,
    pub visibility: Option<String>,
    pub generics: Option<String>,
    /// Parameters and return type, without the `fn` keyword
    pub signature: String,
    pub body: Vec<String>,
}

impl GeneratedFunction {
    pub fn new(eligible: &Eligible, body: Vec<String>) -> Self {
        Self {
            name: format!("{}{}", FUNCTION_PREFIX, eligible.name),
            visibility: eligible.visibility.clone(),
            generics: eligible.generics.clone(),
            signature: strip_fn_keyword(&eligible.signature).to_string(),
            body,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.visibility {
            Some(vis) => {
                out.push_str(vis);
                out.push(' ');
            }
            // Callable from the module that declared the alias
            None => out.push_str("pub(super) "),
        }
        out.push_str("fn ");
        out.push_str(&self.name);
        if let Some(generics) = &self.generics {
            out.push_str(generics);
        }
        out.push_str(&self.signature);
        out.push_str(" {\n");
        out.push_str(&format!(
            "let mut {}: ::std::io::Result<()> = ::std::result::Result::Ok(());\n",
            RESULT_VAR
        ));
        for line in &self.body {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!(
            "{}.map_err(::std::convert::Into::into)\n}}\n",
            RESULT_VAR
        ));
        out
    }
}

/// Everything generated from one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// File name of the scanned source, for the header comment
    pub source_name: String,
    pub functions: Vec<GeneratedFunction>,
}

impl OutputUnit {
    pub fn render(&self) -> String {
        let mut out = format!(
            "// Autogenerated by erbgen from {}. Do not edit.\n\
             #![allow(non_snake_case, redundant_semicolons, unused_imports, unused_mut, unused_variables)]\n\
             \n\
             use super::*;\n\
             \n",
            self.source_name
        );
        let functions: Vec<String> = self.functions.iter().map(|f| f.render()).collect();
        out.push_str(&functions.join("\n"));
        out
    }
}

/// Remove the leading `fn` keyword of a function pointer type
pub fn strip_fn_keyword(signature: &str) -> &str {
    let trimmed = signature.trim_start();
    trimmed.strip_prefix("fn").unwrap_or(trimmed).trim_start()
}

/// `<dir>/<stem><suffix>.rs` next to the source file
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{}{}.rs", stem, suffix))
}

/// `<dir>/<name>.<extension>` next to the source file
pub fn template_path(source: &Path, name: &str, extension: &str) -> PathBuf {
    source.with_file_name(format!("{}.{}", name, extension))
}

/// Whether a file name is itself generated output
pub fn is_output_file(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}
