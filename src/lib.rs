//! erbgen - build-time compiler for embedded Rust templates
//!
//! Type aliases of function pointer types marked with `// +erb` get a
//! generated writer function whose body is compiled from `<Name>.erb` in the
//! same directory. The generated functions land in `<stem>_gen.rs` next to
//! the scanned source file.
//!
//! # Example
//!
//! ```rust
//! use erbgen::template::{compile, Emitter};
//!
//! let body = compile("Hello, <%= name %>!", &Emitter::default()).unwrap();
//! assert_eq!(body.len(), 3);
//! assert!(body[1].contains("::erbgen::escape::html(&(name))"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod escape;
pub mod format;
pub mod report;
pub mod scan;
pub mod source;
pub mod template;

pub use config::{Config, ConfigError, FormatterConfig};
pub use emit::{GeneratedFunction, OutputUnit};
pub use error::ParseError;
pub use format::{FormatError, Formatter};
pub use report::{ErrorPolicy, Reporter};
pub use scan::{Eligible, ScanError};
pub use source::{RustSyntax, Syntax, SyntaxError};
pub use template::{Emitter, TemplateError};

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An annotated type has no companion template file
    #[error("template for `{name}` not found: {}", .path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    #[error("{}: {}", .path.display(), format_parse_errors(.errors))]
    Parse {
        path: PathBuf,
        text: String,
        errors: Vec<ParseError>,
    },

    #[error("{}: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("{}: {error}", .path.display())]
    Template {
        path: PathBuf,
        text: String,
        #[source]
        error: TemplateError,
    },

    #[error("{}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        text: String,
        #[source]
        source: ScanError,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot format {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{} errors: {}", .0.len(), format_errors(.0))]
    Multiple(Vec<GenerateError>),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_errors(errors: &[GenerateError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl GenerateError {
    /// Human-readable report, with source context for syntax errors
    pub fn report(&self) -> String {
        match self {
            GenerateError::Parse { path, text, errors } => errors
                .iter()
                .map(|e| e.format(text, &file_name(path)))
                .collect::<Vec<_>>()
                .join("\n"),
            GenerateError::Template { path, text, error } => error.format(text, &file_name(path)),
            GenerateError::Scan { path, text, source } => match source.span() {
                Some(span) => {
                    error::render_report(text, &file_name(path), span, &source.to_string(), None)
                }
                None => self.to_string(),
            },
            GenerateError::Multiple(errors) => errors
                .iter()
                .map(|e| e.report())
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }
}

/// Runs the scan, compile and emit pipeline over a directory
pub struct Generator {
    config: Config,
    syntax: Box<dyn Syntax>,
    emitter: Emitter,
    formatter: Option<Formatter>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            emitter: Emitter::new(config.writer.clone(), config.runtime.clone()),
            formatter: Formatter::from_config(&config.formatter),
            syntax: Box::new(RustSyntax),
            config,
        }
    }

    /// Replace the source parser/printer
    pub fn with_syntax(mut self, syntax: impl Syntax + 'static) -> Self {
        self.syntax = Box::new(syntax);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process every source file of a directory, returning the written
    /// output files
    pub fn run(&self, dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
        let mut reporter = Reporter::new(self.config.errors);
        let mut written = Vec::new();

        for path in self.source_files(dir)? {
            match self.generate_file(&path) {
                Ok(Some(output)) => written.push(output),
                Ok(None) => {}
                Err(err) => reporter.report(err)?,
            }
        }

        reporter.finish()?;
        Ok(written)
    }

    /// Source files of a directory in file name order, excluding generated
    /// output
    pub fn source_files(&self, dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
        let list_err = |source| GenerateError::ListDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(list_err)? {
            let path = entry.map_err(list_err)?.path();
            if path.is_file()
                && path.extension().is_some_and(|ext| ext == "rs")
                && !emit::is_output_file(&path, &self.config.output_suffix)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Compile one source file; `None` when it has no annotated types
    pub fn compile_file(&self, path: &Path) -> Result<Option<OutputUnit>, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file = match self.syntax.parse(path, text.clone()) {
            Ok(file) => file,
            Err(SyntaxError::Parse(errors)) => {
                return Err(GenerateError::Parse {
                    path: path.to_path_buf(),
                    text,
                    errors,
                })
            }
            Err(source) => {
                return Err(GenerateError::Syntax {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let eligible = scan::scan(self.syntax.as_ref(), &file, &self.config.annotation)
            .map_err(|source| GenerateError::Scan {
                path: path.to_path_buf(),
                text,
                source,
            })?;
        if eligible.is_empty() {
            return Ok(None);
        }

        let mut functions = Vec::with_capacity(eligible.len());
        for item in &eligible {
            functions.push(self.compile_function(path, item)?);
        }

        Ok(Some(OutputUnit {
            source_name: file_name(path),
            functions,
        }))
    }

    fn compile_function(
        &self,
        source: &Path,
        item: &Eligible,
    ) -> Result<GeneratedFunction, GenerateError> {
        let path = emit::template_path(source, &item.name, &self.config.template_extension);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(GenerateError::TemplateNotFound {
                    name: item.name.clone(),
                    path,
                })
            }
            Err(source) => return Err(GenerateError::Read { path, source }),
        };
        debug!("compiling {} for {}", path.display(), item.name);

        match template::compile(&text, &self.emitter) {
            Ok(body) => Ok(GeneratedFunction::new(item, body)),
            Err(error) => Err(GenerateError::Template { path, text, error }),
        }
    }

    /// Compile, write and format the output of one source file
    pub fn generate_file(&self, path: &Path) -> Result<Option<PathBuf>, GenerateError> {
        let Some(unit) = self.compile_file(path)? else {
            debug!("{}: nothing to generate", path.display());
            return Ok(None);
        };

        let output = emit::output_path(path, &self.config.output_suffix);
        std::fs::write(&output, unit.render()).map_err(|source| GenerateError::Write {
            path: output.clone(),
            source,
        })?;

        if let Some(formatter) = &self.formatter {
            formatter
                .run(&output)
                .map_err(|source| GenerateError::Format {
                    path: output.clone(),
                    source,
                })?;
        }

        info!(
            "wrote {} ({} function(s))",
            output.display(),
            unit.functions.len()
        );
        Ok(Some(output))
    }
}
