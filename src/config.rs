//! Generator configuration
//!
//! Settings are read from an optional `erbgen.toml` in the scanned
//! directory. Every key is optional:
//!
//! ```toml
//! annotation = "// +erb"
//! template_extension = "erb"
//! output_suffix = "_gen"
//! writer = "writer"
//! runtime = "::erbgen::escape"
//! errors = "fail-fast"      # or "collect-all"
//!
//! [formatter]
//! enabled = true
//! command = "rustfmt"
//! args = ["--edition", "2021"]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::report::ErrorPolicy;

/// Name of the configuration file looked up in the scanned directory
pub const CONFIG_FILE: &str = "erbgen.toml";

/// Errors that can occur when loading or parsing the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings of the post-write formatter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "rustfmt".to_string(),
            args: vec!["--edition".to_string(), "2021".to_string()],
        }
    }
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exact comment text that marks a type alias
    pub annotation: String,
    /// Extension of template files
    pub template_extension: String,
    /// Appended to the source file stem to name the output file
    pub output_suffix: String,
    /// Name of the writer parameter in annotated signatures
    pub writer: String,
    /// Module path of the escape helpers used by generated code
    pub runtime: String,
    pub errors: ErrorPolicy,
    pub formatter: FormatterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annotation: "// +erb".to_string(),
            template_extension: "erb".to_string(),
            output_suffix: "_gen".to_string(),
            writer: "writer".to_string(),
            runtime: "::erbgen::escape".to_string(),
            errors: ErrorPolicy::default(),
            formatter: FormatterConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `erbgen.toml` from a directory, falling back to defaults when
    /// the file does not exist
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    pub fn with_template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = extension.into();
        self
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    pub fn with_writer(mut self, writer: impl Into<String>) -> Self {
        self.writer = writer.into();
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn with_errors(mut self, policy: ErrorPolicy) -> Self {
        self.errors = policy;
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Disable the post-write formatter
    pub fn without_formatter(mut self) -> Self {
        self.formatter.enabled = false;
        self
    }
}
