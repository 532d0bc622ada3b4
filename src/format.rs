//! External formatter run on each written output file

use std::path::Path;

use log::debug;
use thiserror::Error;
use xshell::Shell;

use crate::config::FormatterConfig;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("cannot start a shell for the formatter: {0}")]
    Shell(#[source] xshell::Error),
    #[error("formatter `{command}` failed: {source}")]
    Command {
        command: String,
        #[source]
        source: xshell::Error,
    },
}

/// A formatter command line; the file path is appended as the last argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    command: String,
    args: Vec<String>,
}

impl Formatter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The configured formatter, or `None` when formatting is disabled
    pub fn from_config(config: &FormatterConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.command.clone()).with_args(config.args.clone()))
    }

    /// Format a file in place; a failed start or non-zero exit is an error
    pub fn run(&self, path: &Path) -> Result<(), FormatError> {
        let sh = Shell::new().map_err(FormatError::Shell)?;
        debug!("running {} on {}", self.command, path.display());
        sh.cmd(&self.command)
            .args(&self.args)
            .arg(path)
            .quiet()
            .run()
            .map_err(|source| FormatError::Command {
                command: self.command.clone(),
                source,
            })
    }
}
