//! Error reporting boundary of a generation run

use log::error;
use serde::Deserialize;

use crate::GenerateError;

/// What a run does with an error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// The first error aborts the run
    #[default]
    FailFast,
    /// Errors are logged and the run continues with the next source file
    CollectAll,
}

/// Applies an [`ErrorPolicy`] to the errors of one run
#[derive(Debug)]
pub struct Reporter {
    policy: ErrorPolicy,
    errors: Vec<GenerateError>,
}

impl Reporter {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            errors: Vec::new(),
        }
    }

    /// Hand an error to the policy; `Err` means the run stops now
    pub fn report(&mut self, err: GenerateError) -> Result<(), GenerateError> {
        match self.policy {
            ErrorPolicy::FailFast => Err(err),
            ErrorPolicy::CollectAll => {
                error!("{}", err.report());
                self.errors.push(err);
                Ok(())
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Outcome of the run once every file was processed
    pub fn finish(mut self) -> Result<(), GenerateError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(GenerateError::Multiple(self.errors)),
        }
    }
}
