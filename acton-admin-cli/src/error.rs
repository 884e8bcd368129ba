//! Error types for the CRUD scaffold pipeline

use crate::pipeline::Step;
use thiserror::Error;

/// Boxed source error carried by collaborator and prompt failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that stop a scaffold run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The raw name does not contain any usable word
    #[error("The name '{raw}' does not contain any letters or digits.")]
    InvalidName {
        /// Name as typed by the user
        raw: String,
    },

    /// The derived class name collides with a reserved identifier
    #[error("The name '{name}' is reserved by PHP.")]
    NameReserved {
        /// Title-case name that was rejected
        name: String,
    },

    /// The validation strategy is not one of `request`, `array` or `field`
    #[error("The validation must be request, array or field. '{value}' is not valid.")]
    InvalidValidationStrategy {
        /// Offending value (empty when none could be obtained)
        value: String,
    },

    /// Reading the answer from the terminal failed
    #[error("Failed to read the validation strategy: {0}")]
    Prompt(#[source] BoxError),

    /// A collaborator reported failure; later steps were not run
    #[error("{step} failed: {source}")]
    Collaborator {
        /// Step that failed
        step: Step,
        /// Underlying failure
        #[source]
        source: BoxError,
    },
}

impl ScaffoldError {
    /// Wrap a collaborator failure for the given step
    #[must_use]
    pub fn collaborator(step: Step, source: anyhow::Error) -> Self {
        Self::Collaborator {
            step,
            source: source.into(),
        }
    }

    /// Whether the run stopped before any collaborator was invoked
    #[must_use]
    pub const fn is_early_exit(&self) -> bool {
        !matches!(self, Self::Collaborator { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_message_names_identifier() {
        let err = ScaffoldError::NameReserved {
            name: "Class".to_string(),
        };
        assert_eq!(err.to_string(), "The name 'Class' is reserved by PHP.");
        assert!(err.is_early_exit());
    }

    #[test]
    fn test_invalid_strategy_message_names_value() {
        let err = ScaffoldError::InvalidValidationStrategy {
            value: "json".to_string(),
        };
        assert!(err.to_string().contains("'json' is not valid"));
    }

    #[test]
    fn test_collaborator_error_keeps_source() {
        let err = ScaffoldError::collaborator(Step::Route, anyhow::anyhow!("routes file missing"));
        assert!(!err.is_early_exit());
        assert_eq!(err.to_string(), "Route registration failed: routes file missing");
        assert!(std::error::Error::source(&err).is_some());
    }
}
