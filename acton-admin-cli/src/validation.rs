//! Validation strategy selection
//!
//! The generated controller expresses its create/update validation rules in
//! one of three ways. The strategy comes from `--validation` or, when the flag
//! is absent and a terminal is attached, from an interactive question.

use crate::error::ScaffoldError;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question asked when `--validation` is missing
pub const QUESTION: &str =
    "How would you like to enter your validation rules for the Create and Update Operations?";

/// Extra lines printed above the question
pub const HINTS: [&str; 2] = [
    "More info at https://backpackforlaravel.com/docs/crud-operation-create#validation",
    "Valid options are request, array or field",
];

/// Where the generated controller declares its validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStrategy {
    /// Dedicated form request class
    #[default]
    Request,
    /// Inline rules array in the controller
    Array,
    /// Rules declared on each field
    Field,
}

impl ValidationStrategy {
    /// All strategies in the order they are offered
    pub const ALL: [Self; 3] = [Self::Request, Self::Array, Self::Field];

    /// Textual form used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Array => "array",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for ValidationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStrategy {
    type Err = ScaffoldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == value)
            .ok_or_else(|| ScaffoldError::InvalidValidationStrategy {
                value: value.to_string(),
            })
    }
}

/// Source of interactive answers
pub trait Prompt {
    /// Ask `question`, showing `hints` first; an empty answer yields `default`
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn ask(&self, question: &str, hints: &[&str], default: &str) -> anyhow::Result<String>;
}

/// Prompt backed by the attached terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str, hints: &[&str], default: &str) -> anyhow::Result<String> {
        println!();
        for hint in hints {
            println!("  {}", style(hint).dim());
        }

        let theme = ColorfulTheme::default();
        let answer = Input::<String>::with_theme(&theme)
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()?;

        Ok(answer.trim().to_string())
    }
}

/// Resolve the validation strategy
///
/// An explicit value always wins. Without one, `prompt` is asked; when there
/// is no prompt (non-interactive run) resolution fails the same way an
/// invalid value does.
///
/// # Errors
///
/// - [`ScaffoldError::InvalidValidationStrategy`] for unknown or missing values
/// - [`ScaffoldError::Prompt`] if the terminal cannot be read
pub fn resolve(
    explicit: Option<&str>,
    prompt: Option<&dyn Prompt>,
    default: ValidationStrategy,
) -> Result<ValidationStrategy, ScaffoldError> {
    let value = match (explicit, prompt) {
        (Some(value), _) => value.to_string(),
        (None, Some(prompt)) => prompt
            .ask(QUESTION, &HINTS, default.as_str())
            .map_err(|err| ScaffoldError::Prompt(err.into()))?,
        (None, None) => {
            tracing::debug!("no --validation flag and prompting disabled");
            String::new()
        }
    };

    let strategy = value.parse()?;
    tracing::debug!(%strategy, "validation strategy resolved");
    Ok(strategy)
}
