//! Error types for the config renderers.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while validating inputs or rendering a document.
///
/// Every variant is fatal: the renderer prints the diagnostic and exits
/// without writing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A required variable is absent or empty.
    #[error("missing env {name}")]
    MissingRequiredInput { name: String },

    /// A family selected by IP_STACK lacks its host address or machine network.
    #[error("IP_STACK={stack} includes {family} but {host_var} and {network_var} are not set")]
    MissingStackInput {
        stack: String,
        family: String,
        host_var: String,
        network_var: String,
    },

    /// A value is present but not usable.
    #[error("invalid {name}={value} ({reason})")]
    InvalidConfiguration {
        name: String,
        value: String,
        reason: String,
    },

    /// Writing the finished document failed.
    #[error("failed to write document: {0}")]
    Output(String),
}

impl RenderError {
    pub fn missing(name: &str) -> Self {
        RenderError::MissingRequiredInput {
            name: name.to_string(),
        }
    }

    /// Value and reason are stored with control characters escaped, so the
    /// diagnostic stays on one line.
    pub fn invalid(name: &str, value: &str, reason: impl Into<String>) -> Self {
        RenderError::InvalidConfiguration {
            name: name.to_string(),
            value: escape_controls(value),
            reason: escape_controls(&reason.into()),
        }
    }

    /// True for both forms of the missing-input category.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            RenderError::MissingRequiredInput { .. } | RenderError::MissingStackInput { .. }
        )
    }

    /// True when the error names the given variable.
    pub fn names_variable(&self, var: &str) -> bool {
        match self {
            RenderError::MissingRequiredInput { name } => name == var,
            RenderError::MissingStackInput {
                host_var,
                network_var,
                ..
            } => host_var == var || network_var == var,
            RenderError::InvalidConfiguration { name, .. } => name == var,
            RenderError::Output(_) => false,
        }
    }
}

fn escape_controls(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Output(e.to_string())
    }
}
