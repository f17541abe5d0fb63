use std::io;
use thiserror::Error;

use crate::frontend::parser::Diagnostic;

#[derive(Debug, Error)]
pub enum BlameError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileReadError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Parsing errors
    #[error("Parsing failed with {} diagnostic(s):\n{}", .diagnostics.len(), render_diagnostics(.diagnostics))]
    ParseFailed { diagnostics: Vec<Diagnostic> },

    // Emission errors
    #[error("Emission error: unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },
    #[error("Emission error: '{identifier}' is not a valid target identifier")]
    InvalidTargetIdentifier { identifier: String },
    #[error("Emission error: {0}")]
    OutputError(String),
}

impl BlameError {
    /// Create an emission error naming the construct that has no translation
    pub fn unsupported(construct: impl Into<String>) -> Self {
        BlameError::UnsupportedConstruct {
            construct: construct.into(),
        }
    }
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {}", d))
        .collect::<Vec<_>>()
        .join("\n")
}

// Type alias for Result with BlameError
pub type BlameResult<T> = Result<T, BlameError>;
