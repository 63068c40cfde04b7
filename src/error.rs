//! Error types and HTTP status mapping for stylefix

use thiserror::Error;

/// Main error type for stylefix operations
#[derive(Error, Debug)]
pub enum StylefixError {
    #[error("code must not be empty")]
    EmptyCode,

    #[error("unsupported syntax: {syntax} (expected \"css\" or \"html\")")]
    UnsupportedSyntax { syntax: String },

    #[error("rules must contain at least one entry")]
    NoRules,

    #[error("unsupported output style: {style} (expected \"compact\" or \"nested\")")]
    UnsupportedOutputStyle { style: String },

    #[error("failed to re-serialize fixed CSS: {message}")]
    CssParse { message: String },

    #[error("lint execution failed: {message}")]
    LintExecution { message: String },

    #[error("stylelint executable not found on PATH")]
    EngineUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StylefixError {
    /// HTTP status the boundary maps this error to: request errors are the
    /// caller's fault, everything else is ours.
    pub fn http_status(&self) -> u16 {
        if self.is_request_error() {
            400
        } else {
            500
        }
    }

    /// True for errors caused by the request itself (validation failures and
    /// re-serialization of the fixed CSS). These propagate unchanged to the
    /// boundary; anything else gets wrapped into `LintExecution`.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCode
                | Self::UnsupportedSyntax { .. }
                | Self::NoRules
                | Self::UnsupportedOutputStyle { .. }
                | Self::CssParse { .. }
        )
    }
}

/// Result type alias for stylefix operations
pub type Result<T> = std::result::Result<T, StylefixError>;
