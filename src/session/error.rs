//! Session error types.

use thiserror::Error;

/// Errors surfaced by the session layer to the shell.
///
/// None of these are retried automatically; each one is meant to be shown
/// to the user as-is.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Malformed or incomplete client configuration.
    #[error("Invalid LLM configuration: {0}")]
    Config(String),

    /// The completion backend failed or returned an error-flagged result.
    #[error("Backend error: {0}")]
    Backend(String),

    /// The session's runtime has been stopped.
    #[error("Session is closed")]
    SessionClosed,

    /// The agent runtime rejected an operation.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// No agent with this name is registered on the runtime.
    #[error("Agent '{0}' is not registered")]
    UnknownAgent(String),

    /// A message could not be encoded or decoded.
    #[error("Malformed message: {0}")]
    Codec(String),

    /// `auto` (or another non-language) was requested as a target.
    #[error("'{0}' cannot be used as a target language")]
    InvalidTarget(String),
}
