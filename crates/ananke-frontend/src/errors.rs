//! Error types for spec parsing.

use thiserror::Error;

/// Errors produced while parsing a spec string.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Syntax error with location information from the parser.
    #[error("parse error: {0}")]
    ParseError(String),
}
