//! Error taxonomy for the audit core

use thiserror::Error;

/// Errors surfaced by the classifier, aggregator and audit sources
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuditError {
    /// Request body could not be decoded
    #[error("failed to parse audit request: {0}")]
    Parse(String),
    /// Metric name not present in the vital threshold table
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    /// No checklist item with the given id
    #[error("checklist item not found: {0}")]
    NotFound(String),
    /// Input outside the accepted domain (negative duration, unparsable size, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Transport or decoding failure talking to a remote audit endpoint
    #[error("remote audit failed: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
