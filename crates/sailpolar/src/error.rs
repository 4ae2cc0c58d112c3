//! Error taxonomy shared by every stage of the engine.
//!
//! - `Format`: the declared input layout does not match the data.
//! - `Value`: a numeric field is out of domain.
//! - `Domain`: an operation's precondition does not hold for this diagram.
//! - `Query`: a query point is outside the supported domain and no
//!   extrapolation policy applies.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolarError {
    #[error("format error: {0}")]
    Format(String),

    #[error("value error: {0}")]
    Value(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl PolarError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format(reason.into())
    }

    pub(crate) fn value(reason: impl Into<String>) -> Self {
        Self::Value(reason.into())
    }

    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        Self::Domain(reason.into())
    }

    pub(crate) fn query(reason: impl Into<String>) -> Self {
        Self::Query(reason.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PolarError>;
