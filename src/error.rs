//! Distribution errors

use thiserror::Error;

/// A caller contract violation. None of these are retried; the request as a
/// whole is rejected and nothing is allocated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("invalid calendar {year}-{month:02}: {reason}")]
    InvalidCalendar { year: i32, month: u32, reason: String },

    #[error("invalid plan for category '{category}': {reason}")]
    InvalidPlan { category: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DistributionError {
    pub(crate) fn calendar(year: i32, month: u32, reason: impl Into<String>) -> Self {
        Self::InvalidCalendar { year, month, reason: reason.into() }
    }

    pub(crate) fn plan(category: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPlan { category: category.to_string(), reason: reason.into() }
    }
}

/// Result type for distribution operations
pub type Result<T> = std::result::Result<T, DistributionError>;
