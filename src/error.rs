//! Error types for input loading and validation
//!
//! The numeric core never returns errors: zero rates, cash purchases and
//! non-convergent IRR all resolve to sentinel values. Errors only surface at
//! the boundary where parameter sets are read and checked.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
