//! Error types and handling for the `hilo` service

use thiserror::Error;

/// Main error type for the `hilo` service
#[derive(Error, Debug)]
pub enum HiloError {
    /// The observations table holds no rows, so no latest date exists
    #[error("dataset is empty: no observations to resolve a latest date from")]
    EmptyDataset,

    /// A caller-supplied date string failed parsing
    #[error("malformed date: {input}")]
    MalformedDate { input: String },

    /// The live database does not match the declared schema
    #[error("schema mismatch: {detail}")]
    SchemaMismatch { detail: String },

    /// The backing store cannot be reached or a query failed
    #[error("storage error: {source}")]
    Storage {
        #[from]
        source: sqlx::Error,
    },

    /// Configuration-related errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl HiloError {
    /// Create a new malformed-date error
    pub fn malformed_date<S: Into<String>>(input: S) -> Self {
        Self::MalformedDate {
            input: input.into(),
        }
    }

    /// Create a new schema-mismatch error
    pub fn schema_mismatch<S: Into<String>>(detail: S) -> Self {
        Self::SchemaMismatch {
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HiloError::EmptyDataset => {
                "The dataset contains no observations.".to_string()
            }
            HiloError::MalformedDate { input } => {
                format!("'{input}' is not a valid date. Use the YYYY-MM-DD format.")
            }
            HiloError::SchemaMismatch { detail } => {
                format!("The observations database has an unexpected layout: {detail}")
            }
            HiloError::Storage { .. } => {
                "The observations database is unavailable. Please retry.".to_string()
            }
            HiloError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
