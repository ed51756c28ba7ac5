/// Error types for staff queries.
///
/// Query functions are pure, so the only failures are empty inputs for
/// operations that need at least one record, and malformed rosters or
/// configuration rejected at load time.
use thiserror::Error;

/// The main error type for koru-staff operations.
#[derive(Error, Debug)]
pub enum StaffError {
    /// An operation that needs at least one record ran over an empty input
    #[error("Operation '{operation}' requires at least one record")]
    EmptyInput {
        /// Name of the operation that had nothing to work on
        operation: &'static str,
    },

    /// A roster entry failed validation
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Id of the offending record
        id: u32,
        /// Description of why the record was rejected
        reason: String,
    },

    /// Two records in one roster share an id
    #[error("Duplicate employee id {0}")]
    DuplicateId(u32),

    /// Serialization error when converting data to/from JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading a roster or config file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected setting
        reason: String,
    },

    /// No catalogue query with this name
    #[error("Unknown query '{0}'")]
    UnknownQuery(String),
}

impl StaffError {
    /// Shorthand for an [`StaffError::EmptyInput`] error.
    pub fn empty(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }
}

/// Result type alias for koru-staff operations.
pub type StaffResult<T> = Result<T, StaffError>;
