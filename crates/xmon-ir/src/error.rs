//! Error types for the IR crate.

use thiserror::Error;

use crate::time::Timestamp;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Two operations on a shared qubit overlap in time.
    #[error(
        "Operation '{operation}' at {time} overlaps '{existing}' at {existing_time} on a shared qubit"
    )]
    OverlappingOperation {
        /// Name of the operation being scheduled.
        operation: String,
        /// Start time of the operation being scheduled.
        time: Timestamp,
        /// Name of the operation already in the schedule.
        existing: String,
        /// Start time of the operation already in the schedule.
        existing_time: Timestamp,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
