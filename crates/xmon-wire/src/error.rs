//! Error types for the wire codecs.
//!
//! Every error is a precondition violation on the caller's input. Nothing is
//! retried and no codec returns partial output.

use thiserror::Error;
use xmon_ir::{GridQubit, IrError, Timestamp};

/// Errors that can occur while encoding or decoding wire data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WireError {
    /// The operation's gate has no wire encoding.
    #[error("Don't know how to serialize gate '{0}'")]
    UnsupportedOperation(String),

    /// Wrong number of qubits for the gate.
    #[error("Gate '{gate}' requires {expected} qubit(s), got {got}")]
    QubitArity {
        /// Name of the gate.
        gate: String,
        /// Required qubit count, e.g. `"1"` or `"at least 1"`.
        expected: &'static str,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Measurement on no qubits.
    #[error("Measurement '{key}' has no target qubits")]
    EmptyTarget {
        /// Measurement key.
        key: String,
    },

    /// Invert mask length differs from the number of measured qubits.
    #[error(
        "Measurement '{key}' has an invert mask of length {mask_len} but acts on {num_qubits} qubit(s)"
    )]
    InvertMaskLength {
        /// Measurement key.
        key: String,
        /// Length of the invert mask.
        mask_len: usize,
        /// Number of measured qubits.
        num_qubits: usize,
    },

    /// A result matrix is not 2-dimensional.
    #[error("Expected 2-D data for key '{key}', got shape {shape:?}")]
    ShapeMismatch {
        /// Measurement key.
        key: String,
        /// Actual shape of the data.
        shape: Vec<usize>,
    },

    /// Result matrices disagree on the repetition count.
    #[error("Expected {expected} repetitions for key '{key}', got {got}")]
    RepetitionMismatch {
        /// Measurement key whose data disagrees.
        key: String,
        /// Repetition count of the first key.
        expected: usize,
        /// Repetition count of this key.
        got: usize,
    },

    /// Scheduled operations are not in non-decreasing time order.
    #[error("Operation {index} starts at {current}, before the preceding operation at {previous}")]
    OutOfOrderSchedule {
        /// Position of the offending operation.
        index: usize,
        /// Start time of the preceding operation.
        previous: Timestamp,
        /// Start time of the offending operation.
        current: Timestamp,
    },

    /// Accumulated delays exceed the representable time range.
    #[error("Timestamp overflow accumulating delay of record {index}")]
    TimestampOverflow {
        /// Position of the offending record.
        index: usize,
    },

    /// The packed buffer is too short for the requested layout.
    #[error("Packed buffer holds {available_bits} bits, layout needs {expected_bits}")]
    TruncatedBuffer {
        /// Bits required by `repetitions × bits_per_repetition`.
        expected_bits: usize,
        /// Bits available in the buffer.
        available_bits: usize,
    },

    /// The unpack layout's widths do not fit in `usize` bits per repetition.
    #[error("Result layout width overflows at key '{key}'")]
    LayoutOverflow {
        /// First key whose width overflows the running total.
        key: String,
    },

    /// The unpack layout names the same key twice.
    #[error("Duplicate measurement key '{0}'")]
    DuplicateMeasurementKey(String),

    /// A parameter value could not be decoded.
    #[error("Invalid parameter value: {0}")]
    InvalidParameter(String),

    /// An invert mask entry is not a JSON boolean.
    #[error("Invalid invert mask entry: {0:?}")]
    InvalidInvertMask(String),

    /// A record does not carry exactly one known operation key.
    #[error("Unknown wire record: {0}")]
    UnknownRecordKind(String),

    /// An operation targets a qubit the device does not have.
    #[error("Qubit {0} is not on the device")]
    QubitNotOnDevice(GridQubit),

    /// A two-qubit operation targets qubits that are not neighbours.
    #[error("Qubits {0} and {1} are not adjacent")]
    NonAdjacentQubits(GridQubit, GridQubit),

    /// Decoded operations could not be placed in a schedule.
    #[error("Schedule error: {0}")]
    Schedule(#[from] IrError),

    /// Array layout error.
    #[error("Array layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),

    /// Device configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;
