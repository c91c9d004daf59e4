//! Xmon Operation and Schedule Model
//!
//! Value types describing what runs on a grid-qubit (xmon) device and when.
//! The wire codecs in `xmon-wire` consume and produce these types.
//!
//! # Core Components
//!
//! - **Qubits**: [`GridQubit`] addresses a qubit by `(row, col)`
//! - **Parameters**: [`Parameter`] is a constant or symbolic scalar
//! - **Gates**: [`Gate`] covers the native xmon rotations, measurement, and a
//!   few non-native gates
//! - **Operations**: [`Operation`] applies a gate to an ordered qubit tuple
//! - **Time**: [`Timestamp`] and [`Duration`] with picosecond resolution
//! - **Schedules**: [`Schedule`] of [`ScheduledOperation`]s ordered by start time
//!
//! # Example
//!
//! ```rust
//! use xmon_ir::{Duration, Gate, GridQubit, Operation, Schedule, ScheduledOperation, Timestamp};
//!
//! let q0 = GridQubit::new(0, 0);
//! let q1 = GridQubit::new(0, 1);
//!
//! let mut schedule = Schedule::new();
//! schedule.include(ScheduledOperation::new(
//!     Timestamp::from_nanos(0),
//!     Duration::from_nanos(20),
//!     Operation::single(Gate::x_pow(0.5), q0),
//! ))?;
//! schedule.include(ScheduledOperation::new(
//!     Timestamp::from_nanos(20),
//!     Duration::from_nanos(50),
//!     Operation::two(Gate::cz_pow(1.0), q0, q1),
//! ))?;
//!
//! assert_eq!(schedule.len(), 2);
//! assert_eq!(schedule.end_time(), Timestamp::from_nanos(70));
//! # Ok::<(), xmon_ir::IrError>(())
//! ```

pub mod error;
pub mod gate;
pub mod operation;
pub mod parameter;
pub mod qubit;
pub mod schedule;
pub mod time;

pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, MeasurementGate};
pub use operation::Operation;
pub use parameter::Parameter;
pub use qubit::GridQubit;
pub use schedule::{Schedule, ScheduledOperation};
pub use time::{Duration, Timestamp};
