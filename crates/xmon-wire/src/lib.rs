//! Xmon Wire Codecs
//!
//! Converts xmon schedules to the flat record format sent to the control
//! hardware and unpacks the raw measurement bytes that come back.
//!
//! # Components
//!
//! - [`GateCodec`]: one [`Operation`](xmon_ir::Operation) ⇄ one [`WireRecord`]
//! - [`ScheduleCodec`]: a [`Schedule`](xmon_ir::Schedule) ⇄ ordered records
//!   carrying `incremental_delay_picoseconds`
//! - [`pack_results`] / [`unpack_results`]: named boolean result matrices ⇄
//!   a dense, little-endian-bit byte buffer
//!
//! Parameter encoding and device knowledge are injected through the
//! [`ParameterCodec`] and [`DeviceModel`] traits.
//!
//! All codecs are stateless; every call either succeeds completely or
//! returns a [`WireError`].
//!
//! # Example: Schedule Round Trip
//!
//! ```rust
//! use xmon_ir::{Gate, GridQubit, Operation, Schedule, ScheduledOperation, Timestamp};
//! use xmon_wire::{ScheduleCodec, UnconstrainedDevice};
//!
//! let q = GridQubit::new(0, 0);
//! let schedule = Schedule::from_operations([
//!     ScheduledOperation::at(Timestamp::from_picos(100), Operation::single(Gate::x_pow(0.5), q)),
//!     ScheduledOperation::at(Timestamp::from_picos(250), Operation::single(Gate::z_pow(1.0), q)),
//! ])?;
//!
//! let codec = ScheduleCodec::new();
//! let records = codec.encode(&schedule)?;
//! assert_eq!(records[1].incremental_delay_picoseconds, Some(150));
//!
//! let decoded = codec.decode(&UnconstrainedDevice, &records)?;
//! assert_eq!(decoded, schedule);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example: Packing Results
//!
//! ```rust
//! use ndarray::arr2;
//! use xmon_wire::{pack_results, unpack_results};
//!
//! let a = arr2(&[[true]]).into_dyn();
//! let b = arr2(&[[false, true]]).into_dyn();
//! let packed = pack_results(&[("a", a), ("b", b)])?;
//! assert_eq!(packed, vec![0b101]);
//!
//! let results = unpack_results(&packed, 1, &[("a", 1), ("b", 2)])?;
//! assert_eq!(results.get("b"), Some(&arr2(&[[false, true]])));
//! # Ok::<(), xmon_wire::WireError>(())
//! ```

pub mod device;
pub mod error;
pub mod gate;
pub mod param;
pub mod record;
pub mod results;
pub mod schedule;

pub use device::{DeviceModel, UnconstrainedDevice, XmonDevice};
pub use error::{WireError, WireResult};
pub use gate::GateCodec;
pub use param::{ParameterCodec, RawParameterCodec};
pub use record::{WireOp, WireRecord, WireValue};
pub use results::{
    MeasurementResults, bits_to_bytes, bytes_to_bits, flatten_rows_padded, pack_results,
    unpack_results,
};
pub use schedule::ScheduleCodec;
