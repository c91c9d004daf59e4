//! Device models used when decoding schedules.
//!
//! A [`DeviceModel`] turns decoded operations into scheduled ones: it checks
//! the operation is valid on the hardware and supplies its duration.
//!
//! [`XmonDevice`] is configured from YAML or JSON:
//!
//! ```yaml
//! measurement_duration_picos: 4000000
//! exp_w_duration_picos: 20000
//! exp_11_duration_picos: 50000
//! qubits:
//!   - { row: 0, col: 0 }
//!   - { row: 0, col: 1 }
//! ```
//!
//! Durations default to the Foxtail values when omitted.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use xmon_ir::{Duration, Gate, GridQubit, Operation};

use crate::error::{WireError, WireResult};
use crate::gate::GateCodec;
use crate::param::ParameterCodec;
use crate::record::WireRecord;

/// Hardware knowledge needed to rebuild a schedule from wire records.
pub trait DeviceModel {
    /// Check that `operation` can run on this device.
    fn validate_operation(&self, operation: &Operation) -> WireResult<()>;

    /// How long `operation` runs on this device.
    fn duration_of(&self, operation: &Operation) -> WireResult<Duration>;

    /// Decode a record with `gates` and validate the result on this device.
    fn reconstruct_operation<P: ParameterCodec>(
        &self,
        gates: &GateCodec<P>,
        record: &WireRecord,
    ) -> WireResult<Operation>
    where
        Self: Sized,
    {
        let operation = gates.decode(record)?;
        self.validate_operation(&operation)?;
        Ok(operation)
    }
}

/// A device that accepts any operation on any qubit and runs it instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconstrainedDevice;

impl DeviceModel for UnconstrainedDevice {
    fn validate_operation(&self, _operation: &Operation) -> WireResult<()> {
        Ok(())
    }

    fn duration_of(&self, _operation: &Operation) -> WireResult<Duration> {
        Ok(Duration::ZERO)
    }
}

fn default_measurement_duration() -> Duration {
    Duration::from_nanos(4000)
}

fn default_exp_w_duration() -> Duration {
    Duration::from_nanos(20)
}

fn default_exp_11_duration() -> Duration {
    Duration::from_nanos(50)
}

/// A grid of xmon qubits with fixed gate durations.
///
/// Z rotations are applied in software and take no time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XmonDevice {
    /// Duration of a measurement.
    #[serde(
        rename = "measurement_duration_picos",
        default = "default_measurement_duration"
    )]
    pub measurement_duration: Duration,

    /// Duration of an XY-plane rotation.
    #[serde(rename = "exp_w_duration_picos", default = "default_exp_w_duration")]
    pub exp_w_duration: Duration,

    /// Duration of a controlled-Z rotation.
    #[serde(rename = "exp_11_duration_picos", default = "default_exp_11_duration")]
    pub exp_11_duration: Duration,

    /// Qubits present on the device.
    pub qubits: BTreeSet<GridQubit>,
}

impl XmonDevice {
    /// Create a device with the given durations and qubits.
    pub fn new(
        measurement_duration: Duration,
        exp_w_duration: Duration,
        exp_11_duration: Duration,
        qubits: impl IntoIterator<Item = GridQubit>,
    ) -> Self {
        Self {
            measurement_duration,
            exp_w_duration,
            exp_11_duration,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// The 2×11 Foxtail device.
    pub fn foxtail() -> Self {
        Self::new(
            default_measurement_duration(),
            default_exp_w_duration(),
            default_exp_11_duration(),
            GridQubit::rect(2, 11),
        )
    }

    /// Load a device from a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> WireResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(WireError::Config(format!(
                "unrecognized device file extension: {}",
                path.display()
            ))),
        }
    }

    /// Parse a device from YAML.
    pub fn from_yaml_str(text: &str) -> WireResult<Self> {
        let device: XmonDevice = serde_yaml_ng::from_str(text)?;
        device.validate()?;
        Ok(device)
    }

    /// Parse a device from JSON.
    pub fn from_json_str(text: &str) -> WireResult<Self> {
        let device: XmonDevice = serde_json::from_str(text)?;
        device.validate()?;
        Ok(device)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> WireResult<()> {
        if self.qubits.is_empty() {
            return Err(WireError::Config("device has no qubits".into()));
        }
        debug!(
            "Xmon device with {} qubits, exp_w {}, exp_11 {}, measurement {}",
            self.qubits.len(),
            self.exp_w_duration,
            self.exp_11_duration,
            self.measurement_duration
        );
        Ok(())
    }

    /// Check whether `qubit` is on the device.
    pub fn contains(&self, qubit: &GridQubit) -> bool {
        self.qubits.contains(qubit)
    }
}

impl DeviceModel for XmonDevice {
    fn validate_operation(&self, operation: &Operation) -> WireResult<()> {
        // Only native gates run on the device.
        self.duration_of(operation)?;

        if let Some(q) = operation.qubits.iter().find(|q| !self.contains(q)) {
            return Err(WireError::QubitNotOnDevice(*q));
        }

        if let (Gate::CZPow { .. }, [a, b]) = (&operation.gate, operation.qubits.as_slice()) {
            if !a.is_adjacent(b) {
                return Err(WireError::NonAdjacentQubits(*a, *b));
            }
        }

        Ok(())
    }

    fn duration_of(&self, operation: &Operation) -> WireResult<Duration> {
        match &operation.gate {
            Gate::XPow { .. } | Gate::YPow { .. } | Gate::PhasedXPow { .. } => {
                Ok(self.exp_w_duration)
            }
            Gate::ZPow { .. } => Ok(Duration::ZERO),
            Gate::CZPow { .. } => Ok(self.exp_11_duration),
            Gate::Measure(_) => Ok(self.measurement_duration),
            Gate::H | Gate::CX | Gate::Swap | Gate::Custom(_) => {
                Err(WireError::UnsupportedOperation(operation.name().to_string()))
            }
        }
    }
}
