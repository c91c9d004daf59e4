//! Gate ⇄ wire record mapping.
//!
//! | Gate          | Qubits | Record   | Axis sent as            |
//! |---------------|--------|----------|-------------------------|
//! | `XPow`        | 1      | `exp_w`  | `0`                     |
//! | `YPow`        | 1      | `exp_w`  | `0.5`                   |
//! | `PhasedXPow`  | 1      | `exp_w`  | `phase_exponent`        |
//! | `ZPow`        | 1      | `exp_z`  |                         |
//! | `CZPow`       | 2      | `exp_11` |                         |
//! | `Measure`     | ≥ 1    | `measurement` |                    |
//!
//! Any other gate is rejected with [`WireError::UnsupportedOperation`].

use tracing::trace;
use xmon_ir::{Gate, GridQubit, MeasurementGate, Operation, Parameter};

use crate::error::{WireError, WireResult};
use crate::param::{ParameterCodec, RawParameterCodec};
use crate::record::{Exp11, ExpW, ExpZ, Measurement, WireOp, WireRecord};

/// Encodes operations as wire records and decodes them back.
#[derive(Debug, Clone, Default)]
pub struct GateCodec<P = RawParameterCodec> {
    params: P,
}

impl GateCodec {
    /// Create a codec using [`RawParameterCodec`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ParameterCodec> GateCodec<P> {
    /// Create a codec with a custom parameter encoding.
    pub fn with_parameter_codec(params: P) -> Self {
        Self { params }
    }

    /// The parameter codec in use.
    pub fn parameter_codec(&self) -> &P {
        &self.params
    }

    /// Encode an operation as a record without a delay.
    pub fn encode(&self, operation: &Operation) -> WireResult<WireRecord> {
        self.encode_gate(&operation.gate, &operation.qubits)
            .map(WireRecord::new)
    }

    /// Encode a gate applied to `qubits`.
    pub fn encode_gate(&self, gate: &Gate, qubits: &[GridQubit]) -> WireResult<WireOp> {
        trace!("Encoding {} on {} qubit(s)", gate.name(), qubits.len());
        match gate {
            Gate::XPow { exponent } => {
                let target = single_target(gate, qubits)?;
                self.exp_w(target, &Parameter::constant(0.0), exponent)
            }
            Gate::YPow { exponent } => {
                let target = single_target(gate, qubits)?;
                self.exp_w(target, &Parameter::constant(0.5), exponent)
            }
            Gate::PhasedXPow {
                phase_exponent,
                exponent,
            } => {
                let target = single_target(gate, qubits)?;
                self.exp_w(target, phase_exponent, exponent)
            }
            Gate::ZPow { exponent } => {
                let target = single_target(gate, qubits)?;
                Ok(WireOp::ExpZ(ExpZ {
                    target,
                    half_turns: self.params.encode_scalar(exponent)?,
                }))
            }
            Gate::CZPow { exponent } => {
                let [target1, target2] = qubits else {
                    return Err(arity_error(gate, "2", qubits.len()));
                };
                Ok(WireOp::Exp11(Exp11 {
                    target1: *target1,
                    target2: *target2,
                    half_turns: self.params.encode_scalar(exponent)?,
                }))
            }
            Gate::Measure(m) => encode_measurement(m, qubits).map(WireOp::Measurement),
            Gate::H | Gate::CX | Gate::Swap | Gate::Custom(_) => {
                Err(WireError::UnsupportedOperation(gate.name().to_string()))
            }
        }
    }

    fn exp_w(
        &self,
        target: GridQubit,
        axis: &Parameter,
        exponent: &Parameter,
    ) -> WireResult<WireOp> {
        Ok(WireOp::ExpW(ExpW {
            target,
            axis_half_turns: self.params.encode_scalar(axis)?,
            half_turns: self.params.encode_scalar(exponent)?,
        }))
    }

    /// Decode a record into an operation, dispatching on its operation key.
    ///
    /// An `exp_w` record whose axis is the constant `0` or `0.5` decodes to an
    /// X or Y rotation; see [`Gate::phased_x`].
    pub fn decode(&self, record: &WireRecord) -> WireResult<Operation> {
        trace!("Decoding {} record", record.op.key());
        match &record.op {
            WireOp::ExpW(w) => {
                let axis = self.params.decode_scalar(&w.axis_half_turns)?;
                let exponent = self.params.decode_scalar(&w.half_turns)?;
                Ok(Operation::single(Gate::phased_x(axis, exponent), w.target))
            }
            WireOp::ExpZ(z) => {
                let exponent = self.params.decode_scalar(&z.half_turns)?;
                Ok(Operation::single(Gate::ZPow { exponent }, z.target))
            }
            WireOp::Exp11(cz) => {
                let exponent = self.params.decode_scalar(&cz.half_turns)?;
                Ok(Operation::two(
                    Gate::CZPow { exponent },
                    cz.target1,
                    cz.target2,
                ))
            }
            WireOp::Measurement(m) => decode_measurement(m),
        }
    }
}

fn arity_error(gate: &Gate, expected: &'static str, got: usize) -> WireError {
    WireError::QubitArity {
        gate: gate.name().to_string(),
        expected,
        got,
    }
}

fn single_target(gate: &Gate, qubits: &[GridQubit]) -> WireResult<GridQubit> {
    match qubits {
        [q] => Ok(*q),
        _ => Err(arity_error(gate, "1", qubits.len())),
    }
}

fn encode_measurement(gate: &MeasurementGate, qubits: &[GridQubit]) -> WireResult<Measurement> {
    if qubits.is_empty() {
        return Err(WireError::EmptyTarget {
            key: gate.key.clone(),
        });
    }
    if gate.has_invert_mask() && gate.invert_mask.len() != qubits.len() {
        return Err(WireError::InvertMaskLength {
            key: gate.key.clone(),
            mask_len: gate.invert_mask.len(),
            num_qubits: qubits.len(),
        });
    }

    let invert_mask = gate
        .has_invert_mask()
        .then(|| gate.invert_mask.iter().map(bool::to_string).collect());

    Ok(Measurement {
        targets: qubits.to_vec(),
        key: gate.key.clone(),
        invert_mask,
    })
}

fn decode_measurement(record: &Measurement) -> WireResult<Operation> {
    if record.targets.is_empty() {
        return Err(WireError::EmptyTarget {
            key: record.key.clone(),
        });
    }

    let invert_mask = record
        .invert_mask
        .iter()
        .flatten()
        .map(|entry| {
            serde_json::from_str::<bool>(entry)
                .map_err(|_| WireError::InvalidInvertMask(entry.clone()))
        })
        .collect::<WireResult<Vec<bool>>>()?;

    if !invert_mask.is_empty() && invert_mask.len() != record.targets.len() {
        return Err(WireError::InvertMaskLength {
            key: record.key.clone(),
            mask_len: invert_mask.len(),
            num_qubits: record.targets.len(),
        });
    }

    let gate = MeasurementGate::new(record.key.clone()).with_invert_mask(invert_mask);
    Ok(Operation::new(gate, record.targets.iter().copied()))
}
