//! Operations combining gates with target qubits.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, MeasurementGate};
use crate::qubit::GridQubit;

/// A gate applied to an ordered tuple of qubits.
///
/// Construction does not check the qubit count against the gate; consumers
/// such as wire encoders validate arity themselves. Gates are stored in
/// canonical form (see [`Gate::canonicalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate being applied.
    pub gate: Gate,
    /// Target qubits, in gate argument order.
    pub qubits: Vec<GridQubit>,
}

impl Operation {
    /// Create an operation.
    pub fn new(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        Self {
            gate: gate.into().canonicalize(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit operation.
    pub fn single(gate: impl Into<Gate>, qubit: GridQubit) -> Self {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit operation.
    pub fn two(gate: impl Into<Gate>, q1: GridQubit, q2: GridQubit) -> Self {
        Self::new(gate, [q1, q2])
    }

    /// Create a measurement of `qubits` under `key`.
    pub fn measure(key: impl Into<String>, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        Self::new(MeasurementGate::new(key), qubits)
    }

    /// Check whether this operation acts on `qubit`.
    pub fn acts_on(&self, qubit: &GridQubit) -> bool {
        self.qubits.contains(qubit)
    }

    /// Get the measurement gate if this is a measurement.
    pub fn as_measurement(&self) -> Option<&MeasurementGate> {
        match &self.gate {
            Gate::Measure(m) => Some(m),
            _ => None,
        }
    }

    /// Get the name of the operation's gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }
}
