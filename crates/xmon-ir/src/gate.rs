//! Gate types.
//!
//! Rotation exponents are in half turns: an exponent of `1.0` is a full
//! π rotation, `0.5` a π/2 rotation.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;

/// A gate acting on one or more grid qubits.
///
/// Equality is by rotation: a [`Gate::PhasedXPow`] whose axis is the
/// constant `0` or `0.5` equals the matching [`Gate::XPow`] or
/// [`Gate::YPow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Gate {
    // Native xmon rotations
    /// Rotation about the X axis.
    XPow {
        /// Rotation angle in half turns.
        exponent: Parameter,
    },
    /// Rotation about the Y axis.
    YPow {
        /// Rotation angle in half turns.
        exponent: Parameter,
    },
    /// Rotation about an axis in the XY plane.
    PhasedXPow {
        /// Angle of the rotation axis from X, in half turns.
        phase_exponent: Parameter,
        /// Rotation angle in half turns.
        exponent: Parameter,
    },
    /// Rotation about the Z axis.
    ZPow {
        /// Rotation angle in half turns.
        exponent: Parameter,
    },
    /// Controlled phase rotation on the |11⟩ state.
    CZPow {
        /// Rotation angle in half turns.
        exponent: Parameter,
    },
    /// Computational-basis measurement.
    Measure(MeasurementGate),

    // Non-native gates
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate.
    CX,
    /// SWAP gate.
    Swap,
    /// A user-defined gate.
    Custom(CustomGate),
}

impl Gate {
    /// X rotation by `exponent` half turns.
    pub fn x_pow(exponent: impl Into<Parameter>) -> Self {
        Gate::XPow {
            exponent: exponent.into(),
        }
    }

    /// Y rotation by `exponent` half turns.
    pub fn y_pow(exponent: impl Into<Parameter>) -> Self {
        Gate::YPow {
            exponent: exponent.into(),
        }
    }

    /// Z rotation by `exponent` half turns.
    pub fn z_pow(exponent: impl Into<Parameter>) -> Self {
        Gate::ZPow {
            exponent: exponent.into(),
        }
    }

    /// Controlled-Z rotation by `exponent` half turns.
    pub fn cz_pow(exponent: impl Into<Parameter>) -> Self {
        Gate::CZPow {
            exponent: exponent.into(),
        }
    }

    /// Phased-X rotation, canonicalized.
    ///
    /// A constant axis of `0` is an X rotation and a constant axis of `0.5`
    /// is a Y rotation; those are returned as [`Gate::XPow`] and
    /// [`Gate::YPow`] so that equal rotations compare equal.
    pub fn phased_x(phase_exponent: impl Into<Parameter>, exponent: impl Into<Parameter>) -> Self {
        let phase_exponent = phase_exponent.into();
        let exponent = exponent.into();
        if phase_exponent.is_constant(0.0) {
            Gate::XPow { exponent }
        } else if phase_exponent.is_constant(0.5) {
            Gate::YPow { exponent }
        } else {
            Gate::PhasedXPow {
                phase_exponent,
                exponent,
            }
        }
    }

    /// Rewrite a phased-X rotation on a constant X or Y axis as that rotation.
    ///
    /// Every other gate is returned unchanged.
    #[must_use]
    pub fn canonicalize(self) -> Self {
        match self {
            Gate::PhasedXPow {
                phase_exponent,
                exponent,
            } => Gate::phased_x(phase_exponent, exponent),
            other => other,
        }
    }

    fn canonical(&self) -> Cow<'_, Gate> {
        match self {
            Gate::PhasedXPow { phase_exponent, .. }
                if phase_exponent.is_constant(0.0) || phase_exponent.is_constant(0.5) =>
            {
                Cow::Owned(self.clone().canonicalize())
            }
            _ => Cow::Borrowed(self),
        }
    }

    /// Measurement writing to `key`.
    pub fn measure(key: impl Into<String>) -> Self {
        Gate::Measure(MeasurementGate::new(key))
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            Gate::XPow { .. } => "x_pow",
            Gate::YPow { .. } => "y_pow",
            Gate::PhasedXPow { .. } => "phased_x_pow",
            Gate::ZPow { .. } => "z_pow",
            Gate::CZPow { .. } => "cz_pow",
            Gate::Measure(_) => "measure",
            Gate::H => "h",
            Gate::CX => "cx",
            Gate::Swap => "swap",
            Gate::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits this gate acts on.
    ///
    /// `None` for measurements, which act on any non-zero number of qubits.
    pub fn num_qubits(&self) -> Option<usize> {
        match self {
            Gate::XPow { .. }
            | Gate::YPow { .. }
            | Gate::PhasedXPow { .. }
            | Gate::ZPow { .. }
            | Gate::H => Some(1),
            Gate::CZPow { .. } | Gate::CX | Gate::Swap => Some(2),
            Gate::Measure(_) => None,
            Gate::Custom(g) => Some(g.num_qubits),
        }
    }

    /// Check if any parameter of this gate is symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Get the parameters of this gate.
    pub fn parameters(&self) -> Vec<&Parameter> {
        match self {
            Gate::XPow { exponent }
            | Gate::YPow { exponent }
            | Gate::ZPow { exponent }
            | Gate::CZPow { exponent } => vec![exponent],
            Gate::PhasedXPow {
                phase_exponent,
                exponent,
            } => vec![phase_exponent, exponent],
            Gate::Custom(g) => g.params.iter().collect(),
            Gate::Measure(_) | Gate::H | Gate::CX | Gate::Swap => vec![],
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.canonical(), &*other.canonical()) {
            (Gate::XPow { exponent: a }, Gate::XPow { exponent: b })
            | (Gate::YPow { exponent: a }, Gate::YPow { exponent: b })
            | (Gate::ZPow { exponent: a }, Gate::ZPow { exponent: b })
            | (Gate::CZPow { exponent: a }, Gate::CZPow { exponent: b }) => a == b,
            (
                Gate::PhasedXPow {
                    phase_exponent: pa,
                    exponent: a,
                },
                Gate::PhasedXPow {
                    phase_exponent: pb,
                    exponent: b,
                },
            ) => pa == pb && a == b,
            (Gate::Measure(a), Gate::Measure(b)) => a == b,
            (Gate::Custom(a), Gate::Custom(b)) => a == b,
            (Gate::H, Gate::H) | (Gate::CX, Gate::CX) | (Gate::Swap, Gate::Swap) => true,
            _ => false,
        }
    }
}

/// Measurement of one or more qubits into a named result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementGate {
    /// Result key the measured bits are reported under.
    pub key: String,
    /// Per-qubit flags; a set flag inverts the reported bit.
    ///
    /// Empty means no inversion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invert_mask: Vec<bool>,
}

impl MeasurementGate {
    /// Create a measurement without an invert mask.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            invert_mask: vec![],
        }
    }

    /// Set the invert mask.
    #[must_use]
    pub fn with_invert_mask(mut self, mask: impl IntoIterator<Item = bool>) -> Self {
        self.invert_mask = mask.into_iter().collect();
        self
    }

    /// Check if any bit is inverted.
    pub fn has_invert_mask(&self) -> bool {
        !self.invert_mask.is_empty()
    }
}

impl From<MeasurementGate> for Gate {
    fn from(gate: MeasurementGate) -> Self {
        Gate::Measure(gate)
    }
}

/// A user-defined gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: usize,
    /// Parameters of the gate.
    pub params: Vec<Parameter>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.params = params;
        self
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::x_pow(0.5).num_qubits(), Some(1));
        assert_eq!(Gate::cz_pow(1.0).num_qubits(), Some(2));
        assert_eq!(Gate::measure("m").num_qubits(), None);
        assert_eq!(Gate::Custom(CustomGate::new("ccz", 3)).num_qubits(), Some(3));

        assert!(!Gate::z_pow(0.25).is_parameterized());
        assert!(Gate::z_pow(Parameter::symbol("t")).is_parameterized());
    }

    #[test]
    fn test_phased_x_canonicalization() {
        assert_eq!(Gate::phased_x(0.0, 0.5), Gate::x_pow(0.5));
        assert_eq!(Gate::phased_x(0.5, 0.5), Gate::y_pow(0.5));
        assert!(matches!(
            Gate::phased_x(0.25, 0.5),
            Gate::PhasedXPow { .. }
        ));
        assert!(matches!(
            Gate::phased_x(Parameter::symbol("p"), 0.5),
            Gate::PhasedXPow { .. }
        ));
    }

    #[test]
    fn test_phased_x_on_x_or_y_axis_equals_plain_rotation() {
        let on_x = Gate::PhasedXPow {
            phase_exponent: 0.0.into(),
            exponent: 1.0.into(),
        };
        let on_y = Gate::PhasedXPow {
            phase_exponent: 0.5.into(),
            exponent: 0.25.into(),
        };
        assert_eq!(on_x, Gate::x_pow(1.0));
        assert_eq!(Gate::x_pow(1.0), on_x);
        assert_eq!(on_y, Gate::y_pow(0.25));
        assert_ne!(on_x, Gate::x_pow(0.5));
        assert_ne!(on_x, Gate::y_pow(1.0));

        assert!(matches!(on_x.clone().canonicalize(), Gate::XPow { .. }));
        assert!(matches!(on_y.canonicalize(), Gate::YPow { .. }));
    }

    #[test]
    fn test_phased_x_off_axis_keeps_phase() {
        let off = Gate::PhasedXPow {
            phase_exponent: 0.25.into(),
            exponent: 1.0.into(),
        };
        assert_eq!(off, Gate::phased_x(0.25, 1.0));
        assert_ne!(off, Gate::phased_x(0.75, 1.0));
        assert_ne!(off, Gate::x_pow(1.0));
        assert_ne!(Gate::H, Gate::CX);
    }

    #[test]
    fn test_measurement_gate() {
        let m = MeasurementGate::new("result").with_invert_mask([true, false]);
        assert!(m.has_invert_mask());
        assert_eq!(m.invert_mask, vec![true, false]);
        assert!(!MeasurementGate::new("result").has_invert_mask());
        assert_eq!(Gate::from(m).name(), "measure");
    }
}
