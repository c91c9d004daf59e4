//! Wire record types.
//!
//! A record is a JSON object with exactly one operation key (`exp_w`,
//! `exp_z`, `exp_11` or `measurement`) and, inside a schedule, an
//! `incremental_delay_picoseconds` field. Field names are part of the wire
//! contract.

use serde::{Deserialize, Serialize};
use xmon_ir::GridQubit;

use crate::error::{WireError, WireResult};

/// Wire form of a scalar parameter, as produced by a
/// [`ParameterCodec`](crate::param::ParameterCodec).
pub type WireValue = serde_json::Value;

/// One operation on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    /// The operation payload, keyed by its kind.
    #[serde(flatten)]
    pub op: WireOp,
    /// Picoseconds since the previous record's start time (absent = 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_delay_picoseconds: Option<u64>,
}

impl WireRecord {
    /// Create a record without a delay.
    pub fn new(op: WireOp) -> Self {
        Self {
            op,
            incremental_delay_picoseconds: None,
        }
    }

    /// Set the incremental delay.
    #[must_use]
    pub fn with_delay(mut self, picos: u64) -> Self {
        self.incremental_delay_picoseconds = Some(picos);
        self
    }

    /// The incremental delay, treating an absent field as zero.
    pub fn delay_picos(&self) -> u64 {
        self.incremental_delay_picoseconds.unwrap_or(0)
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> WireResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a record from a JSON value.
    ///
    /// Fails with [`WireError::UnknownRecordKind`] unless exactly one known
    /// operation key is present.
    pub fn from_json(value: &serde_json::Value) -> WireResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| WireError::UnknownRecordKind("record is not a JSON object".into()))?;

        let kinds = obj
            .keys()
            .filter(|k| WireOp::KEYS.contains(&k.as_str()))
            .count();
        if kinds != 1 {
            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            return Err(WireError::UnknownRecordKind(format!(
                "expected exactly one of {:?}, found keys {keys:?}",
                WireOp::KEYS
            )));
        }

        Ok(WireRecord::deserialize(value)?)
    }

    /// Parse a record from JSON text.
    pub fn from_json_str(text: &str) -> WireResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }
}

impl From<WireOp> for WireRecord {
    fn from(op: WireOp) -> Self {
        WireRecord::new(op)
    }
}

/// Operation payload of a wire record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireOp {
    /// Rotation about an axis in the XY plane.
    #[serde(rename = "exp_w")]
    ExpW(ExpW),
    /// Rotation about the Z axis.
    #[serde(rename = "exp_z")]
    ExpZ(ExpZ),
    /// Controlled phase on |11⟩.
    #[serde(rename = "exp_11")]
    Exp11(Exp11),
    /// Measurement.
    #[serde(rename = "measurement")]
    Measurement(Measurement),
}

impl WireOp {
    /// All operation keys, in declaration order.
    pub const KEYS: [&'static str; 4] = ["exp_w", "exp_z", "exp_11", "measurement"];

    /// The top-level key identifying this payload.
    pub fn key(&self) -> &'static str {
        match self {
            WireOp::ExpW(_) => "exp_w",
            WireOp::ExpZ(_) => "exp_z",
            WireOp::Exp11(_) => "exp_11",
            WireOp::Measurement(_) => "measurement",
        }
    }
}

/// `exp_w` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpW {
    pub target: GridQubit,
    pub axis_half_turns: WireValue,
    pub half_turns: WireValue,
}

/// `exp_z` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpZ {
    pub target: GridQubit,
    pub half_turns: WireValue,
}

/// `exp_11` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exp11 {
    pub target1: GridQubit,
    pub target2: GridQubit,
    pub half_turns: WireValue,
}

/// `measurement` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub targets: Vec<GridQubit>,
    pub key: String,
    /// JSON-encoded booleans (`"true"` / `"false"`), one per target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_mask: Option<Vec<String>>,
}
