//! Scalar parameter wire encoding.

use serde_json::json;
use xmon_ir::Parameter;

use crate::error::{WireError, WireResult};
use crate::record::WireValue;

/// Converts scalar gate parameters to and from their wire form.
///
/// The gate codec treats the wire form as opaque; only the implementation
/// decides whether a value is a literal or a symbolic placeholder.
pub trait ParameterCodec {
    /// Encode a parameter.
    ///
    /// Fails for values the wire form cannot carry.
    fn encode_scalar(&self, value: &Parameter) -> WireResult<WireValue>;

    /// Decode a parameter.
    fn decode_scalar(&self, value: &WireValue) -> WireResult<Parameter>;
}

/// The default parameter encoding.
///
/// | Parameter     | Wire form                   |
/// |---------------|-----------------------------|
/// | `Constant(v)` | `{"raw": v}`                |
/// | `Symbol(s)`   | `{"parameter_key": "s"}`    |
///
/// JSON has no NaN or infinity, so non-finite constants are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawParameterCodec;

impl ParameterCodec for RawParameterCodec {
    fn encode_scalar(&self, value: &Parameter) -> WireResult<WireValue> {
        match value {
            Parameter::Constant(v) if !v.is_finite() => Err(WireError::InvalidParameter(
                format!("non-finite constant {v}"),
            )),
            Parameter::Constant(v) => Ok(json!({ "raw": v })),
            Parameter::Symbol(name) => Ok(json!({ "parameter_key": name })),
        }
    }

    fn decode_scalar(&self, value: &WireValue) -> WireResult<Parameter> {
        if let Some(raw) = value.get("raw") {
            return raw
                .as_f64()
                .map(Parameter::Constant)
                .ok_or_else(|| WireError::InvalidParameter(format!("non-numeric raw value {raw}")));
        }
        if let Some(key) = value.get("parameter_key") {
            return key
                .as_str()
                .map(Parameter::symbol)
                .ok_or_else(|| WireError::InvalidParameter(format!("non-string key {key}")));
        }
        Err(WireError::InvalidParameter(value.to_string()))
    }
}

impl<P: ParameterCodec + ?Sized> ParameterCodec for &P {
    fn encode_scalar(&self, value: &Parameter) -> WireResult<WireValue> {
        (**self).encode_scalar(value)
    }

    fn decode_scalar(&self, value: &WireValue) -> WireResult<Parameter> {
        (**self).decode_scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_wire_form() {
        let codec = RawParameterCodec;
        let wire = codec.encode_scalar(&Parameter::constant(0.5)).unwrap();
        assert_eq!(wire, json!({"raw": 0.5}));
        assert_eq!(codec.decode_scalar(&wire).unwrap(), Parameter::constant(0.5));
    }

    #[test]
    fn test_symbol_wire_form() {
        let codec = RawParameterCodec;
        let wire = codec.encode_scalar(&Parameter::symbol("theta")).unwrap();
        assert_eq!(wire, json!({"parameter_key": "theta"}));
        assert_eq!(codec.decode_scalar(&wire).unwrap(), Parameter::symbol("theta"));
    }

    #[test]
    fn test_non_finite_constant_rejected() {
        let codec = RawParameterCodec;
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                codec.encode_scalar(&Parameter::constant(v)),
                Err(WireError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_integer_raw_decodes_as_float() {
        let codec = RawParameterCodec;
        assert_eq!(
            codec.decode_scalar(&json!({"raw": 1})).unwrap(),
            Parameter::constant(1.0)
        );
    }

    #[test]
    fn test_invalid_values() {
        let codec = RawParameterCodec;
        for bad in [json!({"raw": "x"}), json!({"parameter_key": 3}), json!(0.5), json!({})] {
            assert!(matches!(
                codec.decode_scalar(&bad),
                Err(WireError::InvalidParameter(_))
            ));
        }
    }
}
