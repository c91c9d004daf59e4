//! Scalar gate parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete or symbolic scalar parameter, e.g. a rotation exponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameter {
    /// A constant numeric value.
    Constant(f64),
    /// A symbolic parameter to be resolved at execution time.
    Symbol(String),
}

impl Parameter {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        Parameter::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        Parameter::Symbol(name.into())
    }

    /// Check if this parameter is symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Parameter::Symbol(_))
    }

    /// Get the value if this parameter is constant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Parameter::Constant(v) => Some(*v),
            Parameter::Symbol(_) => None,
        }
    }

    /// Get the symbol name if this parameter is symbolic.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Parameter::Symbol(name) => Some(name),
            Parameter::Constant(_) => None,
        }
    }

    /// Bind a symbol to a value, returning a new parameter.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            Parameter::Symbol(n) if n == name => Parameter::Constant(value),
            _ => self.clone(),
        }
    }

    /// Check whether this is the constant `value`.
    pub(crate) fn is_constant(&self, value: f64) -> bool {
        self.as_f64() == Some(value)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Constant(v) => write!(f, "{v}"),
            Parameter::Symbol(name) => write!(f, "{name}"),
        }
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Constant(value)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Parameter::Constant(f64::from(value))
    }
}

impl From<&str> for Parameter {
    fn from(name: &str) -> Self {
        Parameter::Symbol(name.to_string())
    }
}
