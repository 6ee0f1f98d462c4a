//! Variable values: scalars and fixed-length vectors.
//!
//! Every model variable holds a `Value`. The default variable type is a
//! scalar zero; vector values stand in for the array-valued variables of
//! large analyses.

use crate::error::{MfError, MfResult};

/// A variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Value {
    /// Scalar constructor.
    pub fn scalar(v: f64) -> Self {
        Value::Scalar(v)
    }

    /// Vector of `n` zeros.
    pub fn zeros(n: usize) -> Self {
        Value::Vector(vec![0.0; n])
    }

    /// Vector of `n` ones.
    pub fn ones(n: usize) -> Self {
        Value::Vector(vec![1.0; n])
    }

    /// Number of scalar entries (a scalar counts as 1).
    pub fn len(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Vector(v) => v.len(),
        }
    }

    /// True for a zero-length vector.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Vector(v) if v.is_empty())
    }

    /// Elementwise multiplication by a factor, preserving shape.
    pub fn scaled(&self, factor: f64) -> Value {
        match self {
            Value::Scalar(v) => Value::Scalar(v * factor),
            Value::Vector(v) => Value::Vector(v.iter().map(|x| x * factor).collect()),
        }
    }

    /// First entry, if any.
    pub fn first(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Vector(v) => v.first().copied(),
        }
    }

    /// Fail with `NonFinite` if any entry is NaN or infinite.
    pub fn check_finite(&self, what: &'static str) -> MfResult<()> {
        let bad = match self {
            Value::Scalar(v) => (!v.is_finite()).then_some(*v),
            Value::Vector(v) => v.iter().find(|x| !x.is_finite()).copied(),
        };
        match bad {
            Some(value) => Err(MfError::NonFinite { what, value }),
            None => Ok(()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(0.0)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}
