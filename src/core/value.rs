//! # Values and the Codec Contract
//!
//! [`Value`] is the dynamic value a TLV field carries: a single integer,
//! float, string or byte block, an ordered tuple of those, or a name-keyed
//! mapping. [`Codec`] is the two-operation contract every field codec
//! implements, whether built in or supplied by the caller.

use indexmap::IndexMap;

use crate::error::{CodecError, Result};

/// Name-keyed value mapping.
///
/// Backed by an insertion-ordered map, so iterating it (and therefore
/// building from it) is deterministic in the order the caller inserted.
pub type ValueMap = IndexMap<String, Value>;

/// A decoded or to-be-encoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    /// Whether the value is dropped by the engine's falsy rule: zero
    /// numbers and empty strings, byte blocks, tuples and maps.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Seq(s) => s.is_empty(),
            Value::Map(m) => m.is_empty(),
        }
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
        }
    }

    pub(crate) fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(CodecError::ValueType {
                expected: "int",
                actual: other.type_name(),
            }),
        }
    }

    pub(crate) fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            other => Err(CodecError::ValueType {
                expected: "float",
                actual: other.type_name(),
            }),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
    }
}

/// The codec contract: encode a value to bytes, decode bytes to a value.
///
/// Any implementor may serve as a field codec. Codecs that additionally
/// report a fixed [`byte_size`](Codec::byte_size) may be combined into a
/// [`CompositeCodec`](crate::core::composite::CompositeCodec).
pub trait Codec: Send + Sync {
    /// Encode one value into its fixed binary layout.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    /// Decode one payload into a value.
    fn decode(&self, binary: &[u8]) -> Result<Value>;

    /// Encoded size in bytes, when the layout has one.
    fn byte_size(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_rule() {
        assert!(Value::Int(0).is_falsy());
        assert!(Value::Str(String::new()).is_falsy());
        assert!(Value::Seq(vec![]).is_falsy());
        assert!(!Value::Int(-1).is_falsy());
        assert!(!Value::Str("x".into()).is_falsy());
        assert!(!Value::Seq(vec![Value::Int(0)]).is_falsy());
    }

    #[test]
    fn int_coerces_to_float_but_not_back() {
        assert_eq!(Value::Int(3).as_float().ok(), Some(3.0));
        assert!(Value::Float(3.0).as_int().is_err());
    }
}
