//! # Leaf Codecs
//!
//! The built-in fixed-layout codecs:
//! - [`SingleCodec`]: exactly one primitive slot
//! - [`SequenceCodec`]: a fixed-arity ordered tuple of primitives
//! - [`DictionaryCodec`]: a sequence addressed by declared names
//! - [`FixedStringCodec`]: a fixed-width text block with NUL padding

use crate::core::framing::ByteOrder;
use crate::core::layout::Prim;
use crate::core::value::{Codec, Value, ValueMap};
use crate::error::{CodecError, Result};

/// Codec for a single primitive value.
#[derive(Debug, Clone)]
pub struct SingleCodec {
    prim: Prim,
    order: ByteOrder,
}

impl SingleCodec {
    pub fn new(prim: Prim) -> Self {
        Self {
            prim,
            order: ByteOrder::Big,
        }
    }

    pub fn with_order(prim: Prim, order: ByteOrder) -> Self {
        Self { prim, order }
    }

    /// Construct from a layout token such as `"u16"` or `"bytes4"`.
    pub fn from_layout(token: &str) -> Result<Self> {
        Ok(Self::new(token.parse()?))
    }
}

impl Codec for SingleCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        self.prim.pack(value, self.order)
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        self.prim.unpack(binary, self.order)
    }

    fn byte_size(&self) -> Option<usize> {
        Some(self.prim.size())
    }
}

/// Codec for a fixed-arity tuple of primitives, encoded in declaration
/// order with no padding between slots.
#[derive(Debug, Clone)]
pub struct SequenceCodec {
    prims: Vec<Prim>,
    order: ByteOrder,
}

impl SequenceCodec {
    pub fn new(prims: Vec<Prim>) -> Self {
        Self {
            prims,
            order: ByteOrder::Big,
        }
    }

    pub fn with_order(prims: Vec<Prim>, order: ByteOrder) -> Self {
        Self { prims, order }
    }

    /// Construct from layout tokens, e.g. `&["u8", "u8", "u16"]`.
    pub fn from_layout(tokens: &[&str]) -> Result<Self> {
        let prims = tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(prims))
    }

    pub fn arity(&self) -> usize {
        self.prims.len()
    }

    fn encode_tuple(&self, values: &[Value]) -> Result<Vec<u8>> {
        if values.len() != self.prims.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.prims.len(),
                actual: values.len(),
            });
        }
        let mut out = Vec::with_capacity(self.prims.iter().map(Prim::size).sum());
        for (prim, value) in self.prims.iter().zip(values) {
            out.extend(prim.pack(value, self.order)?);
        }
        Ok(out)
    }

    fn decode_tuple(&self, binary: &[u8]) -> Result<Vec<Value>> {
        let total: usize = self.prims.iter().map(Prim::size).sum();
        if binary.len() != total {
            return Err(CodecError::Decode(format!(
                "sequence expects {total} bytes, got {}",
                binary.len()
            )));
        }
        let mut values = Vec::with_capacity(self.prims.len());
        let mut offset = 0;
        for prim in &self.prims {
            let end = offset + prim.size();
            values.push(prim.unpack(&binary[offset..end], self.order)?);
            offset = end;
        }
        Ok(values)
    }
}

impl Codec for SequenceCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        match value {
            Value::Seq(values) => self.encode_tuple(values),
            other => Err(CodecError::ValueType {
                expected: "seq",
                actual: other.type_name(),
            }),
        }
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        Ok(Value::Seq(self.decode_tuple(binary)?))
    }

    fn byte_size(&self) -> Option<usize> {
        Some(self.prims.iter().map(Prim::size).sum())
    }
}

/// A [`SequenceCodec`] addressed by declared names instead of positions.
///
/// Encoding takes a map that must supply exactly the declared names;
/// decoding re-projects the tuple into a map keyed by them, in declaration
/// order.
#[derive(Debug, Clone)]
pub struct DictionaryCodec {
    inner: SequenceCodec,
    names: Vec<String>,
}

impl DictionaryCodec {
    pub fn new(prims: Vec<Prim>, names: Vec<String>) -> Result<Self> {
        if names.len() != prims.len() {
            return Err(CodecError::NameCountMismatch {
                names: names.len(),
                slots: prims.len(),
            });
        }
        Ok(Self {
            inner: SequenceCodec::new(prims),
            names,
        })
    }

    /// Construct from layout tokens and names of equal arity.
    pub fn from_layout(tokens: &[&str], names: &[&str]) -> Result<Self> {
        let prims = tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<_>>>()?;
        Self::new(prims, names.iter().map(|n| (*n).to_owned()).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Codec for DictionaryCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let map = match value {
            Value::Map(map) => map,
            other => {
                return Err(CodecError::ValueType {
                    expected: "map",
                    actual: other.type_name(),
                })
            }
        };
        for key in map.keys() {
            if !self.names.iter().any(|n| n == key) {
                return Err(CodecError::UnknownKey(key.clone()));
            }
        }
        let tuple = self
            .names
            .iter()
            .map(|name| {
                map.get(name)
                    .cloned()
                    .ok_or_else(|| CodecError::MissingKey(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.inner.encode_tuple(&tuple)
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        let tuple = self.inner.decode_tuple(binary)?;
        let map: ValueMap = self.names.iter().cloned().zip(tuple).collect();
        Ok(Value::Map(map))
    }

    fn byte_size(&self) -> Option<usize> {
        self.inner.byte_size()
    }
}

/// Codec for a fixed-width text block.
///
/// Unlike a bare `bytesN` slot, decoding trims trailing NUL padding before
/// the UTF-8 conversion, so short strings round-trip cleanly.
#[derive(Debug, Clone)]
pub struct FixedStringCodec {
    byte_length: usize,
}

impl FixedStringCodec {
    pub fn new(byte_length: usize) -> Self {
        Self { byte_length }
    }
}

impl Codec for FixedStringCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Prim::Bytes(self.byte_length).pack(value, ByteOrder::Big)
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        if binary.len() != self.byte_length {
            return Err(CodecError::Decode(format!(
                "fixed string expects {} bytes, got {}",
                self.byte_length,
                binary.len()
            )));
        }
        let trimmed = match binary.iter().rposition(|b| *b != 0) {
            Some(last) => &binary[..=last],
            None => &binary[..0],
        };
        let text = std::str::from_utf8(trimmed)
            .map_err(|e| CodecError::Decode(format!("fixed string is not UTF-8: {e}")))?;
        Ok(Value::Str(text.to_owned()))
    }

    fn byte_size(&self) -> Option<usize> {
        Some(self.byte_length)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn single_u8() {
        let codec = SingleCodec::from_layout("u8").unwrap();
        assert_eq!(codec.encode(&Value::Int(35)).unwrap(), vec![0x23]);
        assert_eq!(codec.decode(&[0x15]).unwrap(), Value::Int(21));
    }

    #[test]
    fn sequence_of_two_u16() {
        let codec = SequenceCodec::from_layout(&["u16", "u16"]).unwrap();
        let value = Value::Seq(vec![Value::Int(1), Value::Int(1)]);
        assert_eq!(
            codec.encode(&value).unwrap(),
            vec![0x00, 0x01, 0x00, 0x01]
        );
        assert_eq!(
            codec.decode(&[0x00, 0x01, 0x00, 0x02]).unwrap(),
            Value::Seq(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn sequence_with_mixed_text_slot() {
        let codec = SequenceCodec::from_layout(&["u8", "bytes3"]).unwrap();
        let value = Value::Seq(vec![Value::Int(9), Value::from("123")]);
        assert_eq!(codec.encode(&value).unwrap(), b"\x09123");
        assert_eq!(
            codec.decode(b"\x09123").unwrap(),
            Value::Seq(vec![Value::Int(9), Value::from("123")])
        );
    }

    #[test]
    fn sequence_arity_mismatch() {
        let codec = SequenceCodec::from_layout(&["u8", "u8"]).unwrap();
        assert!(matches!(
            codec.encode(&Value::Seq(vec![Value::Int(1)])),
            Err(CodecError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn dictionary_round_trip() {
        let codec = DictionaryCodec::from_layout(&["u16", "u16"], &["x", "y"]).unwrap();
        let mut map = ValueMap::new();
        map.insert("x".into(), Value::Int(1));
        map.insert("y".into(), Value::Int(1));
        assert_eq!(
            codec.encode(&Value::Map(map)).unwrap(),
            vec![0x00, 0x01, 0x00, 0x01]
        );

        let decoded = codec.decode(&[0x00, 0x01, 0x00, 0x02]).unwrap();
        let mut expected = ValueMap::new();
        expected.insert("x".into(), Value::Int(1));
        expected.insert("y".into(), Value::Int(2));
        assert_eq!(decoded, Value::Map(expected));
    }

    #[test]
    fn dictionary_requires_every_declared_name() {
        let codec = DictionaryCodec::from_layout(&["u8", "u8"], &["x", "y"]).unwrap();
        let mut map = ValueMap::new();
        map.insert("x".into(), Value::Int(1));
        assert!(matches!(
            codec.encode(&Value::Map(map)),
            Err(CodecError::MissingKey(name)) if name == "y"
        ));
    }

    #[test]
    fn dictionary_rejects_unknown_names() {
        let codec = DictionaryCodec::from_layout(&["u8"], &["x"]).unwrap();
        let mut map = ValueMap::new();
        map.insert("x".into(), Value::Int(1));
        map.insert("z".into(), Value::Int(2));
        assert!(matches!(
            codec.encode(&Value::Map(map)),
            Err(CodecError::UnknownKey(name)) if name == "z"
        ));
    }

    #[test]
    fn dictionary_name_count_must_match() {
        assert!(matches!(
            DictionaryCodec::from_layout(&["u8", "u8"], &["x"]),
            Err(CodecError::NameCountMismatch { .. })
        ));
    }

    #[test]
    fn fixed_string_exact_width() {
        let codec = FixedStringCodec::new(5);
        assert_eq!(codec.encode(&Value::from("12345")).unwrap(), b"12345");
        assert_eq!(codec.decode(b"09872").unwrap(), Value::from("09872"));
    }

    #[test]
    fn fixed_string_trims_nul_padding() {
        let codec = FixedStringCodec::new(5);
        assert_eq!(codec.encode(&Value::from("ab")).unwrap(), b"ab\x00\x00\x00");
        assert_eq!(codec.decode(b"ab\x00\x00\x00").unwrap(), Value::from("ab"));
    }
}
