//! # Primitive Layouts
//!
//! [`Prim`] is one fixed-width slot in a value layout: an integer or float
//! of a declared width, or a fixed-length byte block. Leaf codecs are built
//! from one or more of these.
//!
//! Layout tokens (used by the TOML declaration surface and the
//! `from_layout` constructors): `u8`, `i8`, `u16`, `i16`, `u32`, `i32`,
//! `u64`, `i64`, `f32`, `f64`, and `bytesN` for an N-byte block.

use std::str::FromStr;

use crate::core::framing::ByteOrder;
use crate::core::value::Value;
use crate::error::{CodecError, Result};

/// One primitive slot of a binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prim {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// Fixed-width byte block. Textual values are converted through UTF-8.
    Bytes(usize),
}

impl Prim {
    /// Encoded size in bytes.
    pub const fn size(&self) -> usize {
        match self {
            Prim::U8 | Prim::I8 => 1,
            Prim::U16 | Prim::I16 => 2,
            Prim::U32 | Prim::I32 | Prim::F32 => 4,
            Prim::U64 | Prim::I64 | Prim::F64 => 8,
            Prim::Bytes(n) => *n,
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Prim::U8 => "u8",
            Prim::I8 => "i8",
            Prim::U16 => "u16",
            Prim::I16 => "i16",
            Prim::U32 => "u32",
            Prim::I32 => "i32",
            Prim::U64 => "u64",
            Prim::I64 => "i64",
            Prim::F32 => "f32",
            Prim::F64 => "f64",
            Prim::Bytes(_) => "bytes",
        }
    }

    /// Pack one value into this slot.
    pub fn pack(&self, value: &Value, order: ByteOrder) -> Result<Vec<u8>> {
        match self {
            Prim::U8 => self.pack_int::<1>(value, order, 0, u8::MAX as i64, |i, _| {
                [(i as u8); 1]
            }),
            Prim::I8 => self.pack_int::<1>(value, order, i8::MIN as i64, i8::MAX as i64, |i, _| {
                (i as i8).to_be_bytes()
            }),
            Prim::U16 => self.pack_int::<2>(value, order, 0, u16::MAX as i64, |i, o| match o {
                ByteOrder::Big => (i as u16).to_be_bytes(),
                ByteOrder::Little => (i as u16).to_le_bytes(),
            }),
            Prim::I16 => {
                self.pack_int::<2>(value, order, i16::MIN as i64, i16::MAX as i64, |i, o| match o {
                    ByteOrder::Big => (i as i16).to_be_bytes(),
                    ByteOrder::Little => (i as i16).to_le_bytes(),
                })
            }
            Prim::U32 => self.pack_int::<4>(value, order, 0, u32::MAX as i64, |i, o| match o {
                ByteOrder::Big => (i as u32).to_be_bytes(),
                ByteOrder::Little => (i as u32).to_le_bytes(),
            }),
            Prim::I32 => {
                self.pack_int::<4>(value, order, i32::MIN as i64, i32::MAX as i64, |i, o| match o {
                    ByteOrder::Big => (i as i32).to_be_bytes(),
                    ByteOrder::Little => (i as i32).to_le_bytes(),
                })
            }
            Prim::U64 => self.pack_int::<8>(value, order, 0, i64::MAX, |i, o| match o {
                ByteOrder::Big => (i as u64).to_be_bytes(),
                ByteOrder::Little => (i as u64).to_le_bytes(),
            }),
            Prim::I64 => self.pack_int::<8>(value, order, i64::MIN, i64::MAX, |i, o| match o {
                ByteOrder::Big => i.to_be_bytes(),
                ByteOrder::Little => i.to_le_bytes(),
            }),
            Prim::F32 => {
                let f = value.as_float()? as f32;
                Ok(match order {
                    ByteOrder::Big => f.to_be_bytes().to_vec(),
                    ByteOrder::Little => f.to_le_bytes().to_vec(),
                })
            }
            Prim::F64 => {
                let f = value.as_float()?;
                Ok(match order {
                    ByteOrder::Big => f.to_be_bytes().to_vec(),
                    ByteOrder::Little => f.to_le_bytes().to_vec(),
                })
            }
            Prim::Bytes(n) => pack_block(value, *n),
        }
    }

    fn pack_int<const N: usize>(
        &self,
        value: &Value,
        order: ByteOrder,
        min: i64,
        max: i64,
        emit: impl FnOnce(i64, ByteOrder) -> [u8; N],
    ) -> Result<Vec<u8>> {
        let i = value.as_int()?;
        if i < min || i > max {
            return Err(CodecError::OutOfRange {
                value: i,
                layout: self.name(),
            });
        }
        Ok(emit(i, order).to_vec())
    }

    /// Unpack one value from exactly `self.size()` bytes.
    pub fn unpack(&self, binary: &[u8], order: ByteOrder) -> Result<Value> {
        if binary.len() != self.size() {
            return Err(CodecError::Decode(format!(
                "layout {} expects {} bytes, got {}",
                self.name(),
                self.size(),
                binary.len()
            )));
        }
        let value = match self {
            Prim::U8 => Value::Int(binary[0] as i64),
            Prim::I8 => Value::Int(binary[0] as i8 as i64),
            Prim::U16 => Value::Int(unpack_int::<2>(binary, order, |b| {
                u16::from_be_bytes(b) as i64
            }, |b| u16::from_le_bytes(b) as i64)?),
            Prim::I16 => Value::Int(unpack_int::<2>(binary, order, |b| {
                i16::from_be_bytes(b) as i64
            }, |b| i16::from_le_bytes(b) as i64)?),
            Prim::U32 => Value::Int(unpack_int::<4>(binary, order, |b| {
                u32::from_be_bytes(b) as i64
            }, |b| u32::from_le_bytes(b) as i64)?),
            Prim::I32 => Value::Int(unpack_int::<4>(binary, order, |b| {
                i32::from_be_bytes(b) as i64
            }, |b| i32::from_le_bytes(b) as i64)?),
            Prim::U64 => {
                let raw = match order {
                    ByteOrder::Big => u64::from_be_bytes(to_array::<8>(binary)?),
                    ByteOrder::Little => u64::from_le_bytes(to_array::<8>(binary)?),
                };
                let i = i64::try_from(raw).map_err(|_| {
                    CodecError::Decode(format!("u64 value {raw} exceeds representable range"))
                })?;
                Value::Int(i)
            }
            Prim::I64 => Value::Int(unpack_int::<8>(
                binary,
                order,
                i64::from_be_bytes,
                i64::from_le_bytes,
            )?),
            Prim::F32 => Value::Float(match order {
                ByteOrder::Big => f32::from_be_bytes(to_array::<4>(binary)?) as f64,
                ByteOrder::Little => f32::from_le_bytes(to_array::<4>(binary)?) as f64,
            }),
            Prim::F64 => Value::Float(match order {
                ByteOrder::Big => f64::from_be_bytes(to_array::<8>(binary)?),
                ByteOrder::Little => f64::from_le_bytes(to_array::<8>(binary)?),
            }),
            Prim::Bytes(_) => unpack_block(binary),
        };
        Ok(value)
    }
}

/// A textual value targeting a byte block goes through UTF-8; raw bytes
/// pass through. Shorter inputs are zero-padded; longer inputs are an error.
fn pack_block(value: &Value, width: usize) -> Result<Vec<u8>> {
    let raw = match value {
        Value::Str(s) => s.as_bytes(),
        Value::Bytes(b) => b.as_slice(),
        other => {
            return Err(CodecError::ValueType {
                expected: "str or bytes",
                actual: other.type_name(),
            })
        }
    };
    if raw.len() > width {
        return Err(CodecError::SizeMismatch {
            expected: width,
            actual: raw.len(),
        });
    }
    let mut out = vec![0u8; width];
    out[..raw.len()].copy_from_slice(raw);
    Ok(out)
}

/// Byte blocks decode back to text when they are valid UTF-8, otherwise
/// they stay raw bytes.
fn unpack_block(binary: &[u8]) -> Value {
    match std::str::from_utf8(binary) {
        Ok(s) => Value::Str(s.to_owned()),
        Err(_) => Value::Bytes(binary.to_vec()),
    }
}

fn to_array<const N: usize>(binary: &[u8]) -> Result<[u8; N]> {
    binary
        .try_into()
        .map_err(|_| CodecError::Decode(format!("expected {N} bytes, got {}", binary.len())))
}

fn unpack_int<const N: usize>(
    binary: &[u8],
    order: ByteOrder,
    be: impl FnOnce([u8; N]) -> i64,
    le: impl FnOnce([u8; N]) -> i64,
) -> Result<i64> {
    let arr = to_array::<N>(binary)?;
    Ok(match order {
        ByteOrder::Big => be(arr),
        ByteOrder::Little => le(arr),
    })
}

impl FromStr for Prim {
    type Err = CodecError;

    fn from_str(token: &str) -> Result<Self> {
        let prim = match token {
            "u8" => Prim::U8,
            "i8" => Prim::I8,
            "u16" => Prim::U16,
            "i16" => Prim::I16,
            "u32" => Prim::U32,
            "i32" => Prim::I32,
            "u64" => Prim::U64,
            "i64" => Prim::I64,
            "f32" => Prim::F32,
            "f64" => Prim::F64,
            _ => {
                let n = token
                    .strip_prefix("bytes")
                    .and_then(|rest| rest.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| CodecError::InvalidLayout(token.to_owned()))?;
                Prim::Bytes(n)
            }
        };
        Ok(prim)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn u16_big_endian() {
        let bytes = Prim::U16.pack(&Value::Int(180), ByteOrder::Big).unwrap();
        assert_eq!(bytes, vec![0x00, 0xB4]);
        assert_eq!(
            Prim::U16.unpack(&bytes, ByteOrder::Big).unwrap(),
            Value::Int(180)
        );
    }

    #[test]
    fn u32_little_endian() {
        let bytes = Prim::U32.pack(&Value::Int(1), ByteOrder::Little).unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn out_of_range_is_a_build_error() {
        assert!(matches!(
            Prim::U8.pack(&Value::Int(256), ByteOrder::Big),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            Prim::U16.pack(&Value::Int(-1), ByteOrder::Big),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn byte_block_round_trips_text() {
        let bytes = Prim::Bytes(3).pack(&Value::from("123"), ByteOrder::Big).unwrap();
        assert_eq!(bytes, b"123");
        assert_eq!(
            Prim::Bytes(3).unpack(b"123", ByteOrder::Big).unwrap(),
            Value::from("123")
        );
    }

    #[test]
    fn short_block_is_zero_padded_long_block_errors() {
        let bytes = Prim::Bytes(4).pack(&Value::from("ab"), ByteOrder::Big).unwrap();
        assert_eq!(bytes, b"ab\x00\x00");
        assert!(matches!(
            Prim::Bytes(2).pack(&Value::from("abc"), ByteOrder::Big),
            Err(CodecError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn non_utf8_block_stays_bytes() {
        assert_eq!(
            Prim::Bytes(2).unpack(&[0xFF, 0xFE], ByteOrder::Big).unwrap(),
            Value::Bytes(vec![0xFF, 0xFE])
        );
    }

    #[test]
    fn layout_tokens() {
        assert_eq!("u16".parse::<Prim>().unwrap(), Prim::U16);
        assert_eq!("bytes4".parse::<Prim>().unwrap(), Prim::Bytes(4));
        assert!("bytes0".parse::<Prim>().is_err());
        assert!("q8".parse::<Prim>().is_err());
    }

    #[test]
    fn wrong_size_fails_decode() {
        assert!(matches!(
            Prim::U16.unpack(&[0x01], ByteOrder::Big),
            Err(CodecError::Decode(_))
        ));
    }
}
