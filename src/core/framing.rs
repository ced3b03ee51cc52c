//! # TLV Framing
//!
//! Header layout for tag-length-value records.
//!
//! Every record on the wire is `[code][length][payload]`. The code and
//! length fields each have a configurable width (1, 2, 4 or 8 bytes) and a
//! configurable byte order. The default framing is one byte each,
//! big-endian, giving a 2-byte header with codes 0-255 and payloads up to
//! 255 bytes per record.

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Byte order of the header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// Width of one header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
    U64,
}

impl FieldWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
            FieldWidth::U64 => 8,
        }
    }

    /// Largest value the field can carry.
    pub const fn max_value(self) -> u64 {
        match self {
            FieldWidth::U8 => u8::MAX as u64,
            FieldWidth::U16 => u16::MAX as u64,
            FieldWidth::U32 => u32::MAX as u64,
            FieldWidth::U64 => u64::MAX,
        }
    }
}

impl TryFrom<usize> for FieldWidth {
    type Error = CodecError;

    fn try_from(bytes: usize) -> Result<Self> {
        match bytes {
            1 => Ok(FieldWidth::U8),
            2 => Ok(FieldWidth::U16),
            4 => Ok(FieldWidth::U32),
            8 => Ok(FieldWidth::U64),
            other => Err(CodecError::UnsupportedWidth(other)),
        }
    }
}

/// Header layout of one schema: code/length field widths and byte order.
///
/// Resolved once per schema and shared read-only by every parse/build call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingOptions {
    pub code_width: FieldWidth,
    pub length_width: FieldWidth,
    pub byte_order: ByteOrder,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            code_width: FieldWidth::U8,
            length_width: FieldWidth::U8,
            byte_order: ByteOrder::Big,
        }
    }
}

impl FramingOptions {
    /// Framing with explicit field widths in bytes (1, 2, 4 or 8).
    pub fn with_widths(code_bytes: usize, length_bytes: usize) -> Result<Self> {
        Ok(Self {
            code_width: FieldWidth::try_from(code_bytes)?,
            length_width: FieldWidth::try_from(length_bytes)?,
            byte_order: ByteOrder::Big,
        })
    }

    /// Same framing with the given byte order.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Total header size in bytes.
    pub const fn size(&self) -> usize {
        self.code_width.bytes() + self.length_width.bytes()
    }

    /// Offset of the code field within a record. Always zero.
    pub const fn code_offset(&self) -> usize {
        0
    }

    /// Offset of the length field within a record.
    pub const fn length_offset(&self) -> usize {
        self.code_width.bytes()
    }

    /// Pack one header: code field then length field.
    pub fn pack(&self, code: u64, length: usize) -> Result<Vec<u8>> {
        if code > self.code_width.max_value() {
            return Err(CodecError::HeaderOverflow {
                value: code,
                width: self.code_width.bytes(),
            });
        }
        let length = length as u64;
        if length > self.length_width.max_value() {
            return Err(CodecError::HeaderOverflow {
                value: length,
                width: self.length_width.bytes(),
            });
        }

        let mut out = BytesMut::with_capacity(self.size());
        match self.byte_order {
            ByteOrder::Big => {
                out.put_uint(code, self.code_width.bytes());
                out.put_uint(length, self.length_width.bytes());
            }
            ByteOrder::Little => {
                out.put_uint_le(code, self.code_width.bytes());
                out.put_uint_le(length, self.length_width.bytes());
            }
        }
        Ok(out.to_vec())
    }

    /// Read the code field at `offset`.
    pub fn unpack_code(&self, buffer: &[u8], offset: usize) -> Result<u64> {
        self.read_field(buffer, offset, self.code_width)
    }

    /// Read the length field at `offset` (the caller positions the offset at
    /// `record_start + length_offset()`).
    pub fn unpack_length(&self, buffer: &[u8], offset: usize) -> Result<usize> {
        self.read_field(buffer, offset, self.length_width)
            .map(|v| v as usize)
    }

    fn read_field(&self, buffer: &[u8], offset: usize, width: FieldWidth) -> Result<u64> {
        let end = offset + width.bytes();
        if buffer.len() < end {
            return Err(CodecError::InsufficientBuffer {
                expected: end,
                actual: buffer.len(),
            });
        }
        let mut slice = &buffer[offset..end];
        Ok(match self.byte_order {
            ByteOrder::Big => slice.get_uint(width.bytes()),
            ByteOrder::Little => slice.get_uint_le(width.bytes()),
        })
    }
}
