//! # Extension Codecs
//!
//! Ready-made codecs for values with a textual surface form and a compact
//! wire form. These are ordinary [`Codec`] implementors with known byte
//! sizes, so they work both as field codecs and as composite members.

use std::net::Ipv4Addr;

use crate::core::value::{Codec, Value};
use crate::error::{CodecError, Result};

/// Dotted-quad IPv4 address as 4 bytes (`"192.168.1.200"` ↔ `C0 A8 01 C8`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Codec;

impl Codec for Ipv4Codec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let text = expect_str(value)?;
        let addr: Ipv4Addr = text
            .parse()
            .map_err(|_| CodecError::InvalidValue(format!("not an IPv4 address: `{text}`")))?;
        Ok(addr.octets().to_vec())
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        let octets: [u8; 4] = binary.try_into().map_err(|_| {
            CodecError::Decode(format!("IPv4 address expects 4 bytes, got {}", binary.len()))
        })?;
        Ok(Value::Str(Ipv4Addr::from(octets).to_string()))
    }

    fn byte_size(&self) -> Option<usize> {
        Some(4)
    }
}

/// IPv4 address and port as 6 bytes, port big-endian
/// (`"192.168.1.200:10200"` ↔ `C0 A8 01 C8 27 D8`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4PortCodec;

impl Codec for Ipv4PortCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let text = expect_str(value)?;
        let (host, port) = text
            .rsplit_once(':')
            .ok_or_else(|| CodecError::InvalidValue(format!("missing `:port` in `{text}`")))?;
        let addr: Ipv4Addr = host
            .parse()
            .map_err(|_| CodecError::InvalidValue(format!("not an IPv4 address: `{host}`")))?;
        let port: u16 = port
            .parse()
            .map_err(|_| CodecError::InvalidValue(format!("not a port number: `{port}`")))?;

        let mut out = Vec::with_capacity(6);
        out.extend(addr.octets());
        out.extend(port.to_be_bytes());
        Ok(out)
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        if binary.len() != 6 {
            return Err(CodecError::Decode(format!(
                "IPv4 address with port expects 6 bytes, got {}",
                binary.len()
            )));
        }
        let octets: [u8; 4] = binary[..4]
            .try_into()
            .map_err(|_| CodecError::Decode("IPv4 octets".into()))?;
        let port = u16::from_be_bytes([binary[4], binary[5]]);
        Ok(Value::Str(format!("{}:{port}", Ipv4Addr::from(octets))))
    }

    fn byte_size(&self) -> Option<usize> {
        Some(6)
    }
}

fn expect_str(value: &Value) -> Result<&str> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(CodecError::ValueType {
            expected: "str",
            actual: other.type_name(),
        }),
    }
}
