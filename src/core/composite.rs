//! # Composite Codec
//!
//! Combines an ordered list of sized sub-codecs into one codec. Encoding
//! concatenates each member's bytes in declaration order; decoding slices
//! the payload at each member's declared byte size.
//!
//! Members may be declared positionally (auto-named `field_0`, `field_1`,
//! ...) or with explicit names. Either way, encode and decode operate on a
//! positional tuple: member names are introspection only, never a dispatch
//! key. Upgrading named members to name-keyed dispatch would silently
//! change the wire contract for existing callers, so the positional
//! semantics are kept and pinned by tests.

use std::sync::Arc;

use crate::core::value::{Codec, Value};
use crate::error::{CodecError, Result};

struct Member {
    name: String,
    codec: Arc<dyn Codec>,
    size: usize,
}

/// Codec composed of sized sub-codecs, applied positionally.
pub struct CompositeCodec {
    members: Vec<Member>,
}

impl CompositeCodec {
    /// Compose sub-codecs positionally; members are named `field_0`,
    /// `field_1`, ... for introspection.
    pub fn positional(codecs: Vec<Arc<dyn Codec>>) -> Result<Self> {
        Self::from_pairs(
            codecs
                .into_iter()
                .enumerate()
                .map(|(i, codec)| (format!("field_{i}"), codec))
                .collect(),
        )
    }

    /// Compose sub-codecs with explicit member names. The names are
    /// documentation: values are still encoded and decoded positionally.
    pub fn named(pairs: Vec<(String, Arc<dyn Codec>)>) -> Result<Self> {
        Self::from_pairs(pairs)
    }

    fn from_pairs(pairs: Vec<(String, Arc<dyn Codec>)>) -> Result<Self> {
        let members = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (name, codec))| {
                let size = codec
                    .byte_size()
                    .ok_or(CodecError::UnsizedCompositeMember { index })?;
                Ok(Member { name, codec, size })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { members })
    }

    /// Member names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    fn total_size(&self) -> usize {
        self.members.iter().map(|m| m.size).sum()
    }
}

impl Codec for CompositeCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let values = match value {
            Value::Seq(values) => values,
            other => {
                return Err(CodecError::ValueType {
                    expected: "seq",
                    actual: other.type_name(),
                })
            }
        };
        if values.len() != self.members.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.members.len(),
                actual: values.len(),
            });
        }
        let mut out = Vec::with_capacity(self.total_size());
        for (member, value) in self.members.iter().zip(values) {
            let chunk = member.codec.encode(value)?;
            if chunk.len() != member.size {
                return Err(CodecError::SizeMismatch {
                    expected: member.size,
                    actual: chunk.len(),
                });
            }
            out.extend(chunk);
        }
        Ok(out)
    }

    fn decode(&self, binary: &[u8]) -> Result<Value> {
        let total = self.total_size();
        if binary.len() != total {
            return Err(CodecError::Decode(format!(
                "composite expects {total} bytes, got {}",
                binary.len()
            )));
        }
        let mut values = Vec::with_capacity(self.members.len());
        let mut offset = 0;
        for member in &self.members {
            let end = offset + member.size;
            values.push(member.codec.decode(&binary[offset..end])?);
            offset = end;
        }
        Ok(Value::Seq(values))
    }

    fn byte_size(&self) -> Option<usize> {
        Some(self.total_size())
    }
}
