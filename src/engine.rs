//! # Codec Engine
//!
//! The `parse`/`build` entry points that drive the TLV loop.
//!
//! Both operations are pure functions over an immutable [`Schema`] and a
//! caller-supplied buffer or value map; they may run concurrently from any
//! number of threads without synchronization.
//!
//! ## Leniency contract
//! The engine is deliberately lenient at the edges, which is what gives
//! schemas optional-field semantics:
//! - parse drops falsy decoded values (zero numbers, empty strings/tuples)
//! - parse silently ignores trailing bytes shorter than one header
//! - build silently skips names the schema does not declare
//! - build emits nothing for a field whose encoding is empty
//!
//! Everything else fails hard: short payloads, unknown tag codes and
//! truncated headers abort the whole call with no partial result.

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::core::value::ValueMap;
use crate::error::{CodecError, Result};
use crate::schema::{Overrides, Schema};

impl Schema {
    /// Decode a TLV buffer into a name-keyed value map.
    ///
    /// An empty buffer yields an empty map. A buffer that is non-empty but
    /// no longer than one header, a record whose declared length exceeds
    /// the remaining bytes, or a tag code the schema does not declare all
    /// fail with a parse error.
    pub fn parse(&self, buffer: &[u8]) -> Result<ValueMap> {
        self.parse_with(buffer, &Overrides::default())
    }

    /// [`parse`](Schema::parse) with per-field hooks for codec-less fields.
    pub fn parse_with(&self, buffer: &[u8], overrides: &Overrides) -> Result<ValueMap> {
        let header = self.framing().size();
        let mut values = ValueMap::new();

        if buffer.is_empty() {
            return Ok(values);
        }
        if buffer.len() <= header {
            return Err(CodecError::InsufficientBuffer {
                expected: header + 1,
                actual: buffer.len(),
            });
        }

        let mut cursor = 0;
        let bound = buffer.len() - header;

        // Trailing bytes shorter than one full header terminate the loop
        // and are ignored.
        while cursor <= bound {
            let code = self.framing().unpack_code(buffer, cursor)?;
            let length = self
                .framing()
                .unpack_length(buffer, cursor + self.framing().length_offset())?;

            // A hostile length near u64::MAX must not overflow the slice
            // bound; clamping to the buffer end makes the short-payload
            // check below report it.
            let start = cursor + header;
            let end = start
                .checked_add(length)
                .map_or(buffer.len(), |end| end.min(buffer.len()));
            let payload = &buffer[start..end];
            if payload.len() != length {
                return Err(CodecError::InsufficientBuffer {
                    expected: length,
                    actual: payload.len(),
                });
            }

            let field = self
                .field_by_code(code)
                .ok_or(CodecError::InvalidCode(code))?;
            trace!(code, length = length as u64, field = field.name(), "record");

            let value = match field.codec() {
                Some(codec) => Some(codec.decode(payload)?),
                None => match overrides.parse_hook(field.name()) {
                    Some(hook) => hook(payload)?,
                    None => None,
                },
            };

            // Falsy values are dropped; a later record for the same name
            // wins over an earlier one.
            if let Some(value) = value {
                if !value.is_falsy() {
                    values.insert(field.name().to_owned(), value);
                }
            }

            cursor += header + length;
        }

        debug!(records = values.len(), bytes = buffer.len(), "parsed");
        Ok(values)
    }

    /// Encode a name-keyed value map into a TLV buffer.
    ///
    /// Fields are emitted in the map's own iteration order (insertion
    /// order for [`ValueMap`]), not schema declaration order. Names the
    /// schema does not declare are skipped, as are fields whose encoding
    /// comes out empty.
    pub fn build(&self, values: &ValueMap) -> Result<Vec<u8>> {
        self.build_with(values, &Overrides::default())
    }

    /// [`build`](Schema::build) with per-field hooks for codec-less fields.
    pub fn build_with(&self, values: &ValueMap, overrides: &Overrides) -> Result<Vec<u8>> {
        let mut out = BytesMut::new();

        for (name, value) in values {
            let Some(field) = self.field_by_name(name) else {
                trace!(name = %name, "name not declared by schema, skipping");
                continue;
            };

            let payload = match field.codec() {
                Some(codec) => Some(codec.encode(value)?),
                None => match overrides.build_hook(field.name()) {
                    Some(hook) => hook(value)?,
                    None => None,
                },
            };

            match payload {
                Some(payload) if !payload.is_empty() => {
                    out.extend_from_slice(&self.framing().pack(field.code(), payload.len())?);
                    out.extend_from_slice(&payload);
                }
                _ => trace!(name = %name, "empty encoding, skipping"),
            }
        }

        debug!(bytes = out.len(), "built");
        Ok(out.to_vec())
    }
}
