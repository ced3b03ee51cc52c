//! # tlv-codec
//!
//! Schema-driven codec between name-keyed value maps and tag-length-value
//! (TLV) binary records.
//!
//! A schema declares a set of named fields, each binding a numeric tag
//! code to a value codec. [`Schema::build`] serializes a map of field
//! names to values into a concatenated TLV byte stream;
//! [`Schema::parse`] walks such a stream back into a map. Everything
//! operates over in-memory buffers: no network, file or transport concerns.
//!
//! ## Wire Format
//! ```text
//! [code:W1] [length:W2] [payload:length bytes]   (repeated)
//! ```
//! Default framing is a 1-byte code and 1-byte length, big-endian; schemas
//! may widen either field.
//!
//! ## Example
//! ```rust
//! use tlv_codec::{Schema, SingleCodec, Value, ValueMap};
//!
//! # fn main() -> tlv_codec::Result<()> {
//! let schema = Schema::builder()
//!     .field("delayed_restart", 0x01, SingleCodec::from_layout("u16")?)
//!     .field("awaken_period", 0x03, SingleCodec::from_layout("u32")?)
//!     .build()?;
//!
//! let mut values = ValueMap::new();
//! values.insert("delayed_restart".into(), Value::Int(180));
//! let bytes = schema.build(&values)?;
//! assert_eq!(bytes, vec![0x01, 0x02, 0x00, 0xB4]);
//!
//! let decoded = schema.parse(&bytes)?;
//! assert_eq!(decoded.get("delayed_restart"), Some(&Value::Int(180)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom codecs
//! Any type implementing [`Codec`] (`encode` to bytes, `decode` to a
//! value) may serve as a field codec; implementors that also report a
//! [`byte_size`](Codec::byte_size) can be combined into a
//! [`CompositeCodec`].

pub mod config;
pub mod core;
mod engine;
pub mod error;
pub mod exts;
pub mod schema;

pub use crate::config::SchemaConfig;
pub use crate::core::composite::CompositeCodec;
pub use crate::core::framing::{ByteOrder, FieldWidth, FramingOptions};
pub use crate::core::layout::Prim;
pub use crate::core::leaf::{DictionaryCodec, FixedStringCodec, SequenceCodec, SingleCodec};
pub use crate::core::value::{Codec, Value, ValueMap};
pub use crate::error::{CodecError, Result};
pub use crate::schema::{Field, Overrides, Schema, SchemaBuilder};
