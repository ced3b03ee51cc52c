//! # Schema Declarations
//!
//! Data-driven schema declaration via TOML.
//!
//! Schemas are normally declared in code through [`SchemaBuilder`], but a
//! record layout is often configuration rather than logic — device profiles,
//! per-tenant record types. This module deserializes a schema declaration
//! and turns it into the same immutable [`Schema`].
//!
//! ## Example
//! ```toml
//! [framing]
//! code_width = 2
//! length_width = 2
//! byte_order = "big"
//!
//! [[field]]
//! name = "delayed_restart"
//! code = 0x01
//! layout = "u16"
//!
//! [[field]]
//! name = "position"
//! code = 0x05
//! layout = ["u8", "u8"]
//! names = ["x", "y"]
//! label = "tile position"
//! ```

use serde::{Deserialize, Serialize};

use crate::core::framing::{ByteOrder, FieldWidth, FramingOptions};
use crate::core::layout::Prim;
use crate::core::leaf::{DictionaryCodec, SequenceCodec, SingleCodec};
use crate::error::{CodecError, Result};
use crate::schema::{Schema, SchemaBuilder};

/// A complete schema declaration as loaded from TOML.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SchemaConfig {
    /// Framing overrides; defaults to 1-byte code/length, big-endian.
    #[serde(default)]
    pub framing: FramingConfig,

    /// Field declarations, in order.
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,
}

/// Framing section of a schema declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FramingConfig {
    #[serde(default = "default_width")]
    pub code_width: usize,

    #[serde(default = "default_width")]
    pub length_width: usize,

    #[serde(default)]
    pub byte_order: ByteOrder,
}

fn default_width() -> usize {
    1
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            code_width: 1,
            length_width: 1,
            byte_order: ByteOrder::Big,
        }
    }
}

/// One field declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,
    pub code: u64,

    /// Layout tokens: a single token or an ordered list. Absent for
    /// fields served by override hooks.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,

    /// Slot names; turns a list layout into a dictionary codec.
    #[serde(default)]
    pub names: Option<Vec<String>>,

    #[serde(default)]
    pub label: Option<String>,
}

/// A layout declaration: one token or an ordered list of tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LayoutConfig {
    Single(String),
    Sequence(Vec<String>),
}

impl SchemaConfig {
    /// Parse a declaration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| CodecError::Config(format!("failed to parse TOML: {e}")))
    }

    /// Validate the declaration for common issues.
    ///
    /// Returns a list of validation errors. Empty list means the
    /// declaration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for width in [self.framing.code_width, self.framing.length_width] {
            if FieldWidth::try_from(width).is_err() {
                errors.push(format!(
                    "invalid framing width: {width} bytes (valid: 1, 2, 4, 8)"
                ));
            }
        }

        if self.fields.is_empty() {
            errors.push("schema declares no fields".to_string());
        }

        for field in &self.fields {
            if field.name.is_empty() {
                errors.push(format!("field with code {:#04x} has an empty name", field.code));
            }
            match (&field.layout, &field.names) {
                (Some(LayoutConfig::Single(_)), Some(_)) => errors.push(format!(
                    "field `{}`: names require a list layout",
                    field.name
                )),
                (None, Some(_)) => errors.push(format!(
                    "field `{}`: names require a layout",
                    field.name
                )),
                _ => {}
            }
            if let Some(layout) = &field.layout {
                let tokens: Vec<&String> = match layout {
                    LayoutConfig::Single(t) => vec![t],
                    LayoutConfig::Sequence(ts) => ts.iter().collect(),
                };
                for token in tokens {
                    if token.parse::<Prim>().is_err() {
                        errors.push(format!(
                            "field `{}`: invalid layout token `{token}`",
                            field.name
                        ));
                    }
                }
            }
        }

        errors
    }

    /// Build the immutable schema from this declaration.
    pub fn into_schema(self) -> Result<Schema> {
        let framing = FramingOptions {
            code_width: FieldWidth::try_from(self.framing.code_width)?,
            length_width: FieldWidth::try_from(self.framing.length_width)?,
            byte_order: self.framing.byte_order,
        };

        let mut builder = SchemaBuilder::new().framing(framing);
        for field in self.fields {
            builder = declare(builder, field)?;
        }
        builder.build()
    }
}

fn declare(builder: SchemaBuilder, field: FieldConfig) -> Result<SchemaBuilder> {
    let FieldConfig {
        name,
        code,
        layout,
        names,
        label,
    } = field;

    let builder = match (layout, names) {
        (None, None) => builder.raw_field(name, code),
        (None, Some(_)) => {
            return Err(CodecError::Config(format!(
                "field `{name}`: names require a layout"
            )))
        }
        (Some(LayoutConfig::Single(token)), None) => match label {
            Some(label) => builder.labeled_field(name, code, SingleCodec::from_layout(&token)?, label),
            None => builder.field(name, code, SingleCodec::from_layout(&token)?),
        },
        (Some(LayoutConfig::Single(_)), Some(_)) => {
            return Err(CodecError::Config(format!(
                "field `{name}`: names require a list layout"
            )))
        }
        (Some(LayoutConfig::Sequence(tokens)), names) => {
            let prims = tokens
                .iter()
                .map(|t| t.parse())
                .collect::<Result<Vec<Prim>>>()?;
            match names {
                Some(names) => {
                    let codec = DictionaryCodec::new(prims, names)?;
                    match label {
                        Some(label) => builder.labeled_field(name, code, codec, label),
                        None => builder.field(name, code, codec),
                    }
                }
                None => {
                    let codec = SequenceCodec::new(prims);
                    match label {
                        Some(label) => builder.labeled_field(name, code, codec, label),
                        None => builder.field(name, code, codec),
                    }
                }
            }
        }
    };
    Ok(builder)
}
