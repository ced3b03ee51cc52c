//! # Schema Registry
//!
//! Collects declared fields into a validated, immutable [`Schema`].
//!
//! A schema is built exactly once per record type, at definition time:
//! the builder walks the declarations in order, rejects duplicate tag
//! codes, materializes the code and name lookup tables, and resolves the
//! framing options. The resulting `Schema` is read-only and safe to share
//! across threads; every parse/build call reuses it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::framing::FramingOptions;
use crate::core::value::{Codec, Value};
use crate::error::{CodecError, Result};

/// One declared field: a tag code bound to a codec and a name.
///
/// Immutable after registration. A field declared without a codec is
/// resolved through the [`Overrides`] table at parse/build time, or
/// dropped when no hook is registered either.
pub struct Field {
    code: u64,
    name: String,
    codec: Option<Arc<dyn Codec>>,
    label: Option<String>,
}

impl Field {
    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> Option<&dyn Codec> {
        self.codec.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An immutable record schema: declared fields, their lookup tables, and
/// the framing options.
pub struct Schema {
    fields: Vec<Arc<Field>>,
    code_lookup: HashMap<u64, Arc<Field>>,
    name_lookup: HashMap<String, Arc<Field>>,
    framing: FramingOptions,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn framing(&self) -> &FramingOptions {
        &self.framing
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().map(Arc::as_ref)
    }

    pub fn field_by_code(&self, code: u64) -> Option<&Field> {
        self.code_lookup.get(&code).map(Arc::as_ref)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.name_lookup.get(name).map(Arc::as_ref)
    }
}

/// Ordered collection of field declarations, turned into a [`Schema`] by
/// [`build`](SchemaBuilder::build).
pub struct SchemaBuilder {
    fields: Vec<Arc<Field>>,
    framing: FramingOptions,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            framing: FramingOptions::default(),
        }
    }

    /// Declare a field binding `code` to `codec` under `name`.
    pub fn field(self, name: impl Into<String>, code: u64, codec: impl Codec + 'static) -> Self {
        self.push(name.into(), code, Some(Arc::new(codec)), None)
    }

    /// Declare a field with an already-shared codec.
    pub fn shared_field(
        self,
        name: impl Into<String>,
        code: u64,
        codec: Arc<dyn Codec>,
    ) -> Self {
        self.push(name.into(), code, Some(codec), None)
    }

    /// Declare a field with a documentation label.
    pub fn labeled_field(
        self,
        name: impl Into<String>,
        code: u64,
        codec: impl Codec + 'static,
        label: impl Into<String>,
    ) -> Self {
        self.push(name.into(), code, Some(Arc::new(codec)), Some(label.into()))
    }

    /// Declare a field with no bound codec; it is served by the override
    /// table at parse/build time.
    pub fn raw_field(self, name: impl Into<String>, code: u64) -> Self {
        self.push(name.into(), code, None, None)
    }

    /// Override the default framing (1-byte code, 1-byte length,
    /// big-endian).
    pub fn framing(mut self, framing: FramingOptions) -> Self {
        self.framing = framing;
        self
    }

    fn push(
        mut self,
        name: String,
        code: u64,
        codec: Option<Arc<dyn Codec>>,
        label: Option<String>,
    ) -> Self {
        self.fields.push(Arc::new(Field {
            code,
            name,
            codec,
            label,
        }));
        self
    }

    /// Validate the declarations and produce the immutable schema.
    pub fn build(self) -> Result<Schema> {
        let mut code_lookup = HashMap::with_capacity(self.fields.len());
        let mut name_lookup = HashMap::with_capacity(self.fields.len());

        for field in &self.fields {
            if code_lookup.insert(field.code, Arc::clone(field)).is_some() {
                return Err(CodecError::DuplicateCode {
                    code: field.code,
                    name: field.name.clone(),
                });
            }
            if name_lookup
                .insert(field.name.clone(), Arc::clone(field))
                .is_some()
            {
                return Err(CodecError::DuplicateName(field.name.clone()));
            }
        }

        debug!(
            fields = self.fields.len(),
            header_size = self.framing.size(),
            "schema registered"
        );

        Ok(Schema {
            fields: self.fields,
            code_lookup,
            name_lookup,
            framing: self.framing,
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

type ParseHook = Box<dyn Fn(&[u8]) -> Result<Option<Value>> + Send + Sync>;
type BuildHook = Box<dyn Fn(&Value) -> Result<Option<Vec<u8>>> + Send + Sync>;

/// Optional per-field callback table, supplied alongside a schema.
///
/// Hooks are keyed by field name and consulted only for fields with no
/// bound codec. A hook returning `Ok(None)` behaves like an absent codec:
/// the field is skipped.
#[derive(Default)]
pub struct Overrides {
    parse: HashMap<String, ParseHook>,
    build: HashMap<String, BuildHook>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parse hook for the named field.
    pub fn on_parse<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.parse.insert(name.into(), Box::new(hook));
        self
    }

    /// Register a build hook for the named field.
    pub fn on_build<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Value) -> Result<Option<Vec<u8>>> + Send + Sync + 'static,
    {
        self.build.insert(name.into(), Box::new(hook));
        self
    }

    pub(crate) fn parse_hook(&self, name: &str) -> Option<&ParseHook> {
        self.parse.get(name)
    }

    pub(crate) fn build_hook(&self, name: &str) -> Option<&BuildHook> {
        self.build.get(name)
    }
}
