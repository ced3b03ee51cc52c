//! # Error Types
//!
//! All failure modes of schema definition, parsing, and building.
//!
//! ## Error Categories
//! - **Define errors**: invalid schema declarations (duplicate tag codes,
//!   bad layout tokens, unsized composite members)
//! - **Parse errors**: malformed or truncated TLV buffers, unknown tag codes
//! - **Build errors**: values that do not fit their declared layout
//! - **Config errors**: invalid TOML schema declarations
//!
//! Every error aborts the whole call: a parse either returns a complete
//! decoded map or fails, never a partial result.

use thiserror::Error;

/// Primary error type for all codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    // ---- define-time ----
    #[error("duplicate code {code:#04x} for field `{name}`")]
    DuplicateCode { code: u64, name: String },

    #[error("invalid layout token `{0}`")]
    InvalidLayout(String),

    #[error("composite member {index} has no known byte size")]
    UnsizedCompositeMember { index: usize },

    #[error("unsupported field width: {0} bytes")]
    UnsupportedWidth(usize),

    #[error("duplicate field name `{0}`")]
    DuplicateName(String),

    #[error("dictionary declares {names} names for {slots} layout slots")]
    NameCountMismatch { names: usize, slots: usize },

    // ---- parse-time ----
    #[error("insufficient buffer: expected {expected} bytes but got {actual}")]
    InsufficientBuffer { expected: usize, actual: usize },

    #[error("invalid code {0:#04x}")]
    InvalidCode(u64),

    #[error("decode error: {0}")]
    Decode(String),

    // ---- build-time ----
    #[error("value type mismatch: expected {expected}, got {actual}")]
    ValueType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value {value} out of range for {layout}")]
    OutOfRange { value: i64, layout: &'static str },

    #[error("encoded value is {actual} bytes, layout holds {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("sequence arity mismatch: expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("missing dictionary key `{0}`")]
    MissingKey(String),

    #[error("unknown dictionary key `{0}`")]
    UnknownKey(String),

    #[error("field value overflows header field: {value} does not fit in {width} bytes")]
    HeaderOverflow { value: u64, width: usize },

    // ---- configuration ----
    #[error("configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
