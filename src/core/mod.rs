//! # Core Codec Components
//!
//! Low-level value codecs and TLV framing.
//!
//! This module provides the building blocks the schema layer composes:
//! primitive layouts, the codec contract, the built-in leaf and composite
//! codecs, and the record header layout.
//!
//! ## Components
//! - **Layout**: fixed-width primitive slots (`u8`..`f64`, byte blocks)
//! - **Value**: the dynamic value type and the `Codec` trait
//! - **Leaf codecs**: single, sequence, dictionary, fixed string
//! - **Composite**: positional combination of sized sub-codecs
//! - **Framing**: TLV header pack/unpack
//!
//! ## Wire Format
//! ```text
//! [code:W1] [length:W2] [payload:length bytes]   (repeated)
//! ```
//! with W1/W2 configurable per schema (default one byte each, big-endian).

pub mod composite;
pub mod framing;
pub mod layout;
pub mod leaf;
pub mod value;
