//! Drives describable values through the serde data model.
//!
//! - [`SerializeDriver`] writes a value with any serde serializer. Records
//!   become structs with their fields in declaration order.
//! - [`DeserializeDriver`] is a [`DeserializeSeed`] that merges input into an
//!   existing value, with the same rules as [`read`]: members missing from
//!   the input are left untouched and unknown members are an error.
//!
//! Field values are passed across the type-erased field accessors with
//! `erased-serde`.
//!
//! [`DeserializeSeed`]: serde_core::de::DeserializeSeed
//! [`read`]: crate::read

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::DeserializeDriver;
pub use ser::SerializeDriver;
