#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Library code uses `crate`, doc tests use `vc_describe`, and the derive
// macro can only emit one of them.
extern crate self as vc_describe;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod describe;
mod error;
mod field;

pub mod de;
pub mod ser;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use vc_describe_derive::Describe;

pub use describe::{Describe, Description, Scalar, ScalarKind, ScalarOps, ScalarValue};
pub use error::{Found, ReadError, WriteError};
pub use field::{FieldAccessor, FieldDescriptor, FieldList, Projection};

pub use de::{TextReader, from_str, read, read_from_str, read_sequence};
pub use ser::{FloatFormat, Serializer, TextWriter, WriterConfig};
pub use ser::{to_string, to_string_with, write, write_sequence};

#[cfg(feature = "std")]
pub use ser::{to_writer, to_writer_with};
