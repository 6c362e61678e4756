//! Format independent writing and the pretty text writer.

// -----------------------------------------------------------------------------
// Modules

mod config;
mod serializer;
mod text_writer;

#[cfg(feature = "std")]
mod io;

// -----------------------------------------------------------------------------
// Exports

pub use config::{FloatFormat, WriterConfig};
pub use serializer::{Serializer, write, write_sequence};
pub use text_writer::TextWriter;

#[cfg(feature = "std")]
pub use io::{to_writer, to_writer_with};

use alloc::string::String;

use crate::describe::Describe;
use crate::error::WriteError;

/// Writes `value` as pretty text.
///
/// ```
/// let text = vc_describe::to_string(&String::from("foo")).unwrap();
/// assert_eq!(text, "\"foo\"");
/// ```
#[inline]
pub fn to_string<T: Describe>(value: &T) -> Result<String, WriteError> {
    to_string_with(value, WriterConfig::new())
}

/// Writes `value` as text with the given [`WriterConfig`].
pub fn to_string_with<T: Describe>(value: &T, config: WriterConfig) -> Result<String, WriteError> {
    let mut writer = TextWriter::with_config(String::new(), config);
    write(&mut writer, value)?;
    writer.finish()
}
