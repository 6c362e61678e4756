use core::fmt;
use std::io;

use super::{TextWriter, WriterConfig, write};
use crate::describe::Describe;
use crate::error::WriteError;

/// Forwards formatted text to an [`io::Write`], keeping the first I/O error.
struct IoAdapter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

impl<W> IoAdapter<W> {
    fn take_error(&mut self, err: WriteError) -> WriteError {
        match (err, self.error.take()) {
            (WriteError::Fmt(_), Some(io)) => WriteError::Io(io),
            (err, _) => err,
        }
    }
}

/// Writes `value` as pretty text to `out`, then flushes it.
///
/// # Examples
///
/// ```
/// use vc_describe::Describe;
///
/// #[derive(Describe)]
/// struct Foo {
///     id: u8,
/// }
///
/// let mut out = Vec::new();
/// vc_describe::to_writer(&mut out, &Foo { id: 3 }).unwrap();
/// assert_eq!(out, b"{\n  \"id\": 3\n}");
/// ```
#[inline]
pub fn to_writer<T: Describe, W: io::Write>(out: W, value: &T) -> Result<(), WriteError> {
    to_writer_with(out, value, WriterConfig::new())
}

/// Writes `value` to `out` with the given [`WriterConfig`], then flushes it.
pub fn to_writer_with<T: Describe, W: io::Write>(
    out: W,
    value: &T,
    config: WriterConfig,
) -> Result<(), WriteError> {
    let adapter = IoAdapter {
        inner: out,
        error: None,
    };
    let mut writer = TextWriter::with_config(adapter, config);

    write(&mut writer, value).map_err(|err| writer.get_mut().take_error(err))?;

    let mut adapter = writer.finish()?;
    adapter.inner.flush()?;
    Ok(())
}
