use alloc::vec::Vec;
use core::fmt::{self, Write};

use super::{FloatFormat, Serializer, WriterConfig};
use crate::describe::ScalarValue;
use crate::error::WriteError;

// -----------------------------------------------------------------------------
// Frame

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Map,
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Nothing written since the container was opened.
    Open,
    /// A key was written, its value follows on the same line.
    AfterKey,
    /// A value was written, the next sibling needs a separator.
    AfterValue,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    container: Container,
    slot: Slot,
}

// -----------------------------------------------------------------------------
// TextWriter

/// A [`Serializer`] producing JSON-like text.
///
/// Strings are written verbatim between quotes. Nothing is escaped, so
/// strings containing `"` or `\` produce output the reader rejects.
/// Non-finite floats are written as `inf`, `-inf` and `NaN`, which the
/// reader rejects as well.
///
/// # Examples
///
/// ```
/// use vc_describe::{Serializer, ScalarValue, TextWriter};
///
/// let mut writer = TextWriter::new(String::new());
/// writer.begin_map().unwrap();
/// writer.write_scalar(ScalarValue::Str("list")).unwrap();
/// writer.begin_sequence().unwrap();
/// writer.write_scalar(ScalarValue::Int(1)).unwrap();
/// writer.write_scalar(ScalarValue::F64(2.5)).unwrap();
/// writer.end_sequence().unwrap();
/// writer.end_map().unwrap();
///
/// assert_eq!(
///     writer.finish().unwrap(),
///     "{\n  \"list\": [\n    1,\n    2.5\n  ]\n}",
/// );
/// ```
pub struct TextWriter<W> {
    out: W,
    config: WriterConfig,
    frames: Vec<Frame>,
    wrote_root: bool,
}

impl<W: Write> TextWriter<W> {
    /// Creates a writer with the default [`WriterConfig`].
    #[inline]
    pub fn new(out: W) -> Self {
        Self::with_config(out, WriterConfig::new())
    }

    /// Creates a writer with the given [`WriterConfig`].
    #[inline]
    pub fn with_config(out: W, config: WriterConfig) -> Self {
        Self {
            out,
            config,
            frames: Vec::new(),
            wrote_root: false,
        }
    }

    /// Returns the output settings.
    #[inline]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Returns the number of open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Borrows the underlying output.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Mutably borrows the underlying output.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Returns the output, checking that every container was closed.
    pub fn finish(self) -> Result<W, WriteError> {
        if self.frames.is_empty() {
            Ok(self.out)
        } else {
            Err(WriteError::Unclosed(self.frames.len()))
        }
    }

    /// Returns the output without any check.
    #[inline]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn newline(&mut self, depth: usize) -> fmt::Result {
        if !self.config.pretty {
            return Ok(());
        }
        self.out.write_char('\n')?;
        for _ in 0..depth * self.config.indent {
            self.out.write_char(' ')?;
        }
        Ok(())
    }

    /// Writes whatever has to come before the next key or value.
    fn separate(&mut self) -> fmt::Result {
        let depth = self.frames.len();
        match self.frames.last().map(|frame| frame.slot) {
            None if self.wrote_root => self.out.write_char('\n'),
            None | Some(Slot::AfterKey) => Ok(()),
            Some(Slot::Open) => self.newline(depth),
            Some(Slot::AfterValue) => {
                self.out.write_char(',')?;
                self.newline(depth)
            }
        }
    }

    fn expects_key(&self) -> bool {
        matches!(
            self.frames.last(),
            Some(Frame {
                container: Container::Map,
                slot: Slot::Open | Slot::AfterValue,
            })
        )
    }

    fn value_written(&mut self) {
        match self.frames.last_mut() {
            Some(frame) => frame.slot = Slot::AfterValue,
            None => self.wrote_root = true,
        }
    }

    fn begin(&mut self, container: Container, open: char) -> Result<(), WriteError> {
        if self.expects_key() {
            return Err(WriteError::NonStringKey(match container {
                Container::Map => "map",
                Container::Sequence => "sequence",
            }));
        }

        self.separate()?;
        self.out.write_char(open)?;
        self.frames.push(Frame {
            container,
            slot: Slot::Open,
        });
        Ok(())
    }

    fn end(
        &mut self,
        container: Container,
        close: char,
        event: &'static str,
    ) -> Result<(), WriteError> {
        let slot = match self.frames.last() {
            Some(frame) if frame.container == container => frame.slot,
            _ => return Err(WriteError::Unbalanced(event)),
        };
        if slot == Slot::AfterKey {
            return Err(WriteError::DanglingKey);
        }

        self.frames.pop();
        // empty containers stay on one line
        if slot != Slot::Open {
            self.newline(self.frames.len())?;
        }
        self.out.write_char(close)?;
        self.value_written();
        Ok(())
    }

    fn write_float<F: fmt::Display>(&mut self, value: F) -> fmt::Result {
        match self.config.float_format {
            FloatFormat::Shortest => write!(self.out, "{value}"),
            FloatFormat::Fixed(precision) => write!(self.out, "{value:.precision$}"),
        }
    }

    fn write_token(&mut self, value: ScalarValue<'_>) -> fmt::Result {
        match value {
            ScalarValue::Str(s) => {
                self.out.write_char('"')?;
                self.out.write_str(s)?;
                self.out.write_char('"')
            }
            ScalarValue::Int(v) => write!(self.out, "{v}"),
            ScalarValue::UInt(v) => write!(self.out, "{v}"),
            ScalarValue::F32(v) => self.write_float(v),
            ScalarValue::F64(v) => self.write_float(v),
        }
    }
}

impl<W: Write> Serializer for TextWriter<W> {
    #[inline]
    fn begin_map(&mut self) -> Result<(), WriteError> {
        self.begin(Container::Map, '{')
    }

    #[inline]
    fn end_map(&mut self) -> Result<(), WriteError> {
        self.end(Container::Map, '}', "end_map")
    }

    #[inline]
    fn begin_sequence(&mut self) -> Result<(), WriteError> {
        self.begin(Container::Sequence, '[')
    }

    #[inline]
    fn end_sequence(&mut self) -> Result<(), WriteError> {
        self.end(Container::Sequence, ']', "end_sequence")
    }

    fn write_scalar(&mut self, value: ScalarValue<'_>) -> Result<(), WriteError> {
        if !self.expects_key() {
            self.separate()?;
            self.write_token(value)?;
            self.value_written();
            return Ok(());
        }

        let ScalarValue::Str(key) = value else {
            return Err(WriteError::NonStringKey(value.kind().name()));
        };

        self.separate()?;
        self.write_token(ScalarValue::Str(key))?;
        self.out.write_str(if self.config.pretty { ": " } else { ":" })?;
        if let Some(frame) = self.frames.last_mut() {
            frame.slot = Slot::AfterKey;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::TextWriter;
    use crate::Describe;
    use crate::describe::ScalarValue;
    use crate::error::WriteError;
    use crate::ser::{FloatFormat, Serializer, WriterConfig, to_string, to_string_with};

    #[derive(Describe)]
    struct Inner {
        x: f32,
        text: String,
    }

    #[derive(Describe)]
    struct Outer {
        a: i32,
        b: f32,
        c: Inner,
    }

    fn sample() -> Outer {
        Outer {
            a: 1,
            b: 3.0,
            c: Inner {
                x: 2.718281,
                text: "bar".to_string(),
            },
        }
    }

    #[test]
    fn pretty_output() {
        let expected = "{\n  \"a\": 1,\n  \"b\": 3,\n  \"c\": {\n    \"x\": 2.718281,\n    \"text\": \"bar\"\n  }\n}";
        assert_eq!(to_string(&sample()).unwrap(), expected);
    }

    #[test]
    fn compact_output() {
        let output = to_string_with(&sample(), WriterConfig::compact()).unwrap();
        assert_eq!(output, r#"{"a":1,"b":3,"c":{"x":2.718281,"text":"bar"}}"#);
    }

    #[test]
    fn custom_indent_and_fixed_floats() {
        let config = WriterConfig::new()
            .with_indent(1)
            .with_float_format(FloatFormat::Fixed(2));
        let output = to_string_with(&sample(), config).unwrap();
        let expected = "{\n \"a\": 1,\n \"b\": 3.00,\n \"c\": {\n  \"x\": 2.72,\n  \"text\": \"bar\"\n }\n}";
        assert_eq!(output, expected);
    }

    #[test]
    fn scalars_at_the_root() {
        assert_eq!(to_string(&-5_i64).unwrap(), "-5");
        assert_eq!(to_string(&String::from("hi")).unwrap(), "\"hi\"");
        assert_eq!(to_string(&0.1_f64).unwrap(), "0.1");
    }

    #[test]
    fn strings_are_not_escaped() {
        assert_eq!(to_string(&String::from("a\"b")).unwrap(), "\"a\"b\"");
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let mut writer = TextWriter::new(String::new());
        writer.begin_sequence().unwrap();
        writer.begin_map().unwrap();
        writer.end_map().unwrap();
        writer.begin_sequence().unwrap();
        writer.end_sequence().unwrap();
        writer.end_sequence().unwrap();
        assert_eq!(writer.finish().unwrap(), "[\n  {},\n  []\n]");
    }

    #[test]
    fn root_values_are_separated_by_newlines() {
        let mut writer = TextWriter::with_config(String::new(), WriterConfig::compact());
        writer.write_scalar(ScalarValue::UInt(1)).unwrap();
        writer.begin_map().unwrap();
        writer.end_map().unwrap();
        assert_eq!(writer.finish().unwrap(), "1\n{}");
    }

    #[test]
    fn keys_must_be_strings() {
        let mut writer = TextWriter::new(String::new());
        writer.begin_map().unwrap();
        assert!(matches!(
            writer.write_scalar(ScalarValue::Int(1)),
            Err(WriteError::NonStringKey("integer"))
        ));
        assert!(matches!(
            writer.begin_sequence(),
            Err(WriteError::NonStringKey("sequence"))
        ));
    }

    #[test]
    fn misuse_is_reported() {
        let mut writer = TextWriter::new(String::new());
        assert!(matches!(
            writer.end_map(),
            Err(WriteError::Unbalanced("end_map"))
        ));

        writer.begin_map().unwrap();
        assert!(matches!(
            writer.end_sequence(),
            Err(WriteError::Unbalanced("end_sequence"))
        ));

        writer.write_scalar(ScalarValue::Str("key")).unwrap();
        assert!(matches!(writer.end_map(), Err(WriteError::DanglingKey)));
        assert_eq!(writer.depth(), 1);
        assert!(matches!(writer.finish(), Err(WriteError::Unclosed(1))));
    }
}
