// -----------------------------------------------------------------------------
// FloatFormat

/// How the [`TextWriter`](super::TextWriter) renders floating point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    /// The shortest text that parses back to the same value (`Display`).
    ///
    /// Finite values round-trip exactly. Integral values have no fraction,
    /// `2.0` is written as `2`.
    /// Infinities and NaN are written as `inf`, `-inf` and `NaN`, which
    /// do not read back.
    #[default]
    Shortest,
    /// A fixed number of digits after the decimal point.
    Fixed(usize),
}

// -----------------------------------------------------------------------------
// WriterConfig

/// Output settings of the [`TextWriter`](super::TextWriter).
///
/// ```
/// use vc_describe::{FloatFormat, WriterConfig};
///
/// let config = WriterConfig::new()
///     .with_indent(4)
///     .with_float_format(FloatFormat::Fixed(3));
///
/// assert!(config.pretty);
/// assert_eq!(config.indent, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Spaces per nesting level, only used when `pretty`.
    pub indent: usize,
    /// One member per line, indented. Otherwise everything is on one line
    /// without optional whitespace.
    pub pretty: bool,
    pub float_format: FloatFormat,
}

impl WriterConfig {
    /// Pretty output, two spaces per level, shortest floats.
    #[inline]
    pub const fn new() -> Self {
        Self {
            indent: 2,
            pretty: true,
            float_format: FloatFormat::Shortest,
        }
    }

    /// Single line output.
    #[inline]
    pub const fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::new()
        }
    }

    #[inline]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[inline]
    pub const fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }
}

impl Default for WriterConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
