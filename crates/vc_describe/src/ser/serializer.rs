use crate::describe::{Describe, Description, ScalarValue, short_type_name};
use crate::error::WriteError;

// -----------------------------------------------------------------------------
// Serializer

/// A sink of structural events, independent of the output format.
///
/// Every `begin_*` must be matched by the corresponding `end_*`, innermost
/// first. Inside a map, keys and values alternate and keys are string
/// scalars. [`write`] always produces such a sequence.
pub trait Serializer {
    fn begin_map(&mut self) -> Result<(), WriteError>;

    fn end_map(&mut self) -> Result<(), WriteError>;

    fn begin_sequence(&mut self) -> Result<(), WriteError>;

    fn end_sequence(&mut self) -> Result<(), WriteError>;

    /// Writes an atomic value, or a key when a map expects one.
    fn write_scalar(&mut self, value: ScalarValue<'_>) -> Result<(), WriteError>;
}

// -----------------------------------------------------------------------------
// write

/// Writes `value` to `serializer`.
///
/// A record becomes a map of its fields in declaration order, each field
/// value written recursively. A scalar becomes a single scalar event.
///
/// # Examples
///
/// ```
/// use vc_describe::{Describe, TextWriter, WriterConfig};
///
/// #[derive(Describe)]
/// struct Inner {
///     x: f32,
///     text: String,
/// }
///
/// #[derive(Describe)]
/// struct Outer {
///     a: i32,
///     c: Inner,
/// }
///
/// let value = Outer { a: 1, c: Inner { x: 0.5, text: "foo".into() } };
///
/// let mut writer = TextWriter::with_config(String::new(), WriterConfig::compact());
/// vc_describe::write(&mut writer, &value).unwrap();
///
/// assert_eq!(writer.finish().unwrap(), r#"{"a":1,"c":{"x":0.5,"text":"foo"}}"#);
/// ```
pub fn write<T: Describe>(serializer: &mut dyn Serializer, value: &T) -> Result<(), WriteError> {
    match T::description() {
        Description::Record(fields) => {
            log::trace!("writing record `{}`", short_type_name::<T>());

            serializer.begin_map()?;
            for field in fields {
                serializer.write_scalar(ScalarValue::Str(field.name()))?;
                field.write(value, serializer)?;
            }
            serializer.end_map()
        }
        Description::Scalar(ops) => serializer.write_scalar(ops.to_value(value)),
    }
}

/// Writes `values` as a sequence.
pub fn write_sequence<T: Describe>(
    serializer: &mut dyn Serializer,
    values: &[T],
) -> Result<(), WriteError> {
    serializer.begin_sequence()?;
    for value in values {
        write(serializer, value)?;
    }
    serializer.end_sequence()
}
