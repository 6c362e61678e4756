//! Reading text into describable values.
//!
//! Reading a record is a **partial merge**: members present in the input
//! overwrite the matching fields, every other field keeps its value. Use
//! [`from_str`] to start from `Default` instead.

// -----------------------------------------------------------------------------
// Modules

mod text_reader;

// -----------------------------------------------------------------------------
// Exports

pub use text_reader::TextReader;

use alloc::vec::Vec;

use crate::describe::{Describe, Description, ScalarOps, short_type_name};
use crate::error::ReadError;
use crate::field::FieldList;

// -----------------------------------------------------------------------------
// read

/// Reads the next value of `reader` into `value`.
///
/// - A record expects a map. Each key selects the field of the same name,
///   whose value is read recursively. Fields missing from the map are left
///   untouched, and the order of the keys does not matter. A key with no
///   matching field fails with [`ReadError::UnknownMember`].
/// - A scalar is overwritten by the next token.
///
/// On failure `value` may be partially updated: the members read before the
/// error keep their new values.
///
/// # Examples
///
/// ```
/// use vc_describe::{Describe, TextReader};
///
/// #[derive(Describe, Debug, PartialEq)]
/// struct Foo {
///     a: i32,
///     b: String,
/// }
///
/// let mut foo = Foo { a: 1, b: "old".into() };
///
/// let mut reader = TextReader::new(r#"{ "b": "new" }"#);
/// vc_describe::read(&mut reader, &mut foo).unwrap();
///
/// assert_eq!(foo, Foo { a: 1, b: "new".into() });
/// ```
pub fn read<T: Describe>(reader: &mut TextReader<'_>, value: &mut T) -> Result<(), ReadError> {
    match T::description() {
        Description::Record(fields) => read_record(reader, fields, value),
        Description::Scalar(ops) => read_scalar(reader, ops, value),
    }
}

fn read_record<T: 'static>(
    reader: &mut TextReader<'_>,
    fields: &'static FieldList<T>,
    value: &mut T,
) -> Result<(), ReadError> {
    let record = short_type_name::<T>();
    log::trace!("reading record `{record}`");

    let mut applied = 0_usize;
    let result = read_members(reader, fields, value, &mut applied);

    if let Err(err) = &result
        && applied > 0
    {
        log::debug!("read of `{record}` aborted after {applied} member(s): {err}");
    }
    result
}

/// Reads the members of a map, counting those merged into `value`.
fn read_members<T: 'static>(
    reader: &mut TextReader<'_>,
    fields: &'static FieldList<T>,
    value: &mut T,
    applied: &mut usize,
) -> Result<(), ReadError> {
    reader.read_map(|reader, key| {
        let Some(field) = fields.field(key) else {
            return Err(ReadError::UnknownMember {
                name: key.into(),
                record: short_type_name::<T>(),
            });
        };
        field.read(value, reader)?;
        *applied += 1;
        Ok(())
    })
}

fn read_scalar<T>(
    reader: &mut TextReader<'_>,
    ops: ScalarOps<T>,
    value: &mut T,
) -> Result<(), ReadError> {
    reader.skip_whitespace();
    let offset = reader.offset();
    let text = if ops.kind().is_number() {
        reader.read_number()?
    } else {
        reader.read_str()?
    };

    match ops.parse_text(text) {
        Some(parsed) => {
            *value = parsed;
            Ok(())
        }
        None => Err(ReadError::InvalidNumber {
            kind: ops.kind(),
            text: text.into(),
            offset,
        }),
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Merges `input` into `value` and checks that no input is left over.
///
/// See [`read`] for the merge rules.
pub fn read_from_str<T: Describe>(input: &str, value: &mut T) -> Result<(), ReadError> {
    let mut reader = TextReader::new(input);
    read(&mut reader, value)?;
    reader.finish()
}

/// Reads `input` into a fresh `T::default()`.
///
/// Fields missing from the input keep their default values, and nothing is
/// returned unless the whole input was read.
///
/// # Examples
///
/// ```
/// use vc_describe::Describe;
///
/// #[derive(Describe, Default, Debug, PartialEq)]
/// struct Foo {
///     a: i32,
///     b: f64,
/// }
///
/// let foo: Foo = vc_describe::from_str(r#"{"b": 0.5}"#).unwrap();
/// assert_eq!(foo, Foo { a: 0, b: 0.5 });
///
/// assert!(vc_describe::from_str::<Foo>(r#"{"c": 1}"#).is_err());
/// ```
pub fn from_str<T: Describe + Default>(input: &str) -> Result<T, ReadError> {
    let mut value = T::default();
    read_from_str(input, &mut value)?;
    Ok(value)
}

/// Reads a sequence, appending one `T::default()` per element merged with
/// that element.
///
/// On failure the elements read so far stay in `out`.
pub fn read_sequence<T: Describe + Default>(
    reader: &mut TextReader<'_>,
    out: &mut Vec<T>,
) -> Result<(), ReadError> {
    reader.read_sequence(|reader| {
        let mut value = T::default();
        read(reader, &mut value)?;
        out.push(value);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::{TextReader, from_str, read, read_from_str, read_members, read_sequence};
    use crate::Describe;
    use crate::describe::ScalarKind;
    use crate::error::{Found, ReadError};
    use crate::ser::{WriterConfig, to_string, to_string_with};

    #[derive(Describe, Debug, Default, Clone, PartialEq)]
    #[describe(crate = "crate")]
    struct Inner {
        x: f32,
        text: String,
    }

    #[derive(Describe, Debug, Default, Clone, PartialEq)]
    #[describe(crate = "crate")]
    struct Outer {
        a: i32,
        b: f32,
        c: Inner,
    }

    fn initial() -> Outer {
        Outer {
            a: 1,
            b: 2.0,
            c: Inner {
                x: 3.141592,
                text: "foo".to_string(),
            },
        }
    }

    #[test]
    fn nested_partial_merge() {
        let mut value = initial();
        read_from_str(r#"{"b": 3, "c": {"text": "bar", "x": 2.718281}}"#, &mut value).unwrap();

        assert_eq!(
            value,
            Outer {
                a: 1,
                b: 3.0,
                c: Inner {
                    x: 2.718281,
                    text: "bar".to_string(),
                },
            }
        );

        let expected = "{\n  \"a\": 1,\n  \"b\": 3,\n  \"c\": {\n    \"x\": 2.718281,\n    \"text\": \"bar\"\n  }\n}";
        assert_eq!(to_string(&value).unwrap(), expected);
    }

    #[test]
    fn missing_fields_are_untouched() {
        let mut value = initial();
        read_from_str(r#"{"c": {}}"#, &mut value).unwrap();
        assert_eq!(value, initial());

        read_from_str("{}", &mut value).unwrap();
        assert_eq!(value, initial());
    }

    #[test]
    fn key_order_does_not_matter() {
        let canonical: Outer =
            from_str(r#"{"a": 5, "b": 0.25, "c": {"x": 1.5, "text": "t"}}"#).unwrap();
        let permuted: Outer =
            from_str(r#"{"c": {"text": "t", "x": 1.5}, "b": 0.25, "a": 5}"#).unwrap();
        assert_eq!(canonical, permuted);
    }

    #[test]
    fn later_duplicates_overwrite_earlier_ones() {
        let value: Outer = from_str(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value.a, 2);
    }

    #[test]
    fn unknown_member_is_rejected() {
        let mut value = initial();
        let err = read_from_str(r#"{"unknown": 1}"#, &mut value).unwrap_err();
        assert_eq!(
            err,
            ReadError::UnknownMember {
                name: "unknown".to_string(),
                record: "Outer",
            }
        );

        let err = read_from_str(r#"{"c": {"a": 1}}"#, &mut value).unwrap_err();
        assert!(matches!(err, ReadError::UnknownMember { record: "Inner", .. }));
        assert_eq!(value, initial());
    }

    #[test]
    fn escapes_are_rejected() {
        let mut text = String::from("keep");
        let err = read_from_str(r#""foo\"bar""#, &mut text).unwrap_err();
        assert_eq!(err, ReadError::EscapeSequence { offset: 4 });
        assert_eq!(text, "keep");
    }

    #[test]
    fn failed_read_keeps_earlier_members() {
        let mut value = initial();
        let err = read_from_str(r#"{"a": 7, "b": 8, "c": {"x" 1}}"#, &mut value).unwrap_err();

        assert!(matches!(err, ReadError::Expected { expected: ':', .. }));
        assert_eq!(value.a, 7);
        assert_eq!(value.b, 8.0);
        assert_eq!(value.c, initial().c);
    }

    #[test]
    fn only_merged_members_are_counted() {
        let fields = Outer::description().as_record().unwrap();
        let mut value = initial();

        let mut applied = 0;
        let mut reader = TextReader::new(r#"{"a": "x"}"#);
        assert!(read_members(&mut reader, fields, &mut value, &mut applied).is_err());
        assert_eq!(applied, 0);

        let mut applied = 0;
        let mut reader = TextReader::new(r#"{"a": 5, "b": "x"}"#);
        assert!(read_members(&mut reader, fields, &mut value, &mut applied).is_err());
        assert_eq!(applied, 1);
        assert_eq!(value.a, 5);
    }

    #[test]
    fn non_finite_floats_do_not_read_back() {
        let text = to_string(&f64::INFINITY).unwrap();
        assert_eq!(text, "inf");

        let mut value = 0.0_f64;
        assert!(matches!(
            read_from_str(&text, &mut value),
            Err(ReadError::ExpectedNumber { found: Found::Char('i'), offset: 0 })
        ));
    }

    #[test]
    fn numbers_must_fit_the_slot() {
        let mut int = 0_i32;
        assert_eq!(
            read_from_str(" 1.5", &mut int),
            Err(ReadError::InvalidNumber {
                kind: ScalarKind::Int,
                text: "1.5".to_string(),
                offset: 1,
            })
        );
        assert!(matches!(
            read_from_str("300", &mut 0_u8),
            Err(ReadError::InvalidNumber { .. })
        ));
        assert!(matches!(
            read_from_str("-1", &mut 0_u32),
            Err(ReadError::InvalidNumber { .. })
        ));

        let mut float = 0.0_f64;
        read_from_str("4", &mut float).unwrap();
        assert_eq!(float, 4.0);

        assert_eq!(
            read_from_str(r#""4""#, &mut float),
            Err(ReadError::ExpectedNumber {
                found: Found::Char('"'),
                offset: 0,
            })
        );
    }

    #[test]
    fn malformed_records() {
        for input in [
            "",
            r#""a": 1}"#,
            r#"{"a": 1"#,
            r#"{"a" 1}"#,
            r#"{a: 1}"#,
            r#"{"a": 1 "b": 2}"#,
            r#"{"a": 1,}"#,
            r#"{"c": {"text": "open}}"#,
            r#"{"a": 1} x"#,
        ] {
            let mut value = Outer::default();
            assert!(read_from_str(input, &mut value).is_err(), "{input:?}");
        }
    }

    #[test]
    fn records_round_trip() {
        let value = initial();
        for config in [WriterConfig::new(), WriterConfig::compact()] {
            let text = to_string_with(&value, config).unwrap();
            assert_eq!(from_str::<Outer>(&text), Ok(value.clone()));
        }
    }

    #[test]
    fn scalars_round_trip() {
        assert_eq!(from_str::<i64>(&to_string(&i64::MIN).unwrap()), Ok(i64::MIN));
        assert_eq!(from_str::<u64>(&to_string(&u64::MAX).unwrap()), Ok(u64::MAX));
        assert_eq!(from_str::<f64>(&to_string(&0.1_f64).unwrap()), Ok(0.1));
        assert_eq!(from_str::<f32>(&to_string(&1e-7_f32).unwrap()), Ok(1e-7));

        let text = String::from("with spaces, commas: and {braces}");
        assert_eq!(from_str::<String>(&to_string(&text).unwrap()), Ok(text));
    }

    #[test]
    fn sequences() {
        let mut reader = TextReader::new(r#"[{"a": 1}, {"b": 2}] [] "#);
        let mut out: Vec<Outer> = Vec::new();
        read_sequence(&mut reader, &mut out).unwrap();
        read_sequence(&mut reader, &mut out).unwrap();
        reader.finish().unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!((out[0].a, out[0].b), (1, 0.0));
        assert_eq!((out[1].a, out[1].b), (0, 2.0));
    }

    #[test]
    fn reader_continues_after_a_value() {
        let mut reader = TextReader::new("1 2");
        let (mut first, mut second) = (0_u8, 0_u8);
        read(&mut reader, &mut first).unwrap();
        read(&mut reader, &mut second).unwrap();
        assert_eq!((first, second), (1, 2));
    }
}
