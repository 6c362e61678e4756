use alloc::string::String;
use core::fmt;

use serde_core::Deserializer;
use serde_core::de::{DeserializeSeed, Error, MapAccess, SeqAccess, Unexpected, Visitor};

use crate::describe::{Describe, Description, ScalarKind, ScalarOps, ScalarValue, short_type_name};
use crate::error::ReadError;
use crate::field::{FieldDescriptor, FieldList};

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Merges the input of a serde [`Deserializer`] into an existing value.
///
/// # Examples
///
/// ```
/// use serde_core::de::DeserializeSeed;
/// use vc_describe::{Describe, serde::DeserializeDriver};
///
/// #[derive(Describe, Debug, PartialEq)]
/// struct MyStruct {
///     value: i32,
///     name: String,
/// }
///
/// let mut data = MyStruct { value: 0, name: "keep".into() };
///
/// let mut input = ron::Deserializer::from_str("(value: 123)").unwrap();
/// DeserializeDriver::new(&mut data).deserialize(&mut input).unwrap();
///
/// assert_eq!(data, MyStruct { value: 123, name: "keep".into() });
/// ```
pub struct DeserializeDriver<'a, T> {
    value: &'a mut T,
}

impl<'a, T: Describe> DeserializeDriver<'a, T> {
    #[inline]
    pub fn new(value: &'a mut T) -> Self {
        Self { value }
    }
}

impl<'de, T: Describe> DeserializeSeed<'de> for DeserializeDriver<'_, T> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        match T::description() {
            Description::Record(fields) => deserializer.deserialize_struct(
                short_type_name::<T>(),
                &[],
                RecordVisitor {
                    fields,
                    value: self.value,
                },
            ),
            Description::Scalar(ops) => {
                let visitor = ScalarVisitor {
                    ops,
                    value: self.value,
                };
                match ops.kind() {
                    ScalarKind::Str => deserializer.deserialize_str(visitor),
                    ScalarKind::Int => deserializer.deserialize_i64(visitor),
                    ScalarKind::UInt => deserializer.deserialize_u64(visitor),
                    ScalarKind::Float => deserializer.deserialize_f64(visitor),
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Records

struct RecordVisitor<'a, T: 'static> {
    fields: &'static FieldList<T>,
    value: &'a mut T,
}

impl<'de, T: 'static> Visitor<'de> for RecordVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a `{}` record", short_type_name::<T>())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        while let Some(key) = map.next_key_seed(KeySeed)? {
            let Some(field) = self.fields.field(&key) else {
                return Err(A::Error::custom(ReadError::UnknownMember {
                    name: key,
                    record: short_type_name::<T>(),
                }));
            };
            map.next_value_seed(FieldSeed {
                field,
                record: &mut *self.value,
            })?;
        }
        Ok(())
    }

    /// Fields given positionally, in declaration order. Trailing fields may
    /// be omitted.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        for field in self.fields {
            let seed = FieldSeed {
                field,
                record: &mut *self.value,
            };
            if seq.next_element_seed(seed)?.is_none() {
                break;
            }
        }
        Ok(())
    }
}

struct KeySeed;

impl<'de> DeserializeSeed<'de> for KeySeed {
    type Value = String;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_identifier(self)
    }
}

impl Visitor<'_> for KeySeed {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a member name")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<String, E> {
        Ok(String::from(v))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }
}

struct FieldSeed<'a, T: 'static> {
    field: &'static FieldDescriptor<T>,
    record: &'a mut T,
}

impl<'de, T: 'static> DeserializeSeed<'de> for FieldSeed<'_, T> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        self.field
            .accessor()
            .erased_merge(self.record, &mut erased)
            .map_err(D::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// Scalars

struct ScalarVisitor<'a, T> {
    ops: ScalarOps<T>,
    value: &'a mut T,
}

impl<T> ScalarVisitor<'_, T> {
    fn accept<E: Error>(self, value: ScalarValue<'_>, unexpected: Unexpected<'_>) -> Result<(), E> {
        match self.ops.from_value(value) {
            Some(parsed) => {
                *self.value = parsed;
                Ok(())
            }
            None => Err(E::invalid_value(unexpected, &self)),
        }
    }
}

impl<T> Visitor<'_> for ScalarVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a {}", self.ops.kind())
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<(), E> {
        self.accept(ScalarValue::Str(v), Unexpected::Str(v))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<(), E> {
        self.accept(ScalarValue::Int(v), Unexpected::Signed(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<(), E> {
        self.accept(ScalarValue::UInt(v), Unexpected::Unsigned(v))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<(), E> {
        self.accept(ScalarValue::F64(v), Unexpected::Float(v))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use serde_core::de::DeserializeSeed;

    use super::DeserializeDriver;
    use crate::Describe;
    use crate::serde::SerializeDriver;

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
                x: 0.25,
                text: "foo".to_string(),
            },
        }
    }

    fn merge_json(value: &mut Outer, input: &str) -> Result<(), serde_json::Error> {
        let mut de = serde_json::Deserializer::from_str(input);
        DeserializeDriver::new(value).deserialize(&mut de)?;
        de.end()
    }

    #[test]
    fn json_partial_merge() {
        let mut value = initial();
        merge_json(&mut value, r#"{"b": 3, "c": {"text": "bar", "x": 2.5}}"#).unwrap();

        assert_eq!(
            value,
            Outer {
                a: 1,
                b: 3.0,
                c: Inner {
                    x: 2.5,
                    text: "bar".to_string(),
                },
            }
        );
    }

    #[test]
    fn json_unknown_member() {
        let mut value = initial();
        let err = merge_json(&mut value, r#"{"a": 5, "unknown": 1}"#).unwrap_err();
        assert!(err.to_string().contains("unknown member `unknown` on `Outer`"));
        assert_eq!(value.a, 5);
    }

    #[test]
    fn json_type_mismatch() {
        let mut value = initial();
        assert!(merge_json(&mut value, r#"{"a": "one"}"#).is_err());
        assert!(merge_json(&mut value, r#"{"a": 1.5}"#).is_err());
        assert!(merge_json(&mut value, r#"{"c": {"text": 1}}"#).is_err());
        assert_eq!(value, initial());
    }

    #[test]
    fn ron_round_trip() {
        let value = initial();
        let text = ron::to_string(&SerializeDriver::new(&value)).unwrap();

        let mut output = Outer::default();
        let mut de = ron::Deserializer::from_str(&text).unwrap();
        DeserializeDriver::new(&mut output).deserialize(&mut de).unwrap();
        assert_eq!(output, value);
    }

    #[test]
    fn scalar_targets() {
        let mut text = String::new();
        let mut de = serde_json::Deserializer::from_str(r#""abc""#);
        DeserializeDriver::new(&mut text).deserialize(&mut de).unwrap();
        assert_eq!(text, "abc");

        let mut small = 0_u8;
        let mut de = serde_json::Deserializer::from_str("256");
        assert!(DeserializeDriver::new(&mut small).deserialize(&mut de).is_err());
        assert_eq!(small, 0);
    }
}
