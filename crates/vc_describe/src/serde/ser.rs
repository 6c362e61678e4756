use serde_core::ser::{Error, SerializeStruct};
use serde_core::{Serialize, Serializer};

use crate::describe::{Describe, Description, ScalarValue, short_type_name};

// -----------------------------------------------------------------------------
// SerializeDriver

/// Serializes a describable value with a serde [`Serializer`].
///
/// # Examples
///
/// ```
/// use vc_describe::{Describe, serde::SerializeDriver};
///
/// #[derive(Describe)]
/// struct MyStruct {
///     value: i32,
///     name: String,
/// }
///
/// let input = MyStruct { value: 123, name: "abc".into() };
///
/// let output = ron::to_string(&SerializeDriver::new(&input)).unwrap();
/// assert_eq!(output, r#"(value:123,name:"abc")"#);
/// ```
pub struct SerializeDriver<'a, T> {
    value: &'a T,
}

impl<'a, T: Describe> SerializeDriver<'a, T> {
    #[inline]
    pub const fn new(value: &'a T) -> Self {
        Self { value }
    }
}

impl<T: Describe> Serialize for SerializeDriver<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match T::description() {
            Description::Record(fields) => fields,
            Description::Scalar(ops) => {
                return match ops.to_value(self.value) {
                    ScalarValue::Str(v) => serializer.serialize_str(v),
                    ScalarValue::Int(v) => serializer.serialize_i64(v),
                    ScalarValue::UInt(v) => serializer.serialize_u64(v),
                    ScalarValue::F32(v) => serializer.serialize_f32(v),
                    ScalarValue::F64(v) => serializer.serialize_f64(v),
                };
            }
        };

        let mut state = serializer.serialize_struct(short_type_name::<T>(), fields.len())?;
        for field in fields {
            // the accessor only hands the value out through a callback
            let mut result = Err(S::Error::custom("field value was not visited"));
            field.accessor().visit_serialize(self.value, &mut |value: &dyn erased_serde::Serialize| {
                result = state.serialize_field(field.name(), value);
            });
            result?;
        }
        state.end()
    }
}
