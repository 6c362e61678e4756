use alloc::string::String;
use core::fmt;

use super::{Scalar, ScalarKind, ScalarValue};
use crate::field::FieldList;

// -----------------------------------------------------------------------------
// Describe

/// A type the engine can write and read.
///
/// Every type reachable from a record is classified exactly once, through
/// [`Describe::description`], as either a record (it has a [`FieldList`]) or
/// a scalar. Types with no implementation are rejected at compile time where
/// they are used as a field.
///
/// Records usually derive this trait:
///
/// ```
/// use vc_describe::{Describe, Description};
///
/// #[derive(Describe, Default)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// let Description::Record(fields) = Point::description() else {
///     unreachable!()
/// };
/// assert_eq!(fields.names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
///
/// The derive only accepts non-generic structs with named fields and
/// unique member names. Each of these fails to compile:
///
/// ```compile_fail
/// #[derive(vc_describe::Describe)]
/// enum Mode {
///     On,
///     Off,
/// }
/// ```
///
/// ```compile_fail
/// #[derive(vc_describe::Describe)]
/// struct Pair(i32, i32);
/// ```
///
/// ```compile_fail
/// #[derive(vc_describe::Describe)]
/// struct Wrapper<T> {
///     inner: T,
/// }
/// ```
///
/// ```compile_fail
/// #[derive(vc_describe::Describe)]
/// struct Clash {
///     a: i32,
///     #[describe(rename = "a")]
///     b: i32,
/// }
/// ```
///
/// ```compile_fail
/// #[derive(vc_describe::Describe)]
/// struct Opaque {
///     #[describe(skip)]
///     hidden: i32,
/// }
/// ```
pub trait Describe: Sized + 'static {
    /// Returns the classification of `Self`.
    ///
    /// Implementations must return the same classification on every call.
    fn description() -> Description<Self>;
}

// -----------------------------------------------------------------------------
// Description

/// The classification of a [`Describe`] type.
pub enum Description<T: 'static> {
    /// A record, written as a map of its fields in declaration order.
    Record(&'static FieldList<T>),
    /// An atomic value, written as a single token.
    Scalar(ScalarOps<T>),
}

impl<T: Scalar> Description<T> {
    /// The scalar description of `T`.
    #[inline]
    pub const fn scalar() -> Self {
        Self::Scalar(ScalarOps::of())
    }
}

impl<T: 'static> Description<T> {
    /// Returns `true` if this describes a record.
    #[inline]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns the field list of a record.
    #[inline]
    pub const fn as_record(&self) -> Option<&'static FieldList<T>> {
        match self {
            Self::Record(fields) => Some(*fields),
            Self::Scalar(_) => None,
        }
    }
}

impl<T: 'static> Clone for Description<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Description<T> {}

impl<T: 'static> fmt::Debug for Description<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(fields) => f.debug_tuple("Record").field(fields).finish(),
            Self::Scalar(ops) => f.debug_tuple("Scalar").field(&ops.kind()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarOps

/// The [`Scalar`] capabilities of `T`, captured as function pointers so that
/// [`Description`] needs no trait bound.
pub struct ScalarOps<T> {
    kind: ScalarKind,
    to_value: for<'a> fn(&'a T) -> ScalarValue<'a>,
    from_value: fn(ScalarValue<'_>) -> Option<T>,
    parse_text: fn(&str) -> Option<T>,
}

impl<T: Scalar> ScalarOps<T> {
    /// Captures the [`Scalar`] implementation of `T`.
    #[inline]
    pub const fn of() -> Self {
        Self {
            kind: T::KIND,
            to_value: T::to_value,
            from_value: T::from_value,
            parse_text: T::parse_text,
        }
    }
}

impl<T> ScalarOps<T> {
    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub fn to_value<'a>(&self, value: &'a T) -> ScalarValue<'a> {
        (self.to_value)(value)
    }

    #[inline]
    pub fn from_value(&self, value: ScalarValue<'_>) -> Option<T> {
        (self.from_value)(value)
    }

    #[inline]
    pub fn parse_text(&self, text: &str) -> Option<T> {
        (self.parse_text)(text)
    }
}

impl<T> Clone for ScalarOps<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ScalarOps<T> {}

// -----------------------------------------------------------------------------
// Built-in scalars

macro_rules! impl_describe_scalar {
    ($($ty:ty),+ $(,)?) => {$(
        impl Describe for $ty {
            #[inline]
            fn description() -> Description<Self> {
                Description::scalar()
            }
        }
    )+};
}

impl_describe_scalar!(
    String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

/// Returns the last path segment of `T`'s type name, for messages.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = core::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::{Describe, Description, short_type_name};
    use crate::describe::ScalarKind;
    use alloc::string::String;

    #[test]
    fn scalars_are_not_records() {
        assert!(!i32::description().is_record());
        assert!(f64::description().as_record().is_none());

        let Description::Scalar(ops) = String::description() else {
            panic!("`String` must be a scalar");
        };
        assert_eq!(ops.kind(), ScalarKind::Str);
        assert_eq!(ops.parse_text("abc").as_deref(), Some("abc"));
    }

    #[test]
    fn short_names() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<u8>(), "u8");
    }
}
