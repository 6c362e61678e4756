use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// ScalarKind

/// The kind of an atomic value, used to pick the token a reader expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// A quoted string.
    Str,
    /// A signed integer.
    Int,
    /// An unsigned integer.
    UInt,
    /// A floating point number.
    Float,
}

impl ScalarKind {
    /// Returns `true` for the numeric kinds.
    #[inline]
    pub const fn is_number(self) -> bool {
        !matches!(self, Self::Str)
    }

    /// A human readable name, used in messages.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::UInt => "unsigned integer",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ScalarKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// ScalarValue

/// A borrowed atomic value, the payload of [`Serializer::write_scalar`].
///
/// Floats keep their width so that `f32` values are rendered with `f32`
/// precision instead of the widened `f64` digits.
///
/// [`Serializer::write_scalar`]: crate::ser::Serializer::write_scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue<'a> {
    Str(&'a str),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue<'_> {
    /// Returns the [`ScalarKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Str(_) => ScalarKind::Str,
            Self::Int(_) => ScalarKind::Int,
            Self::UInt(_) => ScalarKind::UInt,
            Self::F32(_) | Self::F64(_) => ScalarKind::Float,
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// An atomic type: written as a single token, overwritten as a whole on read.
///
/// # Examples
///
/// ```
/// use vc_describe::{Describe, Description, Scalar, ScalarKind, ScalarValue};
///
/// #[derive(Debug, PartialEq)]
/// struct Meters(f64);
///
/// impl Scalar for Meters {
///     const KIND: ScalarKind = ScalarKind::Float;
///
///     fn to_value(&self) -> ScalarValue<'_> {
///         ScalarValue::F64(self.0)
///     }
///
///     fn from_value(value: ScalarValue<'_>) -> Option<Self> {
///         f64::from_value(value).map(Meters)
///     }
///
///     fn parse_text(text: &str) -> Option<Self> {
///         text.parse().ok().map(Meters)
///     }
/// }
///
/// impl Describe for Meters {
///     fn description() -> Description<Self> {
///         Description::scalar()
///     }
/// }
///
/// let mut m = Meters(0.0);
/// vc_describe::read_from_str("12.5", &mut m).unwrap();
/// assert_eq!(m, Meters(12.5));
/// ```
pub trait Scalar: Sized + 'static {
    /// The token kind this type is written as and read from.
    const KIND: ScalarKind;

    /// Borrows the value as a [`ScalarValue`].
    fn to_value(&self) -> ScalarValue<'_>;

    /// Converts a value of any kind, `None` if it does not fit.
    fn from_value(value: ScalarValue<'_>) -> Option<Self>;

    /// Parses the text of a token: the contents of a string, or a number literal.
    fn parse_text(text: &str) -> Option<Self>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Str;

    #[inline]
    fn to_value(&self) -> ScalarValue<'_> {
        ScalarValue::Str(self.as_str())
    }

    fn from_value(value: ScalarValue<'_>) -> Option<Self> {
        match value {
            ScalarValue::Str(s) => Some(String::from(s)),
            _ => None,
        }
    }

    #[inline]
    fn parse_text(text: &str) -> Option<Self> {
        Some(String::from(text))
    }
}

macro_rules! impl_scalar_int {
    ($variant:ident, $wide:ty, $kind:ident: $($ty:ty),+) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            #[inline]
            fn to_value(&self) -> ScalarValue<'_> {
                ScalarValue::$variant(*self as $wide)
            }

            fn from_value(value: ScalarValue<'_>) -> Option<Self> {
                match value {
                    ScalarValue::Int(v) => <$ty>::try_from(v).ok(),
                    ScalarValue::UInt(v) => <$ty>::try_from(v).ok(),
                    _ => None,
                }
            }

            #[inline]
            fn parse_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        }
    )+};
}

impl_scalar_int!(Int, i64, Int: i8, i16, i32, i64, isize);
impl_scalar_int!(UInt, u64, UInt: u8, u16, u32, u64, usize);

macro_rules! impl_scalar_float {
    ($($ty:ty => $variant:ident),+) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::Float;

            #[inline]
            fn to_value(&self) -> ScalarValue<'_> {
                ScalarValue::$variant(*self)
            }

            fn from_value(value: ScalarValue<'_>) -> Option<Self> {
                match value {
                    ScalarValue::Int(v) => Some(v as $ty),
                    ScalarValue::UInt(v) => Some(v as $ty),
                    ScalarValue::F32(v) => Some(v as $ty),
                    ScalarValue::F64(v) => Some(v as $ty),
                    ScalarValue::Str(_) => None,
                }
            }

            #[inline]
            fn parse_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        }
    )+};
}

impl_scalar_float!(f32 => F32, f64 => F64);

#[cfg(test)]
mod tests {
    use super::{Scalar, ScalarKind, ScalarValue};
    use alloc::string::String;

    #[test]
    fn integer_conversion_checks_range() {
        assert_eq!(u8::from_value(ScalarValue::Int(255)), Some(255));
        assert_eq!(u8::from_value(ScalarValue::Int(256)), None);
        assert_eq!(i8::from_value(ScalarValue::UInt(128)), None);
        assert_eq!(i32::from_value(ScalarValue::F64(1.0)), None);
        assert_eq!(i64::from_value(ScalarValue::Str("1")), None);
    }

    #[test]
    fn float_accepts_integers() {
        assert_eq!(f32::from_value(ScalarValue::Int(3)), Some(3.0));
        assert_eq!(f64::parse_text("3"), Some(3.0));
        assert_eq!(f64::parse_text("2.5e2"), Some(250.0));
    }

    #[test]
    fn integer_text_must_be_integral() {
        assert_eq!(i32::parse_text("-12"), Some(-12));
        assert_eq!(i32::parse_text("1.5"), None);
        assert_eq!(u16::parse_text("70000"), None);
    }

    #[test]
    fn kinds() {
        assert_eq!(String::KIND, ScalarKind::Str);
        assert_eq!(usize::KIND, ScalarKind::UInt);
        assert_eq!(isize::KIND, ScalarKind::Int);
        assert_eq!(ScalarValue::F32(1.0).kind(), ScalarKind::Float);
        assert!(ScalarKind::Float.is_number());
        assert!(!ScalarKind::Str.is_number());
    }
}
