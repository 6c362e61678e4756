use core::fmt;
use core::slice::Iter;

use super::FieldDescriptor;

// -----------------------------------------------------------------------------
// FieldList

/// The ordered shape of a record type `T`.
///
/// Declaration order decides the order fields are written in. Reading
/// matches members by name, so input order does not matter.
///
/// Names are expected to be unique; this is not checked. When two
/// descriptors share a name, lookups find the first one.
///
/// A field list is never empty: [`FieldList::new`] panics during constant
/// evaluation, so an empty `static` list does not compile.
pub struct FieldList<T: 'static> {
    fields: &'static [FieldDescriptor<T>],
}

impl<T: 'static> FieldList<T> {
    /// Creates a field list from descriptors in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `fields` is empty.
    ///
    /// In a `static` this is a compile error:
    ///
    /// ```compile_fail
    /// use vc_describe::FieldList;
    ///
    /// struct Nothing;
    ///
    /// static FIELDS: FieldList<Nothing> = FieldList::new(&[]);
    /// ```
    #[inline]
    pub const fn new(fields: &'static [FieldDescriptor<T>]) -> Self {
        assert!(!fields.is_empty(), "a field list must describe at least one field");
        Self { fields }
    }

    /// Returns the number of fields.
    #[inline]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the descriptors as a slice in declaration order.
    #[inline]
    pub const fn as_slice(&self) -> &'static [FieldDescriptor<T>] {
        self.fields
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> Iter<'static, FieldDescriptor<T>> {
        self.fields.iter()
    }

    /// Returns the field names in declaration order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + use<T> {
        self.fields.iter().map(FieldDescriptor::name)
    }

    /// Returns the first field named `name`.
    ///
    /// This is O(N) complexity.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the field at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&'static FieldDescriptor<T>> {
        self.fields.get(index)
    }

    /// Returns the index of the first field named `name`.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }
}

impl<'a, T: 'static> IntoIterator for &'a FieldList<T> {
    type Item = &'static FieldDescriptor<T>;
    type IntoIter = Iter<'static, FieldDescriptor<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: 'static> fmt::Debug for FieldList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields).finish()
    }
}

// -----------------------------------------------------------------------------
// field_list

/// Composes a `&'static FieldList<Type>` from `"name" => field: FieldType` pairs.
///
/// The first argument must name the record type itself; `Self` is not
/// accepted because the list is stored in a `static`. Every field type must
/// implement [`Describe`], otherwise the list does not compile.
///
/// # Examples
///
/// ```
/// use vc_describe::{Describe, Description, field_list};
///
/// #[derive(Debug, PartialEq)]
/// struct TestStruct {
///     a: i32,
///     b: f32,
/// }
///
/// impl Describe for TestStruct {
///     fn description() -> Description<Self> {
///         Description::Record(field_list!(TestStruct; "a" => a: i32, "b" => b: f32))
///     }
/// }
///
/// let test = TestStruct { a: 1, b: 2.0 };
/// assert_eq!(
///     vc_describe::to_string(&test).unwrap(),
///     "{\n  \"a\": 1,\n  \"b\": 2\n}",
/// );
/// ```
///
/// A field whose type does not implement [`Describe`] is rejected:
///
/// ```compile_fail
/// use vc_describe::{Describe, Description, field_list};
///
/// struct Blob {
///     bytes: Vec<u8>,
/// }
///
/// impl Describe for Blob {
///     fn description() -> Description<Self> {
///         Description::Record(field_list!(Blob; "bytes" => bytes: Vec<u8>))
///     }
/// }
/// ```
///
/// [`Describe`]: crate::Describe
#[macro_export]
macro_rules! field_list {
    ($record:ty; $($name:literal => $field:ident : $ty:ty),+ $(,)?) => {{
        static DESCRIPTORS: &[$crate::FieldDescriptor<$record>] = &[$(
            $crate::FieldDescriptor::new($name, {
                fn get(record: &$record) -> &$ty {
                    &record.$field
                }
                fn get_mut(record: &mut $record) -> &mut $ty {
                    &mut record.$field
                }
                static ACCESSOR: $crate::Projection<$record, $ty> =
                    $crate::Projection::new(get, get_mut);
                &ACCESSOR
            }),
        )+];
        static FIELDS: $crate::FieldList<$record> = $crate::FieldList::new(DESCRIPTORS);
        &FIELDS
    }};
}
