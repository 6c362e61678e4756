use core::any::{Any, TypeId};
use core::fmt;

use serde_core::de::DeserializeSeed;

use crate::de::TextReader;
use crate::describe::Describe;
use crate::error::{ReadError, WriteError};
use crate::ser::Serializer;
use crate::serde::{DeserializeDriver, SerializeDriver};

// -----------------------------------------------------------------------------
// FieldAccessor

/// Type-erased access to one field of a `T`.
///
/// The only implementation is [`Projection`]; the trait exists so that
/// descriptors of fields with different types fit in one [`FieldList`].
///
/// [`FieldList`]: crate::FieldList
pub trait FieldAccessor<T>: Sync {
    /// Returns the type name of the field.
    fn value_type_name(&self) -> &'static str;

    /// Returns the `TypeId` of the field.
    fn value_type_id(&self) -> TypeId;

    /// Borrows the field of `record`.
    fn value<'a>(&self, record: &'a T) -> &'a dyn Any;

    /// Mutably borrows the field of `record`.
    fn value_mut<'a>(&self, record: &'a mut T) -> &'a mut dyn Any;

    /// Writes the field value of `record`.
    fn write(&self, record: &T, serializer: &mut dyn Serializer) -> Result<(), WriteError>;

    /// Merges the next value of `reader` into the field of `record`.
    fn read(&self, record: &mut T, reader: &mut TextReader<'_>) -> Result<(), ReadError>;

    /// Calls `visit` with the field value as a serde value.
    fn visit_serialize(&self, record: &T, visit: &mut dyn FnMut(&dyn erased_serde::Serialize));

    /// Merges the next value of a serde deserializer into the field of `record`.
    fn erased_merge<'de>(
        &self,
        record: &mut T,
        deserializer: &mut dyn erased_serde::Deserializer<'de>,
    ) -> Result<(), erased_serde::Error>;
}

// -----------------------------------------------------------------------------
// Projection

/// A field accessor built from a pair of projections.
///
/// # Examples
///
/// ```
/// use vc_describe::Projection;
///
/// struct Pair {
///     left: i32,
///     right: i32,
/// }
///
/// let right: Projection<Pair, i32> = Projection::new(|p| &p.right, |p| &mut p.right);
///
/// let mut pair = Pair { left: 1, right: 2 };
/// right.set(&mut pair, 5);
/// assert_eq!(*right.get(&pair), 5);
/// assert_eq!(pair.left, 1);
/// ```
pub struct Projection<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F> Projection<T, F> {
    /// Creates a projection from a shared and a mutable accessor of the same field.
    #[inline]
    pub const fn new(get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        Self { get, get_mut }
    }

    /// Borrows the field of `record`.
    #[inline]
    pub fn get<'a>(&self, record: &'a T) -> &'a F {
        (self.get)(record)
    }

    /// Mutably borrows the field of `record`.
    #[inline]
    pub fn get_mut<'a>(&self, record: &'a mut T) -> &'a mut F {
        (self.get_mut)(record)
    }

    /// Overwrites the field, dropping the previous value.
    #[inline]
    pub fn set(&self, record: &mut T, value: F) {
        *(self.get_mut)(record) = value;
    }
}

impl<T, F: Describe> FieldAccessor<T> for Projection<T, F> {
    #[inline]
    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<F>()
    }

    #[inline]
    fn value_type_id(&self) -> TypeId {
        TypeId::of::<F>()
    }

    #[inline]
    fn value<'a>(&self, record: &'a T) -> &'a dyn Any {
        self.get(record)
    }

    #[inline]
    fn value_mut<'a>(&self, record: &'a mut T) -> &'a mut dyn Any {
        self.get_mut(record)
    }

    fn write(&self, record: &T, serializer: &mut dyn Serializer) -> Result<(), WriteError> {
        crate::ser::write(serializer, self.get(record))
    }

    fn read(&self, record: &mut T, reader: &mut TextReader<'_>) -> Result<(), ReadError> {
        crate::de::read(reader, self.get_mut(record))
    }

    fn visit_serialize(&self, record: &T, visit: &mut dyn FnMut(&dyn erased_serde::Serialize)) {
        visit(&SerializeDriver::new(self.get(record)));
    }

    fn erased_merge<'de>(
        &self,
        record: &mut T,
        deserializer: &mut dyn erased_serde::Deserializer<'de>,
    ) -> Result<(), erased_serde::Error> {
        DeserializeDriver::new(self.get_mut(record)).deserialize(deserializer)
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// Names one field of a record type `T` and gives access to it.
///
/// Descriptors are built once, in a `static`, and shared by every read and
/// write of `T`. See [`field_list!`](crate::field_list).
///
/// # Examples
///
/// ```
/// use vc_describe::Describe;
///
/// #[derive(Describe)]
/// struct Foo {
///     id: u32,
///     name: String,
/// }
///
/// let fields = Foo::description().as_record().unwrap();
/// let id = fields.field("id").unwrap();
///
/// let mut foo = Foo { id: 1, name: "foo".into() };
/// assert!(id.type_is::<u32>());
/// assert_eq!(id.get::<u32>(&foo), Some(&1));
///
/// id.set(&mut foo, 7_u32).unwrap();
/// assert_eq!(foo.id, 7);
///
/// // wrong type, the value is handed back
/// assert_eq!(id.set(&mut foo, 7_u8), Err(7_u8));
/// ```
pub struct FieldDescriptor<T: 'static> {
    name: &'static str,
    accessor: &'static dyn FieldAccessor<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Creates a descriptor for the field `name`.
    #[inline]
    pub const fn new(name: &'static str, accessor: &'static dyn FieldAccessor<T>) -> Self {
        Self { name, accessor }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type-erased accessor behind this descriptor.
    #[inline]
    pub const fn accessor(&self) -> &'static dyn FieldAccessor<T> {
        self.accessor
    }

    /// Returns the type name of the field value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.accessor.value_type_name()
    }

    /// Returns the `TypeId` of the field value.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.accessor.value_type_id()
    }

    /// Check if the field has type `F`.
    #[inline]
    pub fn type_is<F: Any>(&self) -> bool {
        self.type_id() == TypeId::of::<F>()
    }

    /// Borrows the field of `record`, `None` if it is not an `F`.
    #[inline]
    pub fn get<'a, F: Any>(&self, record: &'a T) -> Option<&'a F> {
        self.accessor.value(record).downcast_ref()
    }

    /// Mutably borrows the field of `record`, `None` if it is not an `F`.
    #[inline]
    pub fn get_mut<'a, F: Any>(&self, record: &'a mut T) -> Option<&'a mut F> {
        self.accessor.value_mut(record).downcast_mut()
    }

    /// Overwrites the field of `record`.
    ///
    /// Returns `value` back if the field is not an `F`.
    pub fn set<F: Any>(&self, record: &mut T, value: F) -> Result<(), F> {
        match self.get_mut::<F>(record) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(value),
        }
    }

    /// Writes the field value of `record`.
    #[inline]
    pub fn write(&self, record: &T, serializer: &mut dyn Serializer) -> Result<(), WriteError> {
        self.accessor.write(record, serializer)
    }

    /// Merges the next value of `reader` into the field of `record`.
    #[inline]
    pub fn read(&self, record: &mut T, reader: &mut TextReader<'_>) -> Result<(), ReadError> {
        self.accessor.read(record, reader)
    }
}

impl<T: 'static> Clone for FieldDescriptor<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for FieldDescriptor<T> {}

impl<T: 'static> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type", &self.type_name())
            .finish()
    }
}
