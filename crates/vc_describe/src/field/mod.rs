//! Field descriptors and the per-type field list.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod field_list;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{FieldAccessor, FieldDescriptor, Projection};
pub use field_list::FieldList;
