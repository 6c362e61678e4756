//! Type classification: every describable type is a record or a scalar.

// -----------------------------------------------------------------------------
// Modules

mod description;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use description::{Describe, Description, ScalarOps};
pub use scalar::{Scalar, ScalarKind, ScalarValue};

pub(crate) use description::short_type_name;
