//! Classes: shared prototypes for instances.
//!
//! - [`Class`] / [`ClassBuilder`]: declare getters, methods and an optional
//!   override on a prototype object, then [`instantiate`](Class::instantiate) it.
//! - [`SerializableClass`]: base class whose instances encode through the converter.
//! - [`error_prototype`]: the prototype of [`ObjectRef::new_error`] objects.
//!
//! [`ObjectRef::new_error`]: crate::value::ObjectRef::new_error

// -----------------------------------------------------------------------------
// Modules

mod builtins;
mod class;
mod serializable;

// -----------------------------------------------------------------------------
// Exports

pub use builtins::error_prototype;
pub use class::{Class, ClassBuilder};
pub use serializable::SerializableClass;
