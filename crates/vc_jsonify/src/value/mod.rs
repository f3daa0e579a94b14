//! The dynamic object graph walked by the converter.
//!
//! ## Menu
//!
//! - [`Value`]: Any value of the graph, primitives and references alike.
//! - [`Symbol`] and [`Function`]: Reference types compared by identity.
//! - [`ObjectRef`]: Shared handle to an [`Object`], compared by identity through [`ObjectId`].
//! - [`Object`]: Kind, ordered own members, delegate and an optional override.
//! - [`Property`]: An own member, either a data slot or an accessor pair.
//! - [`Delegate`]: Where unresolved member lookups continue.
//! - [`Collection`]: Insertion-ordered storage behind sets and maps.
//! - [`TypedArray`]: Fixed-width numeric views.
//!
//! ## Delegates
//!
//! Every object names a [`Delegate`]:
//!
//! - [`Delegate::Base`]: the generic base object. Member walks stop here,
//!   objects delegating to it directly are *plain* objects.
//! - [`Delegate::Null`]: no delegate at all.
//! - [`Delegate::Object`]: another object, usually the prototype of a
//!   [`Class`](crate::Class). Objects delegating to an object are *class instances*.
//!
//! Member reads ([`ObjectRef::get`]) and type predicates
//! ([`ObjectRef::is_error`], [`ObjectRef::instance_of`]) follow the chain.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod function;
mod object;
mod property;
mod symbol;
mod typed_array;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use collection::Collection;
pub use function::{Function, NativeFn};
pub use object::{Delegate, Object, ObjectId, ObjectKind, ObjectRef};
pub use property::{Getter, Property, Setter, Slot};
pub use symbol::Symbol;
pub use typed_array::TypedArray;
pub use value::Value;

pub(crate) use value::number_to_string;
