//! Encoding of [`Value`](crate::value::Value) graphs through serde.
//!
//! [`JsonDriver`] implements `Serialize` with the rules of a JSON text
//! encoder: `toJSON` hooks, left-out members, `null` for values without a
//! JSON form and errors on cycles. Pair it with any serde data format,
//! usually `serde_json`.

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod error_utils;
mod to_json;

mod array_serializer;
mod object_serializer;

// -----------------------------------------------------------------------------
// Exports

pub use driver::JsonDriver;
