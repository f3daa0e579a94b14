//! Re-export [`HashTable`] from [hashbrown] crate.
//!
//! `HashTable` leaves hashing and equality to the caller, which suits
//! containers whose keys are compared by custom rules.

pub use hashbrown::hash_table::{Entry, HashTable, Iter};
