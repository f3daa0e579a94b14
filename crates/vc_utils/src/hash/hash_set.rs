//! Provide [`HashSet`] based on [hashbrown]'s implementation.

use crate::hash::FixedHashState;

pub use hashbrown::hash_set::{Entry, Iter};

/// A [`hashbrown::HashSet`] using [`FixedHashState`] as the default hashing provider.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashSet;
///
/// let mut names: HashSet<&str> = HashSet::default();
///
/// assert!(names.insert("a"));
/// assert!(!names.insert("a"));
/// ```
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;
