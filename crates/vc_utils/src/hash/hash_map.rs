//! Provide [`HashMap`] based on [hashbrown]'s implementation.

use crate::hash::FixedHashState;

pub use hashbrown::hash_map::{Entry, Iter, IterMut, OccupiedEntry, VacantEntry};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] as the default hashing provider.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("a", 1);
///
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;
