use alloc::vec::Vec;
use core::fmt;

use vc_utils::hash::{HashTable, hash_one};

use crate::value::Value;

/// Insertion-ordered key/value storage behind sets and maps.
///
/// Keys are matched with *SameValueZero*, see [`Value`]'s equality.
/// Sets store each member as both key and value.
///
/// # Examples
///
/// ```
/// use vc_jsonify::value::{Collection, Value};
///
/// let mut set = Collection::new();
/// assert!(set.add(Value::from(1)));
/// assert!(set.add(Value::from("a")));
/// assert!(!set.add(Value::from(1.0)));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&Value::from("a")));
/// ```
#[derive(Clone, Default)]
pub struct Collection {
    entries: Vec<(Value, Value)>,
    table: HashTable<usize>,
}

impl Collection {
    /// Creates an empty `Collection`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            table: HashTable::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a set member. Returns `false` if an equal member was present.
    #[inline]
    pub fn add(&mut self, member: Value) -> bool {
        self.insert(member.clone(), member)
    }

    /// Inserts a map entry.
    ///
    /// An existing entry keeps its key and position and only has its value
    /// replaced, in which case `false` is returned.
    pub fn insert(&mut self, key: Value, value: Value) -> bool {
        let hash = key_hash(&key);
        let Self { entries, table } = self;

        if let Some(&index) = table.find(hash, |&i| entries[i].0 == key) {
            entries[index].1 = value;
            return false;
        }

        let index = entries.len();
        entries.push((key, value));
        table.insert_unique(hash, index, |&i| key_hash(&entries[i].0));
        true
    }

    #[inline]
    pub fn contains(&self, key: &Value) -> bool {
        self.index_of(key).is_some()
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index_of(key).map(|index| &self.entries[index].1)
    }

    /// Removes the entry stored under `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let hash = key_hash(key);
        let Self { entries, table } = self;

        let Ok(slot) = table.find_entry(hash, |&i| entries[i].0 == *key) else {
            return None;
        };
        let (index, _) = slot.remove();

        for i in table.iter_mut() {
            if *i > index {
                *i -= 1;
            }
        }

        Some(entries.remove(index).1)
    }

    /// Iterates over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Iterates over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn index_of(&self, key: &Value) -> Option<usize> {
        self.table
            .find(key_hash(key), |&i| self.entries[i].0 == *key)
            .copied()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(members: I) -> Self {
        let mut this = Collection::new();
        for member in members {
            this.add(member);
        }
        this
    }
}

impl FromIterator<(Value, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        let mut this = Collection::new();
        for (key, value) in entries {
            this.insert(key, value);
        }
        this
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Hash consistent with *SameValueZero*.
fn key_hash(key: &Value) -> u64 {
    match key {
        Value::Undefined => hash_one(&0_u8),
        Value::Null => hash_one(&1_u8),
        Value::Bool(b) => hash_one(&(2_u8, *b)),
        Value::Number(n) => {
            let bits = if *n == 0.0 {
                0_u64
            } else if n.is_nan() {
                f64::NAN.to_bits()
            } else {
                n.to_bits()
            };
            hash_one(&(3_u8, bits))
        }
        Value::String(s) => hash_one(&(4_u8, &**s)),
        Value::Symbol(s) => hash_one(&(5_u8, s.addr())),
        Value::Function(f) => hash_one(&(6_u8, f.addr())),
        Value::Object(o) => hash_one(&(7_u8, o.id())),
    }
}
