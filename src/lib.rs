//! # FixedMap
//!
//! A fixed-capacity key-value map that stores all data inline rather than on the heap.
//! Built for microcontrollers and other environments where dynamic allocation is
//! unavailable or unwelcome.
//!
//! ## Performance Characteristics
//!
//! - Keys and values live in two parallel arrays sized by the const generic `N`
//! - Zero heap allocations - the map never grows
//! - Entries stay in insertion order; removal compacts the arrays
//! - O(len) linear scans for lookup, O(N)-bounded for every operation
//! - No hashing and no ordering: keys only need an equality strategy
//!
//! ## Key Equality
//!
//! Keys are compared with `PartialEq` by default. Types without a natural equality, or
//! callers wanting a looser one, pass a [`KeyMatcher`] (any `Fn(&K, &K) -> bool` works)
//! to [`FixedMap::with_matcher`].
//!
//! ## Example
//!
//! ```rust
//! use fixedmap::{FixedMap, FixedMapError};
//!
//! // Create a map with capacity for 3 entries
//! let mut map = FixedMap::<&str, i32, 3>::new();
//!
//! map.insert("a", 1).unwrap();
//! map.insert("b", 2).unwrap();
//! *map.get_or_insert("c").unwrap() = 3;
//! assert!(map.will_overflow());
//!
//! // A fourth key is rejected, not silently dropped
//! assert_eq!(map.insert("d", 4), Err(FixedMapError::CapacityExceeded { capacity: 3 }));
//!
//! map.remove(&"b");
//! assert_eq!(map.key_at(0), Ok(&"a"));
//! assert_eq!(map.key_at(1), Ok(&"c"));
//! assert_eq!(map.len(), 2);
//! ```
#![cfg_attr(not(test), no_std)]

mod error;
mod matcher;
#[cfg(feature = "serde")]
mod serde_impl;

use core::fmt;

use log::{debug, trace, warn};

pub use crate::error::FixedMapError;
pub use crate::matcher::{AsciiCaseInsensitive, KeyMatcher, NativeEq};

/// Outcome of a successful [`FixedMap::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion<V> {
    /// The key was new and now occupies the next free slot.
    Inserted,
    /// The key was already present; holds the value it replaced.
    Updated(V),
}

/// A fixed-capacity map backed by parallel key and value arrays.
///
/// `FixedMap` is designed as an alternative to `HashMap` for cases where:
/// - The maximum number of entries is small and known at compile time
/// - Heap allocations are not possible
/// - Keys cannot be hashed or ordered, only compared
///
/// Occupied entries are always the slots `[0, len())`, in insertion order, so
/// `key_at`/`value_at` over `0..len()` visit every entry.
///
/// Type Parameters:
/// - `K`: Key type, must implement `Default` (used to fill unoccupied slots)
/// - `V`: Value type, must implement `Clone + Default`
/// - `N`: Capacity of the map (const generic parameter)
/// - `M`: Key equality strategy, [`NativeEq`] unless chosen with [`FixedMap::with_matcher`]
pub struct FixedMap<K, V, const N: usize, M = NativeEq> {
    keys: [K; N],
    values: [V; N],
    // Slots [0, len) are occupied
    len: usize,
    // Seeds slots created by `get_or_insert`
    null_value: V,
    matcher: M,
}

impl<K, V, const N: usize> FixedMap<K, V, N, NativeEq>
where
    K: Default + PartialEq,
    V: Clone + Default,
{
    /// Creates a new empty FixedMap comparing keys with `PartialEq`.
    ///
    /// Time Complexity: O(N)
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let map = FixedMap::<u16, u32, 16>::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_matcher(NativeEq)
    }
}

impl<K, V, const N: usize, M> Default for FixedMap<K, V, N, M>
where
    K: Default,
    V: Clone + Default,
    M: KeyMatcher<K> + Default,
{
    fn default() -> Self {
        Self::with_matcher(M::default())
    }
}

impl<K, V, const N: usize, M> FixedMap<K, V, N, M>
where
    K: Default,
    V: Clone + Default,
    M: KeyMatcher<K>,
{
    /// Creates a new empty FixedMap that matches keys with `matcher`.
    ///
    /// The matcher is fixed for the lifetime of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let mut map = FixedMap::<String, u8, 4, _>::with_matcher(|a: &String, b: &String| {
    ///     a.trim() == b.trim()
    /// });
    /// map.insert("key".to_string(), 1).unwrap();
    /// assert!(map.contains(&"  key ".to_string()));
    /// ```
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            keys: core::array::from_fn(|_| K::default()),
            values: core::array::from_fn(|_| V::default()),
            len: 0,
            null_value: V::default(),
            matcher,
        }
    }

    /// Returns the number of entries currently in the map.
    ///
    /// Time Complexity: O(1)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the total capacity of the map, the const generic parameter `N`.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if adding one more new key would exceed the capacity.
    ///
    /// Updating a key that is already present never overflows, so this is a
    /// pre-check for inserting keys the caller knows to be new.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let mut map = FixedMap::<u8, u8, 1>::new();
    /// assert!(!map.will_overflow());
    /// map.insert(1, 10).unwrap();
    /// assert!(map.will_overflow());
    /// ```
    pub fn will_overflow(&self) -> bool {
        self.len + 1 > N
    }

    /// Returns the equality strategy this map was built with.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Returns the value seeded into slots created by [`get_or_insert`](Self::get_or_insert).
    pub fn null_value(&self) -> &V {
        &self.null_value
    }

    /// Sets the value seeded into slots created by [`get_or_insert`](Self::get_or_insert).
    ///
    /// Entries already in the map are not touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let mut map = FixedMap::<&str, i32, 4>::new();
    /// map.set_null_value(-1);
    /// assert_eq!(*map.get_or_insert("unset").unwrap(), -1);
    /// ```
    pub fn set_null_value(&mut self, value: V) {
        self.null_value = value;
    }

    /// Returns the index of the first occupied slot whose key matches `key`.
    ///
    /// Slots are scanned from index 0 upward, so with a matcher that lets several
    /// stored keys match the same probe the earliest one wins.
    ///
    /// Time Complexity: O(len)
    ///
    /// # Returns
    /// - `Some(index)` with `index < len()` if a matching key is stored
    /// - `None` if no occupied slot matches
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.keys[..self.len]
            .iter()
            .position(|stored| self.matcher.matches(key, stored))
    }

    /// Checks whether a key matching `key` is stored in the map.
    ///
    /// Time Complexity: O(len)
    pub fn contains(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }

    /// Retrieves a reference to the value associated with `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let mut map = FixedMap::<&str, i32, 8>::new();
    /// map.insert("apple", 42).unwrap();
    ///
    /// assert_eq!(map.get(&"apple"), Some(&42));
    /// assert_eq!(map.get(&"banana"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index_of(key).map(|index| &self.values[index])
    }

    /// Retrieves a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.index_of(key).map(|index| &mut self.values[index])
    }

    /// Returns a mutable reference to the value for `key`, inserting the null value
    /// first if the key is absent.
    ///
    /// This is the map's indexer: it serves both as lookup and as insert-with-default.
    /// A newly created slot holds a clone of [`null_value`](Self::null_value) until the
    /// caller writes through the returned reference.
    ///
    /// Time Complexity: O(len)
    ///
    /// # Errors
    /// - `FixedMapError::CapacityExceeded` if the key is absent and the map is full.
    ///   Nothing is written in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::{FixedMap, FixedMapError};
    ///
    /// let mut map = FixedMap::<char, u32, 2>::new();
    ///
    /// *map.get_or_insert('a').unwrap() += 1;
    /// *map.get_or_insert('a').unwrap() += 1;
    /// *map.get_or_insert('b').unwrap() += 1;
    /// assert_eq!(map.get(&'a'), Some(&2));
    ///
    /// assert!(matches!(
    ///     map.get_or_insert('c'),
    ///     Err(FixedMapError::CapacityExceeded { capacity: 2 })
    /// ));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn get_or_insert(&mut self, key: K) -> Result<&mut V, FixedMapError> {
        let index = match self.index_of(&key) {
            Some(index) => index,
            None => self.push(key, self.null_value.clone())?,
        };
        Ok(&mut self.values[index])
    }

    /// Inserts a key-value pair or updates the value of an existing key.
    ///
    /// When the key is already present the stored key is kept and only the value is
    /// replaced, so an update succeeds even when the map is full.
    ///
    /// Time Complexity: O(len)
    ///
    /// # Returns
    /// - `Ok(Insertion::Inserted)` if the key was new
    /// - `Ok(Insertion::Updated(old))` if the key existed, with its previous value
    /// - `Err(FixedMapError::CapacityExceeded)` if the key is new and the map is full
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::{FixedMap, FixedMapError, Insertion};
    ///
    /// let mut map = FixedMap::<i32, &str, 2>::new();
    ///
    /// assert_eq!(map.insert(1, "one"), Ok(Insertion::Inserted));
    /// assert_eq!(map.insert(1, "ONE"), Ok(Insertion::Updated("one")));
    /// map.insert(2, "two").unwrap();
    ///
    /// assert_eq!(map.insert(3, "three"), Err(FixedMapError::CapacityExceeded { capacity: 2 }));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Insertion<V>, FixedMapError> {
        match self.index_of(&key) {
            Some(index) => {
                trace!("fixedmap: updated slot {index}");
                Ok(Insertion::Updated(core::mem::replace(
                    &mut self.values[index],
                    value,
                )))
            }
            None => {
                self.push(key, value)?;
                Ok(Insertion::Inserted)
            }
        }
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// Entries after the removed one shift left by one slot, so the remaining
    /// entries keep their relative order and stay packed in `[0, len())`.
    /// Removing an absent key is a no-op.
    ///
    /// Time Complexity: O(len)
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::FixedMap;
    ///
    /// let mut map = FixedMap::<&str, i32, 4>::new();
    /// map.insert("a", 1).unwrap();
    /// map.insert("b", 2).unwrap();
    /// map.insert("c", 3).unwrap();
    ///
    /// assert_eq!(map.remove(&"b"), Some(2));
    /// assert_eq!(map.key_at(1), Ok(&"c"));
    /// assert_eq!(map.remove(&"b"), None); // Already removed
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of(key)?;

        self.keys[index..self.len].rotate_left(1);
        self.values[index..self.len].rotate_left(1);
        self.len -= 1;

        // The removed entry now sits in the first free slot
        self.keys[self.len] = K::default();
        let value = core::mem::take(&mut self.values[self.len]);

        trace!("fixedmap: removed slot {index}, {} remaining", self.len);
        Some(value)
    }

    /// Removes all entries. The null value and matcher are kept.
    ///
    /// Time Complexity: O(len)
    pub fn clear(&mut self) {
        for slot in 0..self.len {
            self.keys[slot] = K::default();
            self.values[slot] = V::default();
        }
        debug!("fixedmap: cleared {} entries", self.len);
        self.len = 0;
    }

    /// Returns the key stored at `index`.
    ///
    /// # Errors
    /// - `FixedMapError::IndexOutOfRange` if `index >= len()`
    pub fn key_at(&self, index: usize) -> Result<&K, FixedMapError> {
        self.check_index(index)?;
        Ok(&self.keys[index])
    }

    /// Returns the value stored at `index`.
    ///
    /// # Errors
    /// - `FixedMapError::IndexOutOfRange` if `index >= len()`
    ///
    /// # Examples
    ///
    /// ```
    /// use fixedmap::{FixedMap, FixedMapError};
    ///
    /// let mut map = FixedMap::<u8, &str, 4>::new();
    /// map.insert(7, "seven").unwrap();
    ///
    /// assert_eq!(map.value_at(0), Ok(&"seven"));
    /// assert_eq!(map.value_at(1), Err(FixedMapError::IndexOutOfRange { index: 1, len: 1 }));
    /// ```
    pub fn value_at(&self, index: usize) -> Result<&V, FixedMapError> {
        self.check_index(index)?;
        Ok(&self.values[index])
    }

    /// Returns a mutable reference to the value stored at `index`.
    ///
    /// # Errors
    /// - `FixedMapError::IndexOutOfRange` if `index >= len()`
    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut V, FixedMapError> {
        self.check_index(index)?;
        Ok(&mut self.values[index])
    }

    /// Returns the key and value stored at `index`.
    ///
    /// # Errors
    /// - `FixedMapError::IndexOutOfRange` if `index >= len()`
    pub fn entry_at(&self, index: usize) -> Result<(&K, &V), FixedMapError> {
        self.check_index(index)?;
        Ok((&self.keys[index], &self.values[index]))
    }

    fn check_index(&self, index: usize) -> Result<(), FixedMapError> {
        if index < self.len {
            Ok(())
        } else {
            Err(FixedMapError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    // Appends a key the caller has already checked is absent.
    fn push(&mut self, key: K, value: V) -> Result<usize, FixedMapError> {
        if self.len == N {
            warn!("fixedmap: rejected new key, map is full (capacity {})", N);
            return Err(FixedMapError::CapacityExceeded { capacity: N });
        }

        let index = self.len;
        self.keys[index] = key;
        self.values[index] = value;
        self.len += 1;

        trace!("fixedmap: inserted slot {index}");
        Ok(index)
    }
}

impl<K, V, const N: usize, M> Clone for FixedMap<K, V, N, M>
where
    K: Clone,
    V: Clone,
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
            len: self.len,
            null_value: self.null_value.clone(),
            matcher: self.matcher.clone(),
        }
    }
}

impl<K, V, const N: usize, M> fmt::Debug for FixedMap<K, V, N, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    // Only the occupied slots are shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys[..self.len].iter().zip(&self.values[..self.len]))
            .finish()
    }
}
