//! # Inventory
//!
//! Item kind to quantity. There are no positional slots and no stack
//! limit; the only bound is how many distinct kinds may be held at once.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ItemError, ItemResult};

/// Default maximum number of distinct kinds.
pub const DEFAULT_INVENTORY_CAPACITY: usize = 36;

/// A keyed-quantity inventory.
///
/// Invariant: every stored quantity is greater than zero. Removing the
/// last unit of a kind removes the kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Inventory<K: Ord> {
    /// Quantity per kind. Ordered so presentation iterates stably.
    items: BTreeMap<K, u32>,
    /// Maximum distinct kinds.
    capacity: usize,
}

impl<K: Copy + Ord> Inventory<K> {
    /// Creates an empty inventory holding at most `capacity` distinct kinds.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            capacity,
        }
    }

    /// Creates an inventory pre-populated with starting quantities.
    ///
    /// # Errors
    ///
    /// Fails if the starting set does not fit, or contains a zero quantity.
    pub fn with_contents<I>(capacity: usize, contents: I) -> ItemResult<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        let mut inv = Self::new(capacity);
        for (kind, count) in contents {
            inv.add(kind, count)?;
        }
        Ok(inv)
    }

    /// Returns the number of distinct kinds held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum number of distinct kinds.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks if no new kind can be added.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Quantity held of `kind` (zero if absent).
    #[inline]
    #[must_use]
    pub fn count(&self, kind: K) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    /// Checks whether at least `count` of `kind` are held.
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: K, count: u32) -> bool {
        self.count(kind) >= count
    }

    /// Checks whether `count` of `kind` could be added without error.
    #[must_use]
    pub fn can_accept(&self, kind: K, count: u32) -> bool {
        if count == 0 {
            return false;
        }
        match self.items.get(&kind) {
            Some(current) => current.checked_add(count).is_some(),
            None => !self.is_full(),
        }
    }

    /// Adds items and returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::InventoryFull` if `kind` is new and the
    /// inventory is at capacity, `ItemError::ZeroQuantity` for a zero
    /// count, and `ItemError::QuantityOverflow` if the total would not fit.
    pub fn add(&mut self, kind: K, count: u32) -> ItemResult<u32> {
        if count == 0 {
            return Err(ItemError::ZeroQuantity);
        }

        if let Some(current) = self.items.get_mut(&kind) {
            let total = current
                .checked_add(count)
                .ok_or(ItemError::QuantityOverflow {
                    current: *current,
                    amount: count,
                })?;
            *current = total;
            return Ok(total);
        }

        if self.is_full() {
            return Err(ItemError::InventoryFull {
                capacity: self.capacity,
            });
        }

        self.items.insert(kind, count);
        Ok(count)
    }

    /// Removes items and returns the remaining quantity.
    ///
    /// Nothing changes on error.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::InsufficientQuantity` if fewer than `count` are
    /// held and `ItemError::ZeroQuantity` for a zero count.
    pub fn remove(&mut self, kind: K, count: u32) -> ItemResult<u32> {
        if count == 0 {
            return Err(ItemError::ZeroQuantity);
        }

        let available = self.count(kind);
        if available < count {
            return Err(ItemError::InsufficientQuantity {
                required: count,
                available,
            });
        }

        let remaining = available - count;
        if remaining == 0 {
            self.items.remove(&kind);
        } else {
            self.items.insert(kind, remaining);
        }
        Ok(remaining)
    }

    /// Iterates `(kind, quantity)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.items.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Iterates held kinds in kind order.
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.items.keys().copied()
    }
}

impl<K: Copy + Ord> Default for Inventory<K> {
    fn default() -> Self {
        Self::new(DEFAULT_INVENTORY_CAPACITY)
    }
}
