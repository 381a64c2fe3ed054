//! # Item Store Error Types
//!
//! All errors that can occur when mutating an inventory.

use thiserror::Error;

/// Errors that can occur in the item stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Adding a new kind would exceed the distinct-kind capacity.
    #[error("inventory full: capacity {capacity} distinct kinds")]
    InventoryFull {
        /// Maximum distinct kinds.
        capacity: usize,
    },

    /// Tried to remove more than is held.
    #[error("insufficient quantity: need {required}, have {available}")]
    InsufficientQuantity {
        /// The amount required.
        required: u32,
        /// The amount available.
        available: u32,
    },

    /// Zero is never a valid amount to add or remove.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// The stored quantity would overflow.
    #[error("quantity overflow: have {current}, tried to add {amount}")]
    QuantityOverflow {
        /// Current quantity.
        current: u32,
        /// Amount tried to add.
        amount: u32,
    },
}

/// Result type for item store operations.
pub type ItemResult<T> = Result<T, ItemError>;
