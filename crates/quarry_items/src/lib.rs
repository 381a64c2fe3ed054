//! # Quarry Item Stores
//!
//! The two containers a character carries:
//!
//! 1. **Inventory** - item kind to quantity. Capacity counts distinct
//!    kinds, not stack sizes. A quantity never sits at zero: reaching zero
//!    removes the kind.
//! 2. **Equipment** - a fixed set of eight slots, each holding at most one
//!    item kind. Every slot exists at all times.
//!
//! Both are generic over the item kind so the simulation can key them by
//! block kind while tests use plain integers.
//!
//! ## Example
//!
//! ```rust
//! use quarry_items::{Equipment, EquipmentSlot, Inventory};
//!
//! let mut inv: Inventory<u32> = Inventory::new(4);
//! inv.add(7, 3)?;
//! inv.remove(7, 1)?;
//! assert_eq!(inv.count(7), 2);
//!
//! let mut gear: Equipment<u32> = Equipment::new();
//! assert_eq!(gear.equip(EquipmentSlot::Head, 100), None);
//! assert_eq!(gear.unequip(EquipmentSlot::Head), Some(100));
//! # Ok::<(), quarry_items::ItemError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod equipment;
pub mod error;
pub mod inventory;

pub use equipment::{Equipment, EquipmentSlot};
pub use error::{ItemError, ItemResult};
pub use inventory::{Inventory, DEFAULT_INVENTORY_CAPACITY};
