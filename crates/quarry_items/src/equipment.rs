//! # Equipment
//!
//! Eight fixed slots. Backed by an array indexed by slot so a slot can
//! never go missing.

use serde::Serialize;

/// Where an item can be worn or held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum EquipmentSlot {
    /// Helmet.
    Head = 0,
    /// Chestplate.
    Chest = 1,
    /// Leggings.
    Legs = 2,
    /// Boots.
    Feet = 3,
    /// Gloves.
    Hands = 4,
    /// Cloak or backpack.
    Back = 5,
    /// Primary held item.
    MainHand = 6,
    /// Secondary held item.
    OffHand = 7,
}

impl EquipmentSlot {
    /// Number of slots.
    pub const COUNT: usize = 8;

    /// All slots in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Head,
        Self::Chest,
        Self::Legs,
        Self::Feet,
        Self::Hands,
        Self::Back,
        Self::MainHand,
        Self::OffHand,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Slot to optional item kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Equipment<K> {
    slots: [Option<K>; EquipmentSlot::COUNT],
}

impl<K: Copy> Equipment<K> {
    /// Creates equipment with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [None; EquipmentSlot::COUNT],
        }
    }

    /// Item in `slot`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: EquipmentSlot) -> Option<K> {
        self.slots[slot.index()]
    }

    /// Puts `item` in `slot`, overwriting. Returns what was there.
    pub fn equip(&mut self, slot: EquipmentSlot, item: K) -> Option<K> {
        self.slots[slot.index()].replace(item)
    }

    /// Clears `slot` and returns what was there.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<K> {
        self.slots[slot.index()].take()
    }

    /// Checks whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates all eight slots in declaration order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, Option<K>)> + '_ {
        EquipmentSlot::ALL
            .iter()
            .map(move |slot| (*slot, self.slots[slot.index()]))
    }
}

impl<K: Copy> Default for Equipment<K> {
    fn default() -> Self {
        Self::new()
    }
}
