//! Block kinds.
//!
//! A kind is just an identity. What a kind *does* (solid, transparent,
//! how hard it is) lives in the simulation's block table, which is built
//! once and passed around explicitly.

use serde::{Deserialize, Serialize};

/// Every kind of cell the world can hold.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum BlockKind {
    /// Empty cell.
    #[default]
    Air = 0,
    /// Grass-topped dirt.
    Grass = 1,
    /// Dirt.
    Dirt = 2,
    /// Stone.
    Stone = 3,
    /// Cobblestone.
    Cobblestone = 4,
    /// Sand.
    Sand = 5,
    /// Gravel.
    Gravel = 6,
    /// Log.
    Wood = 7,
    /// Planks.
    Planks = 8,
    /// Leaves.
    Leaves = 9,
    /// Glass.
    Glass = 10,
    /// Coal ore.
    CoalOre = 11,
    /// Iron ore.
    IronOre = 12,
    /// Bedrock.
    Bedrock = 13,
    /// Water source.
    Water = 14,
}

impl BlockKind {
    /// Number of kinds.
    pub const COUNT: usize = 15;

    /// All kinds in id order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Cobblestone,
        Self::Sand,
        Self::Gravel,
        Self::Wood,
        Self::Planks,
        Self::Leaves,
        Self::Glass,
        Self::CoalOre,
        Self::IronOre,
        Self::Bedrock,
        Self::Water,
    ];

    /// Numeric id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Index into per-kind tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks a kind up by id.
    #[must_use]
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Returns true for the empty cell.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Liquids are dedicated kinds, not a property flag.
    #[inline]
    #[must_use]
    pub const fn is_liquid(self) -> bool {
        matches!(self, Self::Water)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_table() {
        for (i, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(BlockKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(BlockKind::from_id(BlockKind::COUNT as u16), None);
    }

    #[test]
    fn test_only_water_is_liquid() {
        let liquids: Vec<_> = BlockKind::ALL.iter().filter(|k| k.is_liquid()).collect();
        assert_eq!(liquids, vec![&BlockKind::Water]);
    }

    #[test]
    fn test_kind_names_in_config() {
        #[derive(Deserialize)]
        struct Row {
            kind: BlockKind,
        }
        let row: Row = toml::from_str("kind = \"coal_ore\"").unwrap();
        assert_eq!(row.kind, BlockKind::CoalOre);
    }
}
