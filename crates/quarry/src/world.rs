//! # Voxel World Query Surface
//!
//! The world is an external collaborator. This module defines the two
//! calls the character needs from it, a borrowed view that classifies
//! cells through the block table, and a sparse in-memory world for tests
//! and the sandbox.
//!
//! Queries against cells the world does not have (unloaded, out of range)
//! must answer [`BlockKind::Air`]. The character then falls or walks
//! through, which looks wrong but is not an error.

use std::collections::HashMap;

use quarry_shared::{BlockKind, BlockPos};

use crate::blocks::BlockTable;

/// What the simulation needs from the world.
pub trait VoxelWorld {
    /// Kind at `pos`. Unknown cells answer `Air`.
    fn get_block(&self, pos: BlockPos) -> BlockKind;

    /// Overwrites the cell at `pos`.
    fn set_block(&mut self, pos: BlockPos, kind: BlockKind);
}

/// A world paired with the block table, answering per-cell questions.
///
/// Cheap to build; create one per tick phase and drop it before mutating
/// the world.
pub struct BlockQuery<'a, W: ?Sized> {
    world: &'a W,
    blocks: &'a BlockTable,
}

impl<W: ?Sized> Clone for BlockQuery<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: ?Sized> Copy for BlockQuery<'_, W> {}

impl<'a, W: VoxelWorld + ?Sized> BlockQuery<'a, W> {
    /// Creates a query view.
    #[must_use]
    pub fn new(world: &'a W, blocks: &'a BlockTable) -> Self {
        Self { world, blocks }
    }

    /// The table this view classifies with.
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &'a BlockTable {
        self.blocks
    }

    /// Kind at `pos`.
    #[inline]
    #[must_use]
    pub fn block(&self, pos: BlockPos) -> BlockKind {
        self.world.get_block(pos)
    }

    /// Whether the cell at `pos` blocks movement.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, pos: BlockPos) -> bool {
        self.blocks.is_solid(self.block(pos))
    }

    /// Whether the cell at `pos` is liquid.
    #[inline]
    #[must_use]
    pub fn is_liquid(&self, pos: BlockPos) -> bool {
        self.blocks.is_liquid(self.block(pos))
    }
}

/// Sparse world backed by a hash map. Absent cells are air.
#[derive(Clone, Debug, Default)]
pub struct GridWorld {
    cells: HashMap<BlockPos, BlockKind>,
}

impl GridWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the inclusive box `min..=max` with `kind`.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, kind: BlockKind) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_block(BlockPos::new(x, y, z), kind);
                }
            }
        }
    }

    /// Number of stored non-air cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if every cell is air.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of stored cells that `blocks` calls solid.
    #[must_use]
    pub fn solid_count(&self, blocks: &BlockTable) -> usize {
        self.cells.values().filter(|kind| blocks.is_solid(**kind)).count()
    }
}

impl VoxelWorld for GridWorld {
    fn get_block(&self, pos: BlockPos) -> BlockKind {
        self.cells.get(&pos).copied().unwrap_or(BlockKind::Air)
    }

    fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        if kind.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_cells_are_air() {
        let world = GridWorld::new();
        assert_eq!(world.get_block(BlockPos::new(1_000_000, -5, 3)), BlockKind::Air);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut world = GridWorld::new();
        world.fill(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 1), BlockKind::Stone);
        assert_eq!(world.len(), 4);

        world.set_block(BlockPos::new(0, 0, 0), BlockKind::Air);
        assert_eq!(world.len(), 3);
        assert_eq!(world.get_block(BlockPos::new(0, 0, 0)), BlockKind::Air);
    }

    #[test]
    fn test_query_classifies_through_table() {
        let mut world = GridWorld::new();
        world.set_block(BlockPos::new(0, 0, 0), BlockKind::Stone);
        world.set_block(BlockPos::new(0, 1, 0), BlockKind::Water);
        let blocks = BlockTable::standard();
        let query = BlockQuery::new(&world, &blocks);

        assert!(query.is_solid(BlockPos::new(0, 0, 0)));
        assert!(!query.is_solid(BlockPos::new(0, 1, 0)));
        assert!(query.is_liquid(BlockPos::new(0, 1, 0)));
        assert!(!query.is_liquid(BlockPos::new(0, 2, 0)));
        assert_eq!(world.solid_count(&blocks), 1);
    }
}
