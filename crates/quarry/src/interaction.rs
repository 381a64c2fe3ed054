//! # Block Interaction Raycaster
//!
//! Marches a ray out of the eye in small fixed steps. The first sample
//! inside a solid cell is the target; the sample before it names the
//! placement cell, the empty neighbour on the side the ray came from.
//!
//! Breaking is timed: progress accumulates while the break control is held
//! on the same target and commits at 1.0. Placing is instant on a fresh
//! press. Both check every precondition before touching the world or the
//! inventory, so a rejected action leaves no trace.

use quarry_items::Inventory;
use quarry_shared::{BlockKind, BlockPos, Vec3};
use serde::Serialize;

use crate::aabb::Aabb;
use crate::blocks::BlockTable;
use crate::config::{Dimensions, InteractionConfig};
use crate::world::{BlockQuery, VoxelWorld};

/// What the look ray found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// First solid cell along the ray.
    pub target: BlockPos,
    /// Cell of the sample before the hit. `None` if the eye is inside the target.
    pub placement: Option<BlockPos>,
    /// Distance along the ray to the hit sample.
    pub distance: f32,
}

/// Marches from `origin` along `direction` up to `reach`.
///
/// Returns `None` if no solid cell lies within reach or `direction` is zero.
#[must_use]
pub fn raycast<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    origin: Vec3,
    direction: Vec3,
    reach: f32,
    step: f32,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || step <= 0.0 {
        return None;
    }

    // Saturates for absurd reach / step ratios.
    let samples = (reach / step).floor() as u32;
    let mut previous: Option<BlockPos> = None;
    for i in 0..=samples {
        let distance = i as f32 * step;
        let cell = BlockPos::from_world(origin + dir * distance);
        if query.is_solid(cell) {
            return Some(RayHit {
                target: cell,
                placement: previous,
                distance,
            });
        }

        previous = Some(cell);
    }
    None
}

/// Break progress, exposed read-only to presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BreakState {
    /// Cell being broken.
    pub target: Option<BlockPos>,
    /// Normalized progress in `[0, 1]`.
    pub progress: f32,
}

impl BreakState {
    fn reset(&mut self, target: Option<BlockPos>) {
        self.target = target;
        self.progress = 0.0;
    }
}

/// A block removed from the world and added to the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrokenBlock {
    /// Where.
    pub pos: BlockPos,
    /// What was there.
    pub kind: BlockKind,
    /// Inventory quantity of `kind` afterwards.
    pub quantity: u32,
}

/// A block taken from the inventory and set in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedBlock {
    /// Where.
    pub pos: BlockPos,
    /// What was placed.
    pub kind: BlockKind,
    /// Inventory quantity of `kind` afterwards.
    pub quantity: u32,
}

/// Why a placement did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceRejection {
    /// Nothing within reach, or the eye is inside a block.
    NoPlacementCell,
    /// No kind is selected.
    NothingSelected,
    /// The selected kind is not in the inventory.
    OutOfStock,
    /// The placement cell already holds a solid block.
    Occupied,
    /// The block would overlap the character.
    TooClose,
}

/// Per-tick context for committing an interaction.
pub struct InteractionContext<'a, W: ?Sized> {
    /// The world to mutate.
    pub world: &'a mut W,
    /// Block properties.
    pub blocks: &'a BlockTable,
    /// The character's inventory.
    pub inventory: &'a mut Inventory<BlockKind>,
}

/// Targeting and break state for one character.
#[derive(Clone, Debug, Default)]
pub struct Interactor {
    hit: Option<RayHit>,
    state: BreakState,
}

impl Interactor {
    /// Creates an interactor with nothing targeted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current look-ray hit.
    #[inline]
    #[must_use]
    pub fn hit(&self) -> Option<RayHit> {
        self.hit
    }

    /// The current break progress.
    #[inline]
    #[must_use]
    pub fn break_state(&self) -> BreakState {
        self.state
    }

    /// Re-casts the look ray. Losing the target resets break progress.
    pub fn retarget<W: VoxelWorld + ?Sized>(
        &mut self,
        query: &BlockQuery<'_, W>,
        eye: Vec3,
        direction: Vec3,
        config: &InteractionConfig,
    ) -> Option<RayHit> {
        self.hit = raycast(query, eye, direction, config.reach, config.ray_step);
        if self.hit.is_none() {
            self.state.reset(None);
        }
        self.hit
    }

    /// Advances or resets break progress; commits the break at 1.0.
    ///
    /// If the inventory cannot take the broken kind, progress holds at 1.0
    /// and nothing changes until it can.
    pub fn advance_break<W: VoxelWorld + ?Sized>(
        &mut self,
        ctx: &mut InteractionContext<'_, W>,
        held: bool,
        dt: f32,
        config: &InteractionConfig,
    ) -> Option<BrokenBlock> {
        let Some(hit) = self.hit else {
            self.state.reset(None);
            return None;
        };

        if !held {
            self.state.reset(Some(hit.target));
            return None;
        }

        if self.state.target != Some(hit.target) {
            self.state.reset(Some(hit.target));
        }

        let kind = ctx.world.get_block(hit.target);
        let time = effective_break_time(ctx.blocks, kind, config);
        self.state.progress = if time > 0.0 {
            (self.state.progress + dt / time).min(1.0)
        } else {
            1.0
        };

        if self.state.progress < 1.0 {
            return None;
        }

        let quantity = match ctx.inventory.add(kind, 1) {
            Ok(quantity) => quantity,
            Err(e) => {
                tracing::debug!(?kind, pos = ?hit.target, error = %e, "break held");
                return None;
            }
        };
        ctx.world.set_block(hit.target, BlockKind::Air);
        self.state.reset(None);
        self.hit = None;

        tracing::debug!(?kind, pos = ?hit.target, quantity, "block broken");
        Some(BrokenBlock {
            pos: hit.target,
            kind,
            quantity,
        })
    }

    /// Places `selected` at the placement cell, if every check passes.
    ///
    /// # Errors
    ///
    /// Returns the first failed check. Nothing is mutated on error.
    pub fn place<W: VoxelWorld + ?Sized>(
        &mut self,
        ctx: &mut InteractionContext<'_, W>,
        selected: Option<BlockKind>,
        feet: Vec3,
        dims: &Dimensions,
    ) -> Result<PlacedBlock, PlaceRejection> {
        let pos = self
            .hit
            .and_then(|hit| hit.placement)
            .ok_or(PlaceRejection::NoPlacementCell)?;
        let kind = selected.ok_or(PlaceRejection::NothingSelected)?;

        if !ctx.inventory.contains(kind, 1) {
            return Err(PlaceRejection::OutOfStock);
        }
        if ctx.blocks.is_solid(ctx.world.get_block(pos)) {
            return Err(PlaceRejection::Occupied);
        }
        if overlaps_character(pos, feet, dims) {
            return Err(PlaceRejection::TooClose);
        }

        let quantity = ctx
            .inventory
            .remove(kind, 1)
            .map_err(|_| PlaceRejection::OutOfStock)?;
        ctx.world.set_block(pos, kind);
        self.hit = None;

        tracing::debug!(?kind, ?pos, quantity, "block placed");
        Ok(PlacedBlock {
            pos,
            kind,
            quantity,
        })
    }
}

/// Seconds of held input needed to break `kind`.
#[must_use]
pub fn effective_break_time(
    blocks: &BlockTable,
    kind: BlockKind,
    config: &InteractionConfig,
) -> f32 {
    if config.scale_break_by_hardness {
        config.break_time * blocks.hardness(kind).max(0.0)
    } else {
        config.break_time
    }
}

/// Whether a block at `cell` would sit inside or against the character.
///
/// Rejects when the cell center is within half a width of the body center,
/// or when the cell's box intersects the body box.
#[must_use]
pub fn overlaps_character(cell: BlockPos, feet: Vec3, dims: &Dimensions) -> bool {
    let body = Aabb::from_feet(feet, dims);
    body.center().distance(cell.center()) < dims.half_width()
        || body.intersects(&Aabb::from_cell(cell))
}
