//! # Collision Resolver
//!
//! Moves the character box from its current position toward a candidate
//! position one axis at a time, X then Y then Z, against every solid cell
//! the box would touch.
//!
//! - X or Z overlap: that axis reverts (inelastic wall stop).
//! - Y overlap moving down: snap the feet to the highest solid top under
//!   the footprint and report a landing.
//! - Y overlap moving up: snap the head to the lowest solid bottom above
//!   it, never below where the feet started.
//!
//! Long moves are split into sub-steps no longer than [`MAX_STEP`] on any
//! axis, so a fast fall cannot skip over a one-cell floor.
//!
//! The resolver is pure. It reads the world and returns a [`Resolution`];
//! the caller decides what to do with it.

use quarry_shared::{BlockPos, Vec3};

use crate::aabb::Aabb;
use crate::config::Dimensions;
use crate::world::{BlockQuery, VoxelWorld};

/// Longest distance moved on one axis in a single sub-step (blocks).
pub const MAX_STEP: f32 = 0.45;

/// Slack when comparing a surface against the box it was resolved from.
const CONTACT_EPSILON: f32 = 1e-4;

/// Depth of the standing check under the feet.
const GROUND_PROBE: f32 = 1e-3;

/// Outcome of one resolved move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Corrected feet position.
    pub position: Vec3,
    /// Standing on a solid cell after the move.
    pub grounded: bool,
    /// Downward motion was stopped by a floor this move.
    pub landed: bool,
    /// Upward motion was stopped by a ceiling this move.
    pub hit_ceiling: bool,
    /// Per-axis: motion on this axis was stopped.
    pub blocked: [bool; 3],
}

impl Resolution {
    /// Zeroes the velocity components on blocked axes.
    #[must_use]
    pub fn correct_velocity(&self, velocity: Vec3) -> Vec3 {
        let mut corrected = velocity;
        for (axis, blocked) in self.blocked.iter().enumerate() {
            if *blocked {
                corrected = corrected.with_axis(axis, 0.0);
            }
        }
        corrected
    }
}

/// Resolves a move from `current` toward `candidate`.
#[must_use]
pub fn resolve<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    current: Vec3,
    candidate: Vec3,
    dims: &Dimensions,
) -> Resolution {
    let delta = candidate - current;
    let largest = delta.x.abs().max(delta.y.abs()).max(delta.z.abs());
    let steps = ((largest / MAX_STEP).ceil() as u32).max(1);
    let step = delta * (1.0 / steps as f32);

    let mut out = Resolution {
        position: current,
        grounded: false,
        landed: false,
        hit_ceiling: false,
        blocked: [false; 3],
    };

    for _ in 0..steps {
        let mut d = step;
        for (axis, blocked) in out.blocked.iter().enumerate() {
            if *blocked {
                d = d.with_axis(axis, 0.0);
            }
        }
        if d == Vec3::ZERO {
            break;
        }
        step_axes(query, &mut out, d, dims);
    }

    // A fall that ends exactly on a top never overlaps; count it as a landing.
    if delta.y < 0.0 && !out.blocked[1] && touching_ground(query, out.position, dims) {
        out.blocked[1] = true;
        out.landed = true;
    }

    let rising = delta.y > 0.0 && !out.blocked[1];
    out.grounded = out.landed || (!rising && touching_ground(query, out.position, dims));
    out
}

/// Whether the box at `feet` overlaps any solid cell.
#[must_use]
pub fn overlaps_solid<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    feet: Vec3,
    dims: &Dimensions,
) -> bool {
    let aabb = Aabb::from_feet(feet, dims);
    aabb.cells()
        .any(|cell| query.is_solid(cell) && aabb.intersects(&Aabb::from_cell(cell)))
}

/// Whether a solid cell sits directly under the feet.
#[must_use]
pub fn touching_ground<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    feet: Vec3,
    dims: &Dimensions,
) -> bool {
    let hw = dims.half_width();
    let probe = Aabb::new(
        Vec3::new(feet.x - hw, feet.y - GROUND_PROBE, feet.z - hw),
        Vec3::new(feet.x + hw, feet.y, feet.z + hw),
    );
    probe
        .cells()
        .any(|cell| query.is_solid(cell) && probe.intersects(&Aabb::from_cell(cell)))
}

fn step_axes<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    out: &mut Resolution,
    d: Vec3,
    dims: &Dimensions,
) {
    // X
    if d.x != 0.0 {
        let moved = out.position.with_axis(0, out.position.x + d.x);
        if overlaps_solid(query, moved, dims) {
            out.blocked[0] = true;
        } else {
            out.position = moved;
        }
    }

    // Y, against the footprint X just settled
    if d.y != 0.0 {
        let target_y = out.position.y + d.y;
        let moved = out.position.with_axis(1, target_y);
        if overlaps_solid(query, moved, dims) {
            out.blocked[1] = true;
            if d.y < 0.0 {
                if let Some(top) = highest_floor(query, out.position, target_y, dims) {
                    out.position.y = top;
                    out.landed = true;
                }
            } else if let Some(bottom) = lowest_ceiling(query, out.position, target_y, dims) {
                out.position.y = (bottom - dims.height).max(out.position.y);
                out.hit_ceiling = true;
            }
        } else {
            out.position = moved;
        }
    }

    // Z
    if d.z != 0.0 {
        let moved = out.position.with_axis(2, out.position.z + d.z);
        if overlaps_solid(query, moved, dims) {
            out.blocked[2] = true;
        } else {
            out.position = moved;
        }
    }
}

/// Highest solid top in the footprint between `target_y` and the feet.
fn highest_floor<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    feet: Vec3,
    target_y: f32,
    dims: &Dimensions,
) -> Option<f32> {
    let hw = dims.half_width();
    let swept = Aabb::new(
        Vec3::new(feet.x - hw, target_y, feet.z - hw),
        Vec3::new(feet.x + hw, feet.y, feet.z + hw),
    );
    swept
        .cells()
        .filter(|cell| under_footprint(&swept, *cell) && query.is_solid(*cell))
        .map(|cell| cell.y as f32 + 1.0)
        .filter(|top| *top <= feet.y + CONTACT_EPSILON && *top > target_y)
        .reduce(f32::max)
}

/// Lowest solid bottom in the footprint between the head and `target_y`'s head.
fn lowest_ceiling<W: VoxelWorld + ?Sized>(
    query: &BlockQuery<'_, W>,
    feet: Vec3,
    target_y: f32,
    dims: &Dimensions,
) -> Option<f32> {
    let hw = dims.half_width();
    let head = feet.y + dims.height;
    let target_head = target_y + dims.height;
    let swept = Aabb::new(
        Vec3::new(feet.x - hw, head, feet.z - hw),
        Vec3::new(feet.x + hw, target_head, feet.z + hw),
    );
    swept
        .cells()
        .filter(|cell| under_footprint(&swept, *cell) && query.is_solid(*cell))
        .map(|cell| cell.y as f32)
        .filter(|bottom| *bottom >= head - CONTACT_EPSILON && *bottom < target_head)
        .reduce(f32::min)
}

/// Whether `cell`'s column strictly overlaps the box's horizontal extent.
fn under_footprint(aabb: &Aabb, cell: BlockPos) -> bool {
    let x = cell.x as f32;
    let z = cell.z as f32;
    x < aabb.max.x && x + 1.0 > aabb.min.x && z < aabb.max.z && z + 1.0 > aabb.min.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockTable;
    use crate::world::GridWorld;
    use quarry_shared::BlockKind;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn floor_world() -> GridWorld {
        let mut world = GridWorld::new();
        world.fill(BlockPos::new(-4, 0, -4), BlockPos::new(4, 0, 4), BlockKind::Stone);
        world
    }

    #[test]
    fn test_lands_exactly_on_top_at_any_speed() {
        let world = floor_world();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let dims = Dimensions::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let start = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(1.0..3.0),
                rng.gen_range(-2.0..2.0),
            );
            let speed: f32 = rng.gen_range(0.5..50.0);
            let candidate = start + Vec3::new(0.0, -speed * (1.0 / 60.0) - 1.0, 0.0);
            let res = resolve(&q, start, candidate, &dims);

            assert_eq!(res.position.y, 1.0, "from {start:?} at {speed}");
            assert!(res.grounded);
            assert!(res.landed);
            assert_eq!(res.correct_velocity(Vec3::new(0.0, -speed, 0.0)).y, 0.0);
        }
    }

    #[test]
    fn test_resting_stays_grounded() {
        let world = floor_world();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let feet = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, feet, feet, &Dimensions::default());
        assert_eq!(res.position, feet);
        assert!(res.grounded);
        assert!(!res.landed);
        assert_eq!(res.blocked, [false; 3]);
    }

    #[test]
    fn test_no_tunneling_through_thin_floor() {
        let world = floor_world();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(0.5, 4.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, -10.0, 0.0), &Dimensions::default());
        assert_eq!(res.position.y, 1.0);
        assert!(res.grounded);
    }

    #[test]
    fn test_highest_column_wins() {
        let mut world = floor_world();
        // A step one block higher under the +x half of the footprint.
        world.set_block(BlockPos::new(0, 1, 0), BlockKind::Stone);
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(-0.1, 3.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, -2.0, 0.0), &Dimensions::default());
        assert_eq!(res.position.y, 2.0);
        assert!(res.grounded);
    }

    #[test]
    fn test_wall_stops_x_only() {
        let mut world = floor_world();
        world.fill(BlockPos::new(2, 1, -4), BlockPos::new(2, 3, 4), BlockKind::Stone);
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(1.6, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.2, 0.0, 0.1), &Dimensions::default());

        assert_eq!(res.position.x, start.x);
        assert!((res.position.z - 0.6).abs() < 1e-6);
        assert_eq!(res.blocked, [true, false, false]);
        let v = res.correct_velocity(Vec3::new(12.0, 0.0, 6.0));
        assert_eq!(v, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let mut world = floor_world();
        world.fill(BlockPos::new(-4, 3, -4), BlockPos::new(4, 3, 4), BlockKind::Stone);
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let dims = Dimensions::default();
        let start = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, 0.5, 0.0), &dims);

        assert!(res.hit_ceiling);
        assert!(!res.landed);
        assert!(res.position.y + dims.height <= 3.0);
        assert!(res.position.y + dims.height > 2.99);
        assert!(!overlaps_solid(&q, res.position, &dims));
        assert!(res.correct_velocity(Vec3::new(0.0, 8.0, 0.0)).y == 0.0);
    }

    #[test]
    fn test_fall_ending_on_the_top_lands() {
        let world = floor_world();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let res = resolve(
            &q,
            Vec3::new(0.5, 1.5, 0.5),
            Vec3::new(0.5, 1.0, 0.5),
            &Dimensions::default(),
        );

        assert_eq!(res.position.y, 1.0);
        assert!(res.grounded);
        assert!(res.landed);
        assert_eq!(res.correct_velocity(Vec3::new(0.0, -30.0, 0.0)).y, 0.0);
    }

    #[test]
    fn test_exact_fit_gap_never_overlaps() {
        let mut world = floor_world();
        world.fill(BlockPos::new(-4, 3, -4), BlockPos::new(4, 3, 4), BlockKind::Stone);
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let dims = Dimensions {
            height: 2.0,
            ..Dimensions::default()
        };
        let start = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, 0.2, 0.1), &dims);

        assert!(res.hit_ceiling);
        assert_eq!(res.position.y, 1.0);
        assert!(!overlaps_solid(&q, res.position, &dims));
        assert_eq!(res.blocked, [false, true, false]);
        assert!((res.position.z - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_walking_off_ledge_clears_grounded() {
        let mut world = GridWorld::new();
        world.set_block(BlockPos::new(0, 0, 0), BlockKind::Stone);
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(1.0, 0.0, 0.0), &Dimensions::default());
        assert!((res.position.x - 1.5).abs() < 1e-5);
        assert!(!res.grounded);
    }

    #[test]
    fn test_rising_is_never_grounded() {
        let world = floor_world();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, 0.1, 0.0), &Dimensions::default());
        assert!(!res.grounded);
        assert!((res.position.y - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_unloaded_world_degrades_to_free_fall() {
        let world = GridWorld::new();
        let blocks = BlockTable::standard();
        let q = BlockQuery::new(&world, &blocks);
        let start = Vec3::new(0.5, 1.0, 0.5);
        let res = resolve(&q, start, start + Vec3::new(0.0, -0.5, 0.0), &Dimensions::default());
        assert!(!res.grounded);
        assert!((res.position.y - 0.5).abs() < 1e-6);
    }
}
