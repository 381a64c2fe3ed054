//! Axis-aligned bounding boxes against the unit voxel grid.

use quarry_shared::{BlockPos, Vec3};

use crate::config::Dimensions;

/// Axis-Aligned Bounding Box for collision detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates the character box standing on `feet` (bottom-center).
    #[must_use]
    pub fn from_feet(feet: Vec3, dims: &Dimensions) -> Self {
        let half_w = dims.half_width();
        Self {
            min: Vec3::new(feet.x - half_w, feet.y, feet.z - half_w),
            max: Vec3::new(feet.x + half_w, feet.y + dims.height, feet.z + half_w),
        }
    }

    /// Creates an AABB for a single voxel.
    #[must_use]
    pub fn from_cell(cell: BlockPos) -> Self {
        let min = cell.min_corner();
        Self {
            min,
            max: min + Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Checks if this AABB overlaps another. Touching faces do not count.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Moves the AABB by delta.
    #[must_use]
    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Every grid cell the box could overlap.
    pub fn cells(&self) -> impl Iterator<Item = BlockPos> {
        let min = BlockPos::from_world(self.min);
        let max_x = self.max.x.ceil() as i32;
        let max_y = self.max.y.ceil() as i32;
        let max_z = self.max.z.ceil() as i32;

        (min.y..max_y).flat_map(move |y| {
            (min.z..max_z).flat_map(move |z| (min.x..max_x).map(move |x| BlockPos::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 1.5, 1.5));
        let c = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let floor = Aabb::from_cell(BlockPos::new(0, 0, 0));
        let standing = Aabb::from_feet(Vec3::new(0.5, 1.0, 0.5), &Dimensions::default());
        assert!(!standing.intersects(&floor));
        assert!(standing.translate(Vec3::new(0.0, -0.01, 0.0)).intersects(&floor));
    }

    #[test]
    fn test_cells_cover_footprint() {
        let dims = Dimensions::default();
        // Straddles the x = 0 and z = 0 lines; 1.8 tall from y = 1.
        let b = Aabb::from_feet(Vec3::new(0.0, 1.0, 0.0), &dims);
        let cells: Vec<_> = b.cells().collect();
        assert_eq!(cells.len(), 2 * 2 * 2);
        assert!(cells.contains(&BlockPos::new(-1, 1, -1)));
        assert!(cells.contains(&BlockPos::new(0, 2, 0)));
        assert!(!cells.contains(&BlockPos::new(0, 0, 0)));
    }
}
