//! # Water State Sampler
//!
//! Four probes up the character's body at fixed heights above the feet.
//! The fraction of probes sitting in a liquid cell is the submersion.
//!
//! Two predicates come out of this module and they are deliberately not
//! the same:
//!
//! - [`WaterState::in_water`] is true when *any* probe is wet, feet
//!   included. Physics and movement use this one.
//! - [`head_submerged`] is true only when the eye cell is liquid.
//!   Presentation (audio muffling, fog tint) uses this one.

use quarry_shared::{BlockPos, Vec3};
use serde::Serialize;

use crate::world::{BlockQuery, VoxelWorld};

/// Probe heights above the feet: feet, waist, chest, head.
pub const SAMPLE_HEIGHTS: [f32; 4] = [0.0, 0.5, 1.0, 1.5];

/// Submersion sampled this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WaterState {
    /// Any probe is in liquid.
    pub in_water: bool,
    /// Wet probes over total probes: one of 0, 0.25, 0.5, 0.75, 1.
    pub submersion: f32,
}

impl WaterState {
    /// Completely dry.
    pub const DRY: Self = Self {
        in_water: false,
        submersion: 0.0,
    };

    /// Completely under.
    pub const SUBMERGED: Self = Self {
        in_water: true,
        submersion: 1.0,
    };

    /// State for a count of wet probes.
    #[must_use]
    pub fn from_wet_samples(wet: usize) -> Self {
        let submersion = wet.min(SAMPLE_HEIGHTS.len()) as f32 / SAMPLE_HEIGHTS.len() as f32;
        Self {
            in_water: submersion > 0.0,
            submersion,
        }
    }
}

/// Samples the water state for a character whose feet are at `feet`.
#[must_use]
pub fn sample<W: VoxelWorld + ?Sized>(query: &BlockQuery<'_, W>, feet: Vec3) -> WaterState {
    let wet = SAMPLE_HEIGHTS
        .iter()
        .filter(|h| query.is_liquid(BlockPos::from_world(feet + Vec3::new(0.0, **h, 0.0))))
        .count();
    WaterState::from_wet_samples(wet)
}

/// Whether the cell containing the eye is liquid.
#[must_use]
pub fn head_submerged<W: VoxelWorld + ?Sized>(query: &BlockQuery<'_, W>, eye: Vec3) -> bool {
    query.is_liquid(BlockPos::from_world(eye))
}
