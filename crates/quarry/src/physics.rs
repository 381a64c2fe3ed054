//! # Physics Integrator
//!
//! Gravity, buoyancy and drag, in that order. Gravity goes first so that
//! buoyancy partially cancels it within the same tick instead of being
//! undone by a later subtraction.

use quarry_shared::Vec3;

use crate::config::PhysicsConfig;
use crate::water::WaterState;

/// Submersion above which buoyancy engages.
pub const BUOYANCY_THRESHOLD: f32 = 0.5;

/// Applies one tick of forces to `velocity`.
///
/// Gravity is skipped while grounded. Falling speed is capped at the
/// terminal velocity.
#[must_use]
pub fn integrate(
    mut velocity: Vec3,
    grounded: bool,
    water: WaterState,
    dt: f32,
    config: &PhysicsConfig,
) -> Vec3 {
    if !grounded {
        let multiplier = if water.in_water {
            config.water_gravity_multiplier
        } else {
            1.0
        };
        velocity.y -= config.gravity * multiplier * dt;
        velocity.y = velocity.y.max(-config.terminal_velocity);
    }

    if water.in_water && water.submersion > BUOYANCY_THRESHOLD {
        velocity.y += config.buoyancy * water.submersion * dt;
        velocity.y *= config.water_drag;
    }

    if water.in_water {
        velocity.x *= config.water_drag;
        velocity.z *= config.water_drag;
    }

    velocity
}
