//! # Movement Intent Resolver
//!
//! Turns directional controls plus yaw into a world-space horizontal
//! velocity, and picks the vertical override (jump, ascend, dive) if any.
//!
//! Yaw is in degrees. At yaw 0 "forward" is -Z; at yaw 90 it is +X.
//! Pitch never enters here: looking up or down must not slow you down.

use quarry_shared::Vec3;

use crate::config::MovementConfig;
use crate::input::{Control, InputSource};
use crate::water::WaterState;

/// Controls relevant to movement, read once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MoveIntent {
    /// Forward held.
    pub forward: bool,
    /// Back held.
    pub back: bool,
    /// Left held.
    pub left: bool,
    /// Right held.
    pub right: bool,
    /// Sprint held.
    pub sprint: bool,
    /// Jump / ascend held.
    pub jump: bool,
    /// Dive held.
    pub dive: bool,
}

impl MoveIntent {
    /// Reads the movement controls from an input source.
    #[must_use]
    pub fn from_input<I: InputSource + ?Sized>(input: &I) -> Self {
        Self {
            forward: input.is_held(Control::Forward),
            back: input.is_held(Control::Back),
            left: input.is_held(Control::Left),
            right: input.is_held(Control::Right),
            sprint: input.is_held(Control::Sprint),
            jump: input.is_held(Control::Jump),
            dive: input.is_held(Control::Dive),
        }
    }

    /// Local-space direction as `(right, forward)`, unit length or zero.
    #[must_use]
    pub fn local_direction(&self) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        let right = axis(self.right, self.left);
        let forward = axis(self.forward, self.back);

        let len = (right * right + forward * forward).sqrt();
        if len == 0.0 {
            (0.0, 0.0)
        } else {
            (right / len, forward / len)
        }
    }
}

/// Speed factor in water: 1.0 when dry, `min_factor` when fully under,
/// linear in between.
#[inline]
#[must_use]
pub fn water_speed_factor(submersion: f32, min_factor: f32) -> f32 {
    1.0 - (1.0 - min_factor) * submersion.clamp(0.0, 1.0)
}

/// World-space horizontal velocity for this tick (y is always zero).
#[must_use]
pub fn horizontal_velocity(
    intent: &MoveIntent,
    yaw_degrees: f32,
    water: WaterState,
    config: &MovementConfig,
) -> Vec3 {
    let (right, forward) = intent.local_direction();
    if right == 0.0 && forward == 0.0 {
        return Vec3::ZERO;
    }

    let (sin_yaw, cos_yaw) = yaw_degrees.to_radians().sin_cos();

    let mut speed = config.base_speed;
    if intent.sprint {
        speed *= config.sprint_multiplier;
    }
    if water.in_water {
        speed *= water_speed_factor(water.submersion, config.min_water_speed_factor);
    }

    Vec3::new(
        (sin_yaw * forward + cos_yaw * right) * speed,
        0.0,
        (-cos_yaw * forward + sin_yaw * right) * speed,
    )
}

/// Vertical velocity to force this tick, if any.
///
/// In water, jump ascends and dive descends (jump wins if both are held).
/// On land, jump only fires from the ground.
#[must_use]
pub fn vertical_override(
    intent: &MoveIntent,
    grounded: bool,
    water: WaterState,
    config: &MovementConfig,
) -> Option<f32> {
    if water.in_water {
        if intent.jump {
            Some(config.ascend_speed)
        } else if intent.dive {
            Some(-config.descend_speed)
        } else {
            None
        }
    } else if intent.jump && grounded {
        Some(config.jump_velocity)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> MoveIntent {
        MoveIntent {
            forward: true,
            ..MoveIntent::default()
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_no_input_no_motion() {
        let v = horizontal_velocity(
            &MoveIntent::default(),
            37.0,
            WaterState::DRY,
            &MovementConfig::default(),
        );
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let intent = MoveIntent {
            forward: true,
            back: true,
            ..MoveIntent::default()
        };
        assert_eq!(intent.local_direction(), (0.0, 0.0));
    }

    #[test]
    fn test_yaw_zero_is_minus_z() {
        let config = MovementConfig::default();
        let v = horizontal_velocity(&forward(), 0.0, WaterState::DRY, &config);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.z, -config.base_speed));
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_yaw_ninety_rotates_and_keeps_speed() {
        let config = MovementConfig::default();
        let a = horizontal_velocity(&forward(), 0.0, WaterState::DRY, &config);
        let b = horizontal_velocity(&forward(), 90.0, WaterState::DRY, &config);
        assert!(approx(b.x, config.base_speed));
        assert!(approx(b.z, 0.0));
        assert!(approx(a.length(), b.length()));
        assert!(approx(a.dot(b), 0.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let config = MovementConfig::default();
        let intent = MoveIntent {
            forward: true,
            right: true,
            ..MoveIntent::default()
        };
        let v = horizontal_velocity(&intent, 12.0, WaterState::DRY, &config);
        assert!(approx(v.length(), config.base_speed));
    }

    #[test]
    fn test_sprint_multiplier() {
        let config = MovementConfig::default();
        let intent = MoveIntent {
            sprint: true,
            ..forward()
        };
        let v = horizontal_velocity(&intent, 0.0, WaterState::DRY, &config);
        assert!(approx(v.length(), config.base_speed * 1.5));
    }

    #[test]
    fn test_water_factor_endpoints_and_linearity() {
        assert!(approx(water_speed_factor(0.0, 0.5), 1.0));
        assert!(approx(water_speed_factor(1.0, 0.5), 0.5));
        assert!(approx(water_speed_factor(0.5, 0.5), 0.75));
        assert!(approx(water_speed_factor(0.25, 0.5), 0.875));
    }

    #[test]
    fn test_water_slows_walking() {
        let config = MovementConfig::default();
        let v = horizontal_velocity(&forward(), 0.0, WaterState::SUBMERGED, &config);
        assert!(approx(v.length(), config.base_speed * 0.5));
    }

    #[test]
    fn test_vertical_rules() {
        let config = MovementConfig::default();
        let jump = MoveIntent {
            jump: true,
            ..MoveIntent::default()
        };
        let dive = MoveIntent {
            dive: true,
            ..MoveIntent::default()
        };

        assert_eq!(
            vertical_override(&jump, true, WaterState::DRY, &config),
            Some(config.jump_velocity)
        );
        assert_eq!(vertical_override(&jump, false, WaterState::DRY, &config), None);
        assert_eq!(
            vertical_override(&jump, false, WaterState::SUBMERGED, &config),
            Some(config.ascend_speed)
        );
        assert_eq!(
            vertical_override(&dive, true, WaterState::SUBMERGED, &config),
            Some(-config.descend_speed)
        );
        assert_eq!(vertical_override(&dive, true, WaterState::DRY, &config), None);
    }
}
