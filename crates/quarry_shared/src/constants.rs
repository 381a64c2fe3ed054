//! # Simulation Constants
//!
//! Values baked into the binary. Anything a designer may want to tune
//! lives in the runtime config instead; these are the defaults it falls
//! back to.

// =============================================================================
// TIMING
// =============================================================================

/// Tick rate (simulation updates per second).
pub const TICK_RATE: u32 = 60;

/// Fixed tick length in seconds.
pub const FIXED_DT: f32 = 1.0 / TICK_RATE as f32;

// =============================================================================
// CHARACTER DIMENSIONS
// =============================================================================

/// Character hitbox height (blocks).
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Character hitbox width (blocks).
pub const PLAYER_WIDTH: f32 = 0.6;

/// Eye height above the feet (blocks). Always below `PLAYER_HEIGHT`.
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_below_top_of_head() {
        assert!(PLAYER_EYE_HEIGHT < PLAYER_HEIGHT);
        assert!(PLAYER_WIDTH > 0.0);
    }

    #[test]
    fn test_fixed_dt_matches_rate() {
        assert!((FIXED_DT * TICK_RATE as f32 - 1.0).abs() < 1e-6);
    }
}
