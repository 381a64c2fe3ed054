//! # Simulation Configuration
//!
//! Tuning values for the character, loaded once at startup from TOML.
//! Every field has a default, so an empty file is a valid config.
//!
//! ```toml
//! [movement]
//! base_speed = 4.3
//!
//! [physics]
//! buoyancy = 11.0
//!
//! [inventory]
//! capacity = 36
//! starting = [{ kind = "dirt", count = 32 }]
//!
//! [blocks.stone]
//! hardness = 1.5
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use quarry_shared::{BlockKind, PLAYER_EYE_HEIGHT, PLAYER_HEIGHT, PLAYER_WIDTH};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Longest accepted look-ray reach (blocks).
pub const MAX_REACH: f32 = 64.0;

/// Shortest accepted ray-march step (blocks).
pub const MIN_RAY_STEP: f32 = 0.001;

/// Character hitbox. Feet origin, bottom-center of the box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    /// Total height.
    pub height: f32,
    /// Width (and depth) of the square footprint.
    pub width: f32,
    /// Eye height above the feet. Must be below `height`.
    pub eye_height: f32,
}

impl Dimensions {
    /// Half the footprint width.
    #[inline]
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            height: PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            eye_height: PLAYER_EYE_HEIGHT,
        }
    }
}

/// Horizontal speed and vertical impulses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed (blocks per second).
    pub base_speed: f32,
    /// Sprint multiplier.
    pub sprint_multiplier: f32,
    /// Speed factor when fully submerged. Interpolates to 1.0 when dry.
    pub min_water_speed_factor: f32,
    /// Upward velocity set by a grounded jump on land.
    pub jump_velocity: f32,
    /// Upward velocity while the jump control is held in water.
    pub ascend_speed: f32,
    /// Downward speed while the dive control is held in water.
    pub descend_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 4.3,
            sprint_multiplier: 1.5,
            min_water_speed_factor: 0.5,
            jump_velocity: 8.0,
            ascend_speed: 3.0,
            descend_speed: 3.0,
        }
    }
}

/// Gravity, buoyancy and drag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (blocks per second squared).
    pub gravity: f32,
    /// Gravity scale while in water.
    pub water_gravity_multiplier: f32,
    /// Buoyant acceleration at full submersion.
    pub buoyancy: f32,
    /// Per-tick velocity scale in water. Below 1.
    pub water_drag: f32,
    /// Maximum falling speed (blocks per second).
    pub terminal_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            water_gravity_multiplier: 0.3,
            buoyancy: 11.0,
            water_drag: 0.9,
            terminal_velocity: 50.0,
        }
    }
}

/// Reach and break timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum ray length from the eye (blocks).
    pub reach: f32,
    /// Ray march increment (blocks).
    pub ray_step: f32,
    /// Seconds of held input to break one block.
    pub break_time: f32,
    /// Multiply `break_time` by the target's hardness.
    pub scale_break_by_hardness: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reach: 5.0,
            ray_step: 0.05,
            break_time: 1.0,
            scale_break_by_hardness: false,
        }
    }
}

/// Mouse look.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees per unit of look delta.
    pub sensitivity: f32,
    /// Pitch limit in degrees, either direction.
    pub max_pitch: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.15,
            max_pitch: 89.0,
        }
    }
}

/// One starting inventory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingStack {
    /// Item kind.
    pub kind: BlockKind,
    /// Quantity.
    pub count: u32,
}

/// Inventory sizing and spawn contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Maximum distinct kinds.
    pub capacity: usize,
    /// Quantities granted at spawn.
    pub starting: Vec<StartingStack>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: quarry_items::DEFAULT_INVENTORY_CAPACITY,
            starting: vec![
                StartingStack { kind: BlockKind::Dirt, count: 32 },
                StartingStack { kind: BlockKind::Cobblestone, count: 32 },
                StartingStack { kind: BlockKind::Planks, count: 16 },
                StartingStack { kind: BlockKind::Glass, count: 8 },
            ],
        }
    }
}

/// Per-kind override of the standard block table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockOverride {
    /// Replacement hardness.
    pub hardness: Option<f32>,
    /// Replacement solidity.
    pub solid: Option<bool>,
    /// Replacement transparency.
    pub transparent: Option<bool>,
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Character hitbox.
    pub dimensions: Dimensions,
    /// Movement tuning.
    pub movement: MovementConfig,
    /// Physics tuning.
    pub physics: PhysicsConfig,
    /// Block interaction tuning.
    pub interaction: InteractionConfig,
    /// Mouse look.
    pub look: LookConfig,
    /// Inventory sizing and spawn contents.
    pub inventory: InventoryConfig,
    /// Block table overrides keyed by kind.
    pub blocks: BTreeMap<BlockKind, BlockOverride>,
}

impl SimConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`SimConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let d = &self.dimensions;
        require(d.height > 0.0, "dimensions.height must be positive")?;
        require(d.width > 0.0, "dimensions.width must be positive")?;
        require(
            d.eye_height > 0.0 && d.eye_height < d.height,
            "dimensions.eye_height must be inside (0, height)",
        )?;

        let m = &self.movement;
        require(m.base_speed >= 0.0, "movement.base_speed must not be negative")?;
        require(m.sprint_multiplier >= 1.0, "movement.sprint_multiplier must be at least 1")?;
        require(
            m.min_water_speed_factor > 0.0 && m.min_water_speed_factor <= 1.0,
            "movement.min_water_speed_factor must be inside (0, 1]",
        )?;
        require(m.jump_velocity >= 0.0, "movement.jump_velocity must not be negative")?;
        require(m.ascend_speed >= 0.0, "movement.ascend_speed must not be negative")?;
        require(m.descend_speed >= 0.0, "movement.descend_speed must not be negative")?;

        let p = &self.physics;
        require(p.gravity >= 0.0, "physics.gravity must not be negative")?;
        require(
            p.water_gravity_multiplier > 0.0 && p.water_gravity_multiplier <= 1.0,
            "physics.water_gravity_multiplier must be inside (0, 1]",
        )?;
        require(p.buoyancy >= 0.0, "physics.buoyancy must not be negative")?;
        require(
            p.water_drag > 0.0 && p.water_drag < 1.0,
            "physics.water_drag must be inside (0, 1)",
        )?;
        require(p.terminal_velocity > 0.0, "physics.terminal_velocity must be positive")?;

        let i = &self.interaction;
        require(
            i.reach > 0.0 && i.reach <= MAX_REACH,
            "interaction.reach must be inside (0, 64]",
        )?;
        require(
            i.ray_step >= MIN_RAY_STEP && i.ray_step < 1.0,
            "interaction.ray_step must be inside [0.001, 1)",
        )?;
        require(i.break_time >= 0.0, "interaction.break_time must not be negative")?;

        let l = &self.look;
        require(l.sensitivity > 0.0, "look.sensitivity must be positive")?;
        require(
            l.max_pitch > 0.0 && l.max_pitch < 90.0,
            "look.max_pitch must be inside (0, 90)",
        )?;

        let inv = &self.inventory;
        let mut kinds: Vec<BlockKind> = inv.starting.iter().map(|s| s.kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        require(
            kinds.len() <= inv.capacity,
            "inventory.starting holds more distinct kinds than inventory.capacity",
        )?;
        require(
            inv.starting.iter().all(|s| s.count > 0),
            "inventory.starting counts must be positive",
        )?;

        Ok(())
    }
}

fn require(condition: bool, message: &str) -> ConfigResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let config = SimConfig::from_toml_str(include_str!("../config/default.toml")).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [movement]
            base_speed = 6.0

            [blocks.stone]
            hardness = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.movement.base_speed, 6.0);
        assert_eq!(config.movement.sprint_multiplier, 1.5);
        assert_eq!(config.blocks[&BlockKind::Stone].hardness, Some(4.0));
        assert_eq!(config.blocks[&BlockKind::Stone].solid, None);
    }

    #[test]
    fn test_starting_inventory_parses() {
        let config = SimConfig::from_toml_str(
            r#"
            [inventory]
            capacity = 2
            starting = [{ kind = "sand", count = 4 }]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.inventory.starting,
            vec![StartingStack { kind: BlockKind::Sand, count: 4 }]
        );
    }

    #[test]
    fn test_eye_above_head_rejected() {
        let err = SimConfig::from_toml_str(
            r#"
            [dimensions]
            height = 1.8
            eye_height = 2.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_drag_must_damp() {
        let mut config = SimConfig::default();
        config.physics.water_drag = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_starting_over_capacity_rejected() {
        let mut config = SimConfig::default();
        config.inventory.capacity = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ray_march_is_bounded() {
        let mut config = SimConfig::default();
        config.interaction.reach = 1.0e9;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.interaction.ray_step = 1.0e-7;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.interaction.reach = MAX_REACH;
        config.interaction.ray_step = MIN_RAY_STEP;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = SimConfig::from_toml_str("[movement\nbase_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
