//! # Character State
//!
//! Everything the simulation owns about one first-person character: body,
//! view, water flags, break progress and the item stores.
//!
//! ## Look convention
//!
//! Angles are degrees. Yaw 0 looks along -Z, yaw 90 along +X. Positive
//! pitch looks up.

use quarry_items::{Equipment, Inventory};
use quarry_shared::{BlockKind, Vec2, Vec3};
use serde::Serialize;

use crate::aabb::Aabb;
use crate::config::{Dimensions, LookConfig, SimConfig};
use crate::error::ConfigResult;
use crate::interaction::{BreakState, Interactor};
use crate::water::WaterState;

/// View orientation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rotation {
    /// Up/down, clamped to the configured limit.
    pub pitch: f32,
    /// Left/right, kept in `[0, 360)`.
    pub yaw: f32,
}

impl Rotation {
    /// Creates a rotation.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Unit vector the view points along.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Applies a mouse delta. Moving the mouse up (negative y) looks up.
    pub fn apply(&mut self, delta: Vec2, config: &LookConfig) {
        self.yaw = (self.yaw + delta.x * config.sensitivity).rem_euclid(360.0);
        self.pitch =
            (self.pitch - delta.y * config.sensitivity).clamp(-config.max_pitch, config.max_pitch);
    }
}

/// A simulated character.
#[derive(Clone, Debug)]
pub struct Character {
    /// Feet position (bottom center of the box).
    pub position: Vec3,
    /// Velocity in blocks per second.
    pub velocity: Vec3,
    /// View orientation.
    pub rotation: Rotation,
    /// Hitbox.
    pub dims: Dimensions,
    /// Standing on a solid cell.
    pub grounded: bool,
    /// Last water sample.
    pub water: WaterState,
    /// The eye is inside a liquid cell.
    pub head_submerged: bool,
    /// Kind placed by the place control.
    pub selected: Option<BlockKind>,
    interactor: Interactor,
    inventory: Inventory<BlockKind>,
    equipment: Equipment<BlockKind>,
}

impl Character {
    /// Spawns a character at `position` with the configured starting items.
    ///
    /// The first starting stack is selected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StartingInventory` if the starting items do not
    /// fit the inventory capacity or contain a zero count.
    pub fn spawn(position: Vec3, config: &SimConfig) -> ConfigResult<Self> {
        let inventory = Inventory::with_contents(
            config.inventory.capacity,
            config.inventory.starting.iter().map(|s| (s.kind, s.count)),
        )?;
        let selected = inventory.kinds().next();

        Ok(Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Rotation::default(),
            dims: config.dimensions,
            grounded: false,
            water: WaterState::DRY,
            head_submerged: false,
            selected,
            interactor: Interactor::new(),
            inventory,
            equipment: Equipment::new(),
        })
    }

    /// Eye position in world space.
    #[inline]
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.dims.eye_height, 0.0)
    }

    /// Current hitbox.
    #[inline]
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_feet(self.position, &self.dims)
    }

    /// Unit look vector.
    #[inline]
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        self.rotation.direction()
    }

    /// Turns the view by a mouse delta.
    pub fn apply_look(&mut self, delta: Vec2, config: &LookConfig) {
        self.rotation.apply(delta, config);
    }

    /// Selects the next held kind, wrapping around.
    pub fn select_next(&mut self) -> Option<BlockKind> {
        self.cycle_selection(false)
    }

    /// Selects the previous held kind, wrapping around.
    pub fn select_previous(&mut self) -> Option<BlockKind> {
        self.cycle_selection(true)
    }

    fn cycle_selection(&mut self, backwards: bool) -> Option<BlockKind> {
        let kinds: Vec<BlockKind> = self.inventory.kinds().collect();
        if kinds.is_empty() {
            self.selected = None;
            return None;
        }

        let next = match self.selected.and_then(|s| kinds.iter().position(|k| *k == s)) {
            Some(i) if backwards => (i + kinds.len() - 1) % kinds.len(),
            Some(i) => (i + 1) % kinds.len(),
            None if backwards => kinds.len() - 1,
            None => 0,
        };
        self.selected = Some(kinds[next]);
        self.selected
    }

    /// Break progress for presentation.
    #[inline]
    #[must_use]
    pub fn break_state(&self) -> BreakState {
        self.interactor.break_state()
    }

    /// Targeting state.
    #[inline]
    #[must_use]
    pub fn interactor(&self) -> &Interactor {
        &self.interactor
    }

    /// Items carried.
    #[inline]
    #[must_use]
    pub fn inventory(&self) -> &Inventory<BlockKind> {
        &self.inventory
    }

    /// Items carried, mutable.
    #[inline]
    pub fn inventory_mut(&mut self) -> &mut Inventory<BlockKind> {
        &mut self.inventory
    }

    /// Worn and held items.
    #[inline]
    #[must_use]
    pub fn equipment(&self) -> &Equipment<BlockKind> {
        &self.equipment
    }

    /// Worn and held items, mutable.
    #[inline]
    pub fn equipment_mut(&mut self) -> &mut Equipment<BlockKind> {
        &mut self.equipment
    }

    /// Splits the borrow for the interaction phase.
    pub(crate) fn interaction_parts(&mut self) -> (&mut Interactor, &mut Inventory<BlockKind>) {
        (&mut self.interactor, &mut self.inventory)
    }
}
