//! # Simulation Tick
//!
//! One call to [`CharacterSim::tick`] runs the whole per-tick pipeline on
//! the calling thread:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. LOOK        apply mouse delta to pitch / yaw              │
//! │ 2. WATER       sample submersion (physics depends on it)     │
//! │ 3. INTENT      horizontal velocity + vertical override       │
//! │ 4. PHYSICS     gravity, then buoyancy, then drag             │
//! │ 5. COLLISION   X, Y, Z against the world; zero blocked axes  │
//! │ 6. INTERACT    re-cast look ray, advance break, place        │
//! │ 7. EVENTS      notify presentation                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`FixedStep`] turns variable frame time into whole ticks.

use quarry_shared::{BlockKind, Vec3, FIXED_DT};

use crate::blocks::BlockTable;
use crate::character::Character;
use crate::collision;
use crate::config::SimConfig;
use crate::error::ConfigResult;
use crate::events::{CharacterEvent, EventSender};
use crate::input::{Control, HeldOnly, InputSource};
use crate::interaction::InteractionContext;
use crate::movement::{self, MoveIntent};
use crate::physics;
use crate::water;
use crate::world::{BlockQuery, VoxelWorld};

/// Longest frame the accumulator accepts before discarding the excess.
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Slack when counting whole ticks in the accumulator.
const STEP_TOLERANCE: f32 = 1e-6;

/// Converts variable frame time into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_frame: f32,
}

impl FixedStep {
    /// Creates an accumulator ticking every `step` seconds.
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_frame: MAX_FRAME_TIME,
        }
    }

    /// Tick length in seconds.
    #[inline]
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds a frame's elapsed time and returns how many ticks to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let mut dt = frame_dt.max(0.0);
        if dt > self.max_frame {
            tracing::warn!(
                frame_ms = frame_dt * 1000.0,
                max_ms = self.max_frame * 1000.0,
                "frame time clamped"
            );
            dt = self.max_frame;
        }

        self.accumulator += dt;
        let ticks = ((self.accumulator + STEP_TOLERANCE) / self.step).floor();
        self.accumulator = (self.accumulator - ticks * self.step).max(0.0);
        ticks as u32
    }

    /// Fraction of a tick left over, for render interpolation.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FIXED_DT)
    }
}

/// Drives one character against a world.
pub struct CharacterSim {
    config: SimConfig,
    blocks: BlockTable,
    character: Character,
    events: EventSender,
    ticks: u64,
}

impl CharacterSim {
    /// Validates `config`, builds the block table and spawns the character.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the config is out of range or the
    /// starting inventory does not fit.
    pub fn new(config: SimConfig, spawn: Vec3, events: EventSender) -> ConfigResult<Self> {
        let blocks = BlockTable::from_config(&config);
        Self::with_blocks(config, blocks, spawn, events)
    }

    /// Like [`CharacterSim::new`], with a caller-built block table.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the config is out of range or the
    /// starting inventory does not fit.
    pub fn with_blocks(
        config: SimConfig,
        blocks: BlockTable,
        spawn: Vec3,
        events: EventSender,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let character = Character::spawn(spawn, &config)?;
        tracing::debug!(position = ?spawn, "character spawned");

        Ok(Self {
            config,
            blocks,
            character,
            events,
            ticks: 0,
        })
    }

    /// The simulated character.
    #[inline]
    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// The simulated character, mutable.
    #[inline]
    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Active block table.
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    /// Ticks run so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs however many ticks `frame_dt` is worth.
    ///
    /// Presses and look movement go to the first tick only. A frame that
    /// yields no tick drops them.
    pub fn run_frame<W, I>(
        &mut self,
        stepper: &mut FixedStep,
        world: &mut W,
        input: &I,
        frame_dt: f32,
    ) -> u32
    where
        W: VoxelWorld + ?Sized,
        I: InputSource + ?Sized,
    {
        let ticks = stepper.advance(frame_dt);
        let dt = stepper.step();
        for i in 0..ticks {
            if i == 0 {
                self.tick(world, input, dt);
            } else {
                self.tick(world, &HeldOnly(input), dt);
            }
        }
        ticks
    }

    /// Advances the character by `dt` seconds.
    pub fn tick<W, I>(&mut self, world: &mut W, input: &I, dt: f32)
    where
        W: VoxelWorld + ?Sized,
        I: InputSource + ?Sized,
    {
        let c = &mut self.character;
        let cfg = &self.config;

        c.apply_look(input.look_delta(), &cfg.look);

        let was_grounded = c.grounded;
        let (was_in_water, stopped) = {
            let query = BlockQuery::new(&*world, &self.blocks);

            let was_in_water = c.water.in_water;
            c.water = water::sample(&query, c.position);
            c.head_submerged = water::head_submerged(&query, c.eye_position());

            let intent = MoveIntent::from_input(input);
            let horizontal =
                movement::horizontal_velocity(&intent, c.rotation.yaw, c.water, &cfg.movement);
            c.velocity.x = horizontal.x;
            c.velocity.z = horizontal.z;
            if let Some(vy) =
                movement::vertical_override(&intent, c.grounded, c.water, &cfg.movement)
            {
                c.velocity.y = vy;
            }

            c.velocity = physics::integrate(c.velocity, c.grounded, c.water, dt, &cfg.physics);

            let vertical = c.velocity.y;
            let candidate = c.position + c.velocity * dt;
            let res = collision::resolve(&query, c.position, candidate, &c.dims);
            c.position = res.position;
            c.velocity = res.correct_velocity(c.velocity);
            c.grounded = res.grounded;

            let eye = c.eye_position();
            let dir = c.look_direction();
            c.interaction_parts().0.retarget(&query, eye, dir, &cfg.interaction);

            let stopped = if res.landed && !was_grounded {
                Some(CharacterEvent::Landed {
                    impact_speed: -vertical,
                })
            } else if res.hit_ceiling {
                Some(CharacterEvent::HeadBumped {
                    impact_speed: vertical,
                })
            } else {
                None
            };
            (was_in_water, stopped)
        };

        if c.water.in_water != was_in_water {
            let event = if c.water.in_water {
                CharacterEvent::WaterEntered
            } else {
                CharacterEvent::WaterExited
            };
            tracing::trace!(?event, submersion = c.water.submersion, "water state changed");
            self.events.send(event);
        }
        if let Some(event) = stopped {
            self.events.send(event);
        }

        let feet = c.position;
        let dims = c.dims;
        let selected = c.selected;
        let (interactor, inventory) = c.interaction_parts();
        let mut ctx = InteractionContext {
            world,
            blocks: &self.blocks,
            inventory,
        };

        if let Some(broken) =
            interactor.advance_break(&mut ctx, input.is_held(Control::Break), dt, &cfg.interaction)
        {
            self.events.send(CharacterEvent::BlockBroken {
                pos: broken.pos,
                kind: broken.kind,
            });
            self.events.send(CharacterEvent::InventoryChanged {
                kind: broken.kind,
                quantity: broken.quantity,
            });
        }

        let mut depleted: Option<BlockKind> = None;
        if input.was_pressed(Control::Place) {
            match interactor.place(&mut ctx, selected, feet, &dims) {
                Ok(placed) => {
                    self.events.send(CharacterEvent::BlockPlaced {
                        pos: placed.pos,
                        kind: placed.kind,
                    });
                    self.events.send(CharacterEvent::InventoryChanged {
                        kind: placed.kind,
                        quantity: placed.quantity,
                    });
                    if placed.quantity == 0 {
                        depleted = Some(placed.kind);
                    }
                }
                Err(reason) => tracing::debug!(?reason, "place rejected"),
            }
        }

        if let Some(kind) = depleted {
            let next = c.select_next();
            tracing::debug!(?kind, ?next, "selected stack used up");
        }

        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_counts_whole_ticks() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(FIXED_DT * 0.5), 0);
        assert_eq!(step.advance(FIXED_DT * 0.5), 1);
        assert_eq!(step.advance(FIXED_DT * 3.0), 3);
        assert!(step.alpha() < 0.01);
    }

    #[test]
    fn test_fixed_step_clamps_long_frames() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(5.0), 6);
        assert!(step.alpha() < 0.01);
    }

    #[test]
    fn test_fixed_step_ignores_negative_time() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(-1.0), 0);
        assert_eq!(step.alpha(), 0.0);
    }

    #[test]
    fn test_alpha_tracks_remainder() {
        let mut step = FixedStep::new(0.1);
        assert_eq!(step.advance(0.05), 0);
        assert!((step.alpha() - 0.5).abs() < 1e-4);
    }
}
