//! # Quarry
//!
//! First-person character simulation for a voxel world.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        CharacterSim::tick                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  input ──> look ──> water ──> movement ──> physics ──> collision │
//! │                                                          │       │
//! │                                                          v       │
//! │                 events <── inventory <── interaction (raycast)   │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//!            │                         ^
//!            v                         │
//!     presentation             VoxelWorld + BlockTable
//! ```
//!
//! Everything runs on the caller's thread. The world, the input device
//! and presentation are collaborators behind [`VoxelWorld`],
//! [`InputSource`] and the [`events`] channel.
//!
//! ## Example
//!
//! ```rust
//! use quarry::{
//!     BlockKind, BlockPos, CharacterSim, EventBus, GridWorld, InputSnapshot, SimConfig, Vec3,
//! };
//!
//! let mut world = GridWorld::new();
//! world.fill(BlockPos::new(-4, 0, -4), BlockPos::new(4, 0, 4), BlockKind::Stone);
//!
//! let bus = EventBus::default();
//! let spawn = Vec3::new(0.5, 1.0, 0.5);
//! let mut sim = CharacterSim::new(SimConfig::default(), spawn, bus.sender())?;
//! sim.tick(&mut world, &InputSnapshot::new(), quarry::FIXED_DT);
//! assert!(sim.character().grounded);
//! # Ok::<(), quarry::ConfigError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod aabb;
pub mod blocks;
pub mod character;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod interaction;
pub mod movement;
pub mod physics;
pub mod simulation;
pub mod water;
pub mod world;

pub use quarry_items::{Equipment, EquipmentSlot, Inventory};
pub use quarry_shared::{BlockKind, BlockPos, Vec2, Vec3, FIXED_DT};

pub use blocks::{BlockProperties, BlockTable};
pub use character::{Character, Rotation};
pub use config::SimConfig;
pub use error::{ConfigError, ConfigResult};
pub use events::{CharacterEvent, EventBus, EventReceiver, EventSender};
pub use input::{Control, InputSnapshot, InputSource};
pub use interaction::{BreakState, RayHit};
pub use simulation::{CharacterSim, FixedStep};
pub use water::WaterState;
pub use world::{BlockQuery, GridWorld, VoxelWorld};
