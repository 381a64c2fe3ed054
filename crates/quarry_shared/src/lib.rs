//! # Quarry Shared
//!
//! Common types used by the item stores and the character simulation.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a renderer, a window system or a
//! network stack. If you need those, you are in the wrong crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod block;
pub mod constants;
pub mod math;

pub use block::BlockKind;
pub use constants::{FIXED_DT, PLAYER_EYE_HEIGHT, PLAYER_HEIGHT, PLAYER_WIDTH, TICK_RATE};
pub use math::{BlockPos, Vec2, Vec3};
