//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick units only (one tick per display frame)
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies - side effects leave
//!   as `GameEvent`s for the adapters to execute

pub mod aabb;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{bird_hits_pipe, bird_touches_coin};
pub use spawn::maybe_spawn_pipe;
pub use state::{Bird, Coin, Difficulty, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, tick};
