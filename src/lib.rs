//! Gapwing - a flappy-style gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio adapter (procedural music and effects)
//! - `persistence`: Best-score and preference storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// World dimensions (y grows downward, like the canvas)
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Bird defaults - x is fixed for the whole session, the world scrolls
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_WIDTH: f32 = 30.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// Gravity (units/tick² downward)
    pub const GRAVITY: f32 = 0.5;
    /// Flap impulse (units/tick, replaces current velocity outright)
    pub const LIFT: f32 = -7.0;

    /// Tilt is cosmetic only - never part of collision
    pub const TILT_FLAP_DEG: f32 = -20.0;
    pub const TILT_STEP_DEG: f32 = 2.0;
    pub const TILT_MAX_DEG: f32 = 60.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    /// Height of each pipe segment; the top segment ends at
    /// `offset + PIPE_SEGMENT_HEIGHT`, the bottom one starts a gap below
    pub const PIPE_SEGMENT_HEIGHT: f32 = 300.0;
    /// A new pipe spawns once the newest one is this far from the right edge
    pub const PIPE_SPACING: f32 = 220.0;
    /// Vertical offset range for spawned pipes, uniform in [min, max)
    pub const PIPE_OFFSET_MIN: i32 = -120;
    pub const PIPE_OFFSET_MAX: i32 = 60;
    /// Pipes are pruned once their trailing edge is this far off-screen
    pub const PIPE_PRUNE_X: f32 = -10.0;

    /// Coin defaults - one coin per pipe, slightly ahead of it
    pub const COIN_LEAD: f32 = 60.0;
    pub const COIN_RADIUS: f32 = 12.0;
    pub const COIN_BONUS: u32 = 5;
    /// Spin phase advance per tick (cosmetic squash animation)
    pub const COIN_SPIN_RATE: f32 = 0.1;
    pub const COIN_PRUNE_X: f32 = -20.0;

    /// Difficulty ramp
    pub const START_SCROLL_SPEED: f32 = 2.0;
    pub const START_GAP: f32 = 150.0;
    /// Ratchet once each time the score crosses a multiple of this
    pub const RATCHET_INTERVAL: u32 = 5;
    pub const SPEED_INCREMENT: f32 = 0.3;
    pub const GAP_DECREMENT: f32 = 5.0;
    /// Minimum playable gap - the ratchet never shrinks below this
    pub const MIN_GAP: f32 = 100.0;

    /// Countdown before the run starts
    pub const COUNTDOWN_START: u8 = 3;
    /// Ticks per countdown step (1 second at 60 Hz)
    pub const COUNTDOWN_STEP_TICKS: u32 = 60;
}
