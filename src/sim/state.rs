//! Game state and core simulation types
//!
//! All per-session state lives here, owned by one `GameState` value. The
//! adapters (renderer, audio, persistence) only ever see it read-only or
//! through the events a tick returns.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-run countdown, decremented on a fixed 1-second cadence
    CountingDown { remaining: u8, ticks_to_next: u32 },
    /// Active gameplay
    Running,
    /// Game is paused (toggle only valid from Running)
    Paused,
    /// Run ended - terminal, restart builds a fresh `GameState`
    Over,
}

impl GamePhase {
    /// Initial countdown state
    pub fn countdown() -> Self {
        Self::CountingDown {
            remaining: COUNTDOWN_START,
            ticks_to_next: COUNTDOWN_STEP_TICKS,
        }
    }
}

/// The player-controlled bird
///
/// `pos.x` never changes after spawn - the world scrolls past, the bird
/// only moves vertically. `tilt` is cosmetic and excluded from collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (units/tick, positive is down)
    pub vel: f32,
    /// Visual tilt in degrees (negative is nose-up)
    pub tilt: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, WORLD_HEIGHT / 2.0),
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            vel: 0.0,
            tilt: 0.0,
        }
    }
}

impl Bird {
    /// Apply one tick of physics. A flap replaces the velocity outright
    /// (it does not add to the gravity increment); otherwise gravity
    /// accumulates and the nose drifts down toward the tilt cap.
    pub fn advance(&mut self, flapped: bool) {
        if flapped {
            self.vel = LIFT;
            self.tilt = TILT_FLAP_DEG;
        } else {
            self.vel += GRAVITY;
            if self.vel < 0.0 {
                self.tilt = TILT_FLAP_DEG;
            } else {
                self.tilt = (self.tilt + TILT_STEP_DEG).min(TILT_MAX_DEG);
            }
        }
        self.pos.y += self.vel;
    }

    /// Collision box (tilt ignored)
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Fatal bounds check: at or above the ceiling, or at or below the floor
    pub fn out_of_bounds(&self) -> bool {
        self.pos.y <= 0.0 || self.pos.y + self.size.y >= WORLD_HEIGHT
    }
}

/// A pipe pair: top and bottom segment separated by a gap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    /// Leading (left) edge, decreases by scroll speed each tick
    pub x: f32,
    /// Vertical offset drawn at spawn; the top segment ends at
    /// `offset + PIPE_SEGMENT_HEIGHT`
    pub offset: f32,
    /// Gap height captured from the difficulty at spawn time - fixed for
    /// the pipe's whole lifetime even if the global gap shrinks later
    pub gap: f32,
    /// Latch so a pipe scores exactly once
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, offset: f32, gap: f32) -> Self {
        Self {
            x,
            offset,
            gap,
            passed: false,
        }
    }

    /// Trailing (right) edge x coordinate
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Bottom edge of the top segment (top of the gap)
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.offset + PIPE_SEGMENT_HEIGHT
    }

    /// Top edge of the bottom segment (bottom of the gap)
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top() + self.gap
    }

    /// Vertical center of the gap (where the paired coin sits)
    #[inline]
    pub fn gap_center_y(&self) -> f32 {
        self.gap_top() + self.gap / 2.0
    }

    /// Collision box of the top segment - spans from the world top so a
    /// bird skimming the ceiling can't slip above the pipe
    pub fn top_box(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, 0.0),
            Vec2::new(self.trailing_edge(), self.gap_top()),
        )
    }

    /// Collision box of the bottom segment, spanning down to the floor
    pub fn bottom_box(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.trailing_edge(), WORLD_HEIGHT),
        )
    }
}

/// A bonus coin, paired 1:1 with a pipe at spawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Squash-animation phase, advances each tick (cosmetic)
    pub spin: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: COIN_RADIUS,
            spin: 0.0,
            collected: false,
        }
    }
}

/// Scroll speed and gap height, ratcheted as the score climbs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub scroll_speed: f32,
    pub gap: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            scroll_speed: START_SCROLL_SPEED,
            gap: START_GAP,
        }
    }
}

impl Difficulty {
    /// One ratchet step: faster scroll, tighter gap down to the floor.
    /// Only affects pipes spawned afterwards - live pipes keep their gap.
    pub fn ratchet(&mut self) {
        self.scroll_speed += SPEED_INCREMENT;
        self.gap = (self.gap - GAP_DECREMENT).max(MIN_GAP);
    }
}

/// One-shot side effects produced by a tick and executed by the adapters.
/// The sim itself never touches audio or storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Countdown stepped down to the given value
    CountdownTicked(u8),
    /// Countdown reached zero, the run is live
    CountdownFinished,
    /// Flap input was applied this tick
    Flapped,
    /// A pipe was passed; payload is the new score
    PipeCleared(u32),
    /// Difficulty ratcheted to these values
    DifficultyRamped { scroll_speed: f32, gap: f32 },
    /// A coin was collected; payload is the new score
    CoinCollected(u32),
    Paused,
    Resumed,
    /// Terminal. `new_best` is true when the score beat the stored best
    /// (checked exactly once, here).
    GameOver { score: u32, new_best: bool },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pipes spawned so far; indexes the per-spawn RNG stream
    spawned: u64,
    /// Current phase
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes, oldest (leftmost) first
    pub pipes: Vec<Pipe>,
    /// Live coins, oldest first
    pub coins: Vec<Coin>,
    /// Monotonic session score
    pub score: u32,
    /// Best score loaded at session start, refreshed at game over
    pub best_score: u32,
    pub difficulty: Difficulty,
}

impl GameState {
    /// Create a new session. `best_score` comes from the persistence
    /// adapter; the core never reads storage itself.
    pub fn new(seed: u64, best_score: u32) -> Self {
        Self {
            seed,
            time_ticks: 0,
            spawned: 0,
            phase: GamePhase::countdown(),
            bird: Bird::default(),
            pipes: Vec::new(),
            coins: Vec::new(),
            score: 0,
            best_score,
            difficulty: Difficulty::default(),
        }
    }

    /// Derive the RNG stream for the next pipe spawn. Each spawn gets its
    /// own stream keyed on (seed, spawn index) so a session replays
    /// identically from the seed alone.
    pub(crate) fn next_spawn_rng(&mut self) -> Pcg32 {
        let stream = self.spawned;
        self.spawned += 1;
        Pcg32::seed_from_u64(self.seed.wrapping_add(stream.wrapping_mul(2654435761)))
    }

    /// Number of pipes spawned over the whole session
    pub fn spawned_count(&self) -> u64 {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_gravity_accumulates() {
        let mut bird = Bird::default();
        let y0 = bird.pos.y;

        bird.advance(false);
        assert_eq!(bird.vel, GRAVITY);
        assert_eq!(bird.pos.y, y0 + GRAVITY);

        bird.advance(false);
        assert_eq!(bird.vel, 2.0 * GRAVITY);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut bird = Bird::default();
        bird.vel = 3.0;

        bird.advance(true);
        // Exactly the lift constant, not 3.0 + LIFT and not LIFT + GRAVITY
        assert_eq!(bird.vel, LIFT);
        assert_eq!(bird.tilt, TILT_FLAP_DEG);
    }

    #[test]
    fn test_tilt_caps_while_falling() {
        let mut bird = Bird::default();
        bird.tilt = TILT_MAX_DEG - 1.0;
        bird.vel = 5.0;

        bird.advance(false);
        bird.advance(false);
        assert_eq!(bird.tilt, TILT_MAX_DEG);
    }

    #[test]
    fn test_difficulty_ratchet_floors_gap() {
        let mut d = Difficulty::default();
        for _ in 0..100 {
            d.ratchet();
        }
        assert_eq!(d.gap, MIN_GAP);
        assert!(d.scroll_speed > START_SCROLL_SPEED);
    }

    #[test]
    fn test_pipe_geometry() {
        let pipe = Pipe::new(480.0, -60.0, 150.0);
        assert_eq!(pipe.gap_top(), 240.0);
        assert_eq!(pipe.gap_bottom(), 390.0);
        assert_eq!(pipe.gap_center_y(), 315.0);
        assert_eq!(pipe.trailing_edge(), 480.0 + PIPE_WIDTH);
    }

    #[test]
    fn test_spawn_rng_is_reproducible() {
        let mut a = GameState::new(42, 0);
        let mut b = GameState::new(42, 0);

        let xa: i32 = a.next_spawn_rng().random_range(PIPE_OFFSET_MIN..PIPE_OFFSET_MAX);
        let xb: i32 = b.next_spawn_rng().random_range(PIPE_OFFSET_MIN..PIPE_OFFSET_MAX);
        assert_eq!(xa, xb);
        assert_eq!(a.spawned_count(), 1);
    }
}
