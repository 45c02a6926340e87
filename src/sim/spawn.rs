//! Procedural pipe and coin spawning
//!
//! One pipe pair enters from the right whenever the field has room, each
//! with a randomized vertical offset and a snapshot of the current gap.
//! Coins are never spawned on their own - every coin belongs to a pipe.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Pipe};
use crate::consts::*;

/// Spawn the next pipe pair (and its coin) if none exists or the newest
/// one has scrolled past the spacing threshold. The offset is uniform in
/// `[PIPE_OFFSET_MIN, PIPE_OFFSET_MAX)`; the gap is the difficulty's
/// current value, frozen into the pipe.
pub fn maybe_spawn_pipe(state: &mut GameState) {
    let due = match state.pipes.last() {
        None => true,
        Some(newest) => newest.x < WORLD_WIDTH - PIPE_SPACING,
    };
    if !due {
        return;
    }

    let mut rng = state.next_spawn_rng();
    let offset = rng.random_range(PIPE_OFFSET_MIN..PIPE_OFFSET_MAX) as f32;
    let pipe = Pipe::new(WORLD_WIDTH, offset, state.difficulty.gap);

    // Coin rides slightly ahead of the pipe, centered in its gap
    let coin_pos = Vec2::new(WORLD_WIDTH + COIN_LEAD, pipe.gap_center_y());
    state.coins.push(Coin::new(coin_pos));

    log::debug!(
        "spawned pipe #{} offset={} gap={}",
        state.spawned_count(),
        offset,
        pipe.gap
    );
    state.pipes.push(pipe);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_when_field_empty() {
        let mut state = GameState::new(7, 0);
        maybe_spawn_pipe(&mut state);

        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.pipes[0].x, WORLD_WIDTH);
        assert_eq!(state.coins[0].pos.x, WORLD_WIDTH + COIN_LEAD);
    }

    #[test]
    fn test_waits_for_spacing() {
        let mut state = GameState::new(7, 0);
        maybe_spawn_pipe(&mut state);

        // Newest pipe still too close to the right edge
        state.pipes[0].x = WORLD_WIDTH - PIPE_SPACING;
        maybe_spawn_pipe(&mut state);
        assert_eq!(state.pipes.len(), 1);

        // One more unit of scroll and the next pipe is due
        state.pipes[0].x -= 1.0;
        maybe_spawn_pipe(&mut state);
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_offset_within_bounds() {
        for seed in 0..50u64 {
            let mut state = GameState::new(seed, 0);
            maybe_spawn_pipe(&mut state);
            let offset = state.pipes[0].offset;
            assert!(offset >= PIPE_OFFSET_MIN as f32);
            assert!(offset < PIPE_OFFSET_MAX as f32);
        }
    }

    #[test]
    fn test_gap_is_snapshot_of_current_difficulty() {
        let mut state = GameState::new(7, 0);
        maybe_spawn_pipe(&mut state);
        let first_gap = state.pipes[0].gap;
        assert_eq!(first_gap, START_GAP);

        // Shrink the global gap, then spawn another pipe
        state.difficulty.ratchet();
        state.pipes[0].x = 0.0;
        maybe_spawn_pipe(&mut state);

        // The old pipe keeps its spawn-time gap, the new one sees the ramp
        assert_eq!(state.pipes[0].gap, first_gap);
        assert_eq!(state.pipes[1].gap, START_GAP - GAP_DECREMENT);
    }

    #[test]
    fn test_coin_centered_in_its_pipes_gap() {
        let mut state = GameState::new(21, 0);
        maybe_spawn_pipe(&mut state);
        assert_eq!(state.coins[0].pos.y, state.pipes[0].gap_center_y());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = GameState::new(99, 0);
        let mut b = GameState::new(99, 0);
        for _ in 0..5 {
            a.pipes.clear();
            b.pipes.clear();
            maybe_spawn_pipe(&mut a);
            maybe_spawn_pipe(&mut b);
            assert_eq!(a.pipes[0].offset, b.pipes[0].offset);
        }
    }
}
