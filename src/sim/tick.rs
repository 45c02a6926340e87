//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. One tick
//! corresponds to one 60 Hz display frame; all velocities are units/tick.
//! A tick returns the side effects it caused as `GameEvent`s - the driver
//! maps those onto the audio and persistence adapters.

use super::collision;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
///
/// Both flags are one-shot: the driver sets them from event callbacks and
/// clears them after the tick that consumed them, so input mutation is
/// serialized against the simulation even on a multi-threaded host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap impulse (tap/click/space)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Pause toggles only between Running and Paused; the countdown and
    // game-over phases ignore it
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // Don't tick if paused or over; Over is terminal - restarting builds
    // an entirely new GameState
    match state.phase {
        GamePhase::Paused | GamePhase::Over => return events,
        _ => {}
    }

    state.time_ticks += 1;

    // Countdown runs on the tick clock itself (one decrement per second),
    // with the world frozen underneath it
    if let GamePhase::CountingDown {
        remaining,
        ticks_to_next,
    } = state.phase
    {
        let ticks_to_next = ticks_to_next - 1;
        if ticks_to_next > 0 {
            state.phase = GamePhase::CountingDown {
                remaining,
                ticks_to_next,
            };
        } else {
            let remaining = remaining - 1;
            if remaining == 0 {
                state.phase = GamePhase::Running;
                events.push(GameEvent::CountdownFinished);
            } else {
                state.phase = GamePhase::CountingDown {
                    remaining,
                    ticks_to_next: COUNTDOWN_STEP_TICKS,
                };
                events.push(GameEvent::CountdownTicked(remaining));
            }
        }
        return events;
    }

    // --- Running ---

    // Bird physics first, then the world scrolls past it
    state.bird.advance(input.flap);
    if input.flap {
        events.push(GameEvent::Flapped);
    }
    if state.bird.out_of_bounds() {
        enter_game_over(state, &mut events);
        return events;
    }

    let speed = state.difficulty.scroll_speed;
    let bird_box = state.bird.aabb();
    let bird_x = state.bird.pos.x;

    let mut collided = false;
    for pipe in state.pipes.iter_mut() {
        pipe.x -= speed;

        if collision::bird_hits_pipe(&bird_box, pipe) {
            collided = true;
        }

        // Score the first tick the pipe is fully behind the bird. This is
        // a crossing test, not an equality test: a ratcheted scroll speed
        // can step the trailing edge straight over the bird's edge, and
        // the `passed` latch keeps it to exactly one score per pipe.
        if !pipe.passed && pipe.trailing_edge() <= bird_x {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::PipeCleared(state.score));

            if state.score % RATCHET_INTERVAL == 0 {
                state.difficulty.ratchet();
                events.push(GameEvent::DifficultyRamped {
                    scroll_speed: state.difficulty.scroll_speed,
                    gap: state.difficulty.gap,
                });
            }
        }
    }
    if collided {
        enter_game_over(state, &mut events);
        return events;
    }

    // Coins: translate, animate, collect
    for coin in state.coins.iter_mut() {
        coin.pos.x -= speed;
        coin.spin += COIN_SPIN_RATE;

        if !coin.collected && collision::bird_touches_coin(&bird_box, coin) {
            coin.collected = true;
            state.score += COIN_BONUS;
            events.push(GameEvent::CoinCollected(state.score));
        }
    }

    // Prune: collected coins leave within the tick, off-screen entries
    // once they are fully past the left edge
    state.pipes.retain(|p| p.trailing_edge() > PIPE_PRUNE_X);
    state.coins.retain(|c| !c.collected && c.pos.x > COIN_PRUNE_X);

    spawn::maybe_spawn_pipe(state);

    events
}

/// Terminal transition. The best-score comparison happens here exactly
/// once; persisting the new value is the driver's job (via the event).
fn enter_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Over;
    let new_best = state.score > state.best_score;
    if new_best {
        state.best_score = state.score;
    }
    events.push(GameEvent::GameOver {
        score: state.score,
        new_best,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bird, Coin, Difficulty, Pipe};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Tick through the full countdown so the state is Running
    fn run_countdown(state: &mut GameState) {
        let input = TickInput::default();
        for _ in 0..(COUNTDOWN_START as u32 * COUNTDOWN_STEP_TICKS) {
            tick(state, &input);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    /// A Running state with the spawner quiet (bird mid-screen, no pipes)
    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0);
        run_countdown(&mut state);
        state
    }

    #[test]
    fn test_countdown_cadence() {
        let mut state = GameState::new(1, 0);
        let input = TickInput::default();

        let mut seen = Vec::new();
        for _ in 0..(3 * COUNTDOWN_STEP_TICKS) {
            seen.extend(tick(&mut state, &input));
        }

        assert_eq!(
            seen,
            vec![
                GameEvent::CountdownTicked(2),
                GameEvent::CountdownTicked(1),
                GameEvent::CountdownFinished,
            ]
        );
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_world_frozen_during_countdown() {
        let mut state = GameState::new(1, 0);
        let y0 = state.bird.pos.y;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.pos.y, y0);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_first_running_tick_applies_gravity() {
        let mut state = running_state(1);
        let y0 = state.bird.pos.y;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.vel, GRAVITY);
        assert_eq!(state.bird.pos.y, y0 + GRAVITY);
    }

    #[test]
    fn test_flap_resets_velocity_exactly() {
        let mut state = running_state(1);
        state.bird.vel = 3.0;

        let events = tick(
            &mut state,
            &TickInput {
                flap: true,
                ..Default::default()
            },
        );
        assert_eq!(state.bird.vel, LIFT);
        assert!(events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_pause_ignored_during_countdown() {
        let mut state = GameState::new(1, 0);
        let events = tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert!(matches!(state.phase, GamePhase::CountingDown { .. }));
        assert!(events.is_empty());
    }

    #[test]
    fn test_pause_toggle_freezes_physics() {
        let mut state = running_state(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        let events = tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(events, vec![GameEvent::Paused]);

        // Frozen while paused
        let y = state.bird.pos.y;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.pos.y, y);

        // Toggle back resumes the same tick
        let events = tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(events[0], GameEvent::Resumed);
    }

    /// Pipe placed so the bird sits safely inside its gap
    fn pipe_around_bird(state: &GameState, x: f32) -> Pipe {
        let bird_mid = state.bird.pos.y + state.bird.size.y / 2.0;
        let gap = state.difficulty.gap;
        let offset = bird_mid - gap / 2.0 - PIPE_SEGMENT_HEIGHT;
        Pipe::new(x, offset, gap)
    }

    #[test]
    fn test_pass_scores_once_and_ratchets_at_threshold() {
        let mut state = running_state(1);
        state.score = 4;

        // Trailing edge just ahead of the bird's left edge
        let x = state.bird.pos.x - PIPE_WIDTH + state.difficulty.scroll_speed / 2.0;
        let pipe = pipe_around_bird(&state, x);
        state.pipes.push(pipe);

        let speed0 = state.difficulty.scroll_speed;
        let gap0 = state.difficulty.gap;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 5);
        assert!(events.contains(&GameEvent::PipeCleared(5)));
        assert!(events.contains(&GameEvent::DifficultyRamped {
            scroll_speed: speed0 + SPEED_INCREMENT,
            gap: gap0 - GAP_DECREMENT,
        }));

        // The same pipe never scores again
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 5);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PipeCleared(_))));
    }

    #[test]
    fn test_no_ratchet_off_threshold() {
        let mut state = running_state(1);
        state.score = 2;

        let x = state.bird.pos.x - PIPE_WIDTH + state.difficulty.scroll_speed / 2.0;
        let pipe = pipe_around_bird(&state, x);
        state.pipes.push(pipe);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 3);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::DifficultyRamped { .. }))
        );
        assert_eq!(state.difficulty, Difficulty::default());
    }

    #[test]
    fn test_collision_is_terminal() {
        let mut state = running_state(1);

        // Pipe squarely over the bird with no gap anywhere near it
        state
            .pipes
            .push(Pipe::new(state.bird.pos.x, -PIPE_SEGMENT_HEIGHT, 10.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 0,
                new_best: false,
            })
        );

        // Over is terminal: further ticks are no-ops with no events
        let y = state.bird.pos.y;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.bird.pos.y, y);
    }

    #[test]
    fn test_floor_is_fatal() {
        let mut state = running_state(1);
        state.bird.pos.y = WORLD_HEIGHT - state.bird.size.y;
        state.bird.vel = 1.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_best_score_updates_only_on_improvement() {
        let mut state = running_state(1);
        state.score = 7;
        state.best_score = 5;
        state.bird.pos.y = WORLD_HEIGHT; // force out of bounds

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::GameOver {
            score: 7,
            new_best: true,
        }));
        assert_eq!(state.best_score, 7);

        // Not beaten: best untouched, new_best false
        let mut state = running_state(2);
        state.score = 3;
        state.best_score = 5;
        state.bird.pos.y = WORLD_HEIGHT;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::GameOver {
            score: 3,
            new_best: false,
        }));
        assert_eq!(state.best_score, 5);
    }

    #[test]
    fn test_coin_collected_once_and_pruned() {
        let mut state = running_state(1);
        let center = state.bird.aabb().center();
        state.coins.push(Coin::new(center));

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::CoinCollected(COIN_BONUS)));
        assert_eq!(state.score, COIN_BONUS);

        // Pruned within the same tick, so it can never collide again
        assert!(state.coins.iter().all(|c| !c.collected));
        let events = tick(&mut state, &TickInput::default());
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::CoinCollected(_)))
        );
    }

    #[test]
    fn test_offscreen_entities_pruned() {
        let mut state = running_state(1);
        state.pipes.push(Pipe::new(PIPE_PRUNE_X - PIPE_WIDTH - 1.0, -60.0, 150.0));
        state
            .coins
            .push(Coin::new(Vec2::new(COIN_PRUNE_X - 1.0, 100.0)));

        tick(&mut state, &TickInput::default());
        assert!(state.pipes.iter().all(|p| p.trailing_edge() > PIPE_PRUNE_X));
        assert!(state.coins.iter().all(|c| c.pos.x > COIN_PRUNE_X));
    }

    #[test]
    fn test_spawner_runs_while_running() {
        let mut state = running_state(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.coins.len(), 1);
    }

    #[test]
    fn test_restart_is_a_fresh_session() {
        let mut state = running_state(1);
        state.score = 12;
        state.bird.pos.y = WORLD_HEIGHT;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);

        // Restart constructs a new value; nothing carries over but best
        let fresh = GameState::new(99, state.best_score);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.bird.vel, 0.0);
        assert_eq!(fresh.bird.pos, Bird::default().pos);
        assert!(fresh.pipes.is_empty());
        assert!(fresh.coins.is_empty());
        assert_eq!(fresh.phase, GamePhase::countdown());
        assert_eq!(fresh.best_score, 12);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(424242, 0);
        let mut b = GameState::new(424242, 0);

        // Flap on a fixed pattern for a few simulated seconds
        for i in 0..600u32 {
            let input = TickInput {
                flap: i % 23 == 0,
                ..Default::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.pipes.len(), b.pipes.len());
        assert_eq!(a.bird.pos.y, b.bird.pos.y);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        /// Without input, velocity is exactly the gravity constant times
        /// the number of elapsed Running ticks (until the bird bottoms out)
        #[test]
        fn prop_velocity_integrates_gravity(ticks in 1u32..40) {
            let mut state = running_state(3);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default());
            }
            if state.phase == GamePhase::Running {
                prop_assert_eq!(state.bird.vel, ticks as f32 * GRAVITY);
            }
        }

        /// Live pipes keep their spawn-time gap through any difficulty ramp
        #[test]
        fn prop_spawned_gap_is_immutable(ratchets in 1u32..50) {
            let mut state = running_state(5);
            tick(&mut state, &TickInput::default());
            let gap0 = state.pipes[0].gap;

            for _ in 0..ratchets {
                state.difficulty.ratchet();
            }
            tick(&mut state, &TickInput::default());

            prop_assert!(state.difficulty.gap >= MIN_GAP);
            if let Some(first) = state.pipes.first() {
                prop_assert_eq!(first.gap, gap0);
            }
        }
    }
}
