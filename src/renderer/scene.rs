//! Per-frame scene assembly
//!
//! Turns a read-only `GameState` snapshot into a vertex list. Strictly a
//! consumer: nothing here feeds back into the simulation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::GameState;

/// Pipe rim lip, slightly wider than the pipe body
const RIM_HEIGHT: f32 = 14.0;
const RIM_OVERHANG: f32 = 3.0;

/// Build the frame's vertex list. `bg_offset` is the scrolling backdrop
/// phase in `(-WORLD_WIDTH, 0]`, owned by the render side - the sim knows
/// nothing about it.
pub fn build_frame(state: &GameState, bg_offset: f32) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(512);

    // Scrolling backdrop, two tiles wide so the wrap is seamless
    for tile in 0..2 {
        let x = bg_offset + tile as f32 * WORLD_WIDTH;
        for i in 0..3 {
            let hump = Vec2::new(x + 80.0 + i as f32 * 160.0, WORLD_HEIGHT - 40.0);
            v.extend(shapes::circle(hump, 60.0, colors::HILLS, 24));
        }
        v.extend(shapes::rect(
            Vec2::new(x, WORLD_HEIGHT - 40.0),
            Vec2::new(WORLD_WIDTH, 40.0),
            colors::GROUND,
        ));
    }

    for pipe in &state.pipes {
        // Top segment hangs from the ceiling down to the gap
        v.extend(shapes::rect(
            Vec2::new(pipe.x, 0.0),
            Vec2::new(PIPE_WIDTH, pipe.gap_top()),
            colors::PIPE,
        ));
        v.extend(shapes::rect(
            Vec2::new(pipe.x - RIM_OVERHANG, pipe.gap_top() - RIM_HEIGHT),
            Vec2::new(PIPE_WIDTH + 2.0 * RIM_OVERHANG, RIM_HEIGHT),
            colors::PIPE_RIM,
        ));

        // Bottom segment rises from the floor
        v.extend(shapes::rect(
            Vec2::new(pipe.x, pipe.gap_bottom()),
            Vec2::new(PIPE_WIDTH, WORLD_HEIGHT - pipe.gap_bottom()),
            colors::PIPE,
        ));
        v.extend(shapes::rect(
            Vec2::new(pipe.x - RIM_OVERHANG, pipe.gap_bottom()),
            Vec2::new(PIPE_WIDTH + 2.0 * RIM_OVERHANG, RIM_HEIGHT),
            colors::PIPE_RIM,
        ));
    }

    // Coins squash horizontally with their spin phase
    for coin in state.coins.iter().filter(|c| !c.collected) {
        let rx = (coin.radius * coin.spin.sin().abs()).max(1.5);
        v.extend(shapes::ellipse(
            coin.pos,
            rx,
            coin.radius,
            colors::COIN,
            24,
        ));
    }

    // Bird: body, wing, beak and eye all share the tilt rotation
    let bird = &state.bird;
    let center = bird.aabb().center();
    let tilt = bird.tilt.to_radians();
    let (sin, cos) = tilt.sin_cos();
    let spin = |offset: Vec2| {
        center
            + Vec2::new(
                offset.x * cos - offset.y * sin,
                offset.x * sin + offset.y * cos,
            )
    };

    v.extend(shapes::rotated_rect(
        center,
        bird.size,
        tilt,
        colors::BIRD_BODY,
    ));
    v.extend(shapes::rotated_rect(
        spin(Vec2::new(-4.0, 3.0)),
        Vec2::new(14.0, 10.0),
        tilt,
        colors::BIRD_WING,
    ));
    v.extend(shapes::rotated_rect(
        spin(Vec2::new(bird.size.x / 2.0, -2.0)),
        Vec2::new(10.0, 6.0),
        tilt,
        colors::BIRD_BEAK,
    ));
    v.extend(shapes::circle(
        spin(Vec2::new(8.0, -7.0)),
        3.0,
        colors::BIRD_EYE,
        12,
    ));

    v
}
