//! Collision tests between the bird, pipe segments, and coins
//!
//! All tests are edge-inclusive: a bounding box exactly touching a pipe
//! segment is a hit. The bird's tilt never participates.

use super::aabb::Aabb;
use super::state::{Coin, Pipe};

/// Bird-vs-pipe: overlap with either the top or the bottom segment is fatal
pub fn bird_hits_pipe(bird: &Aabb, pipe: &Pipe) -> bool {
    bird.overlaps(&pipe.top_box()) || bird.overlaps(&pipe.bottom_box())
}

/// Bird-vs-coin: circle against the bird's bounding box
pub fn bird_touches_coin(bird: &Aabb, coin: &Coin) -> bool {
    bird.overlaps_circle(coin.pos, coin.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Bird;
    use glam::Vec2;

    fn bird_at(y: f32) -> Bird {
        let mut bird = Bird::default();
        bird.pos.y = y;
        bird
    }

    #[test]
    fn test_bird_clears_gap() {
        // Gap spans [240, 390); bird fully inside it
        let pipe = Pipe::new(BIRD_X, -60.0, 150.0);
        let bird = bird_at(pipe.gap_center_y() - BIRD_HEIGHT / 2.0);
        assert!(!bird_hits_pipe(&bird.aabb(), &pipe));
    }

    #[test]
    fn test_bird_hits_top_segment() {
        let pipe = Pipe::new(BIRD_X, -60.0, 150.0);
        let bird = bird_at(pipe.gap_top() - BIRD_HEIGHT);
        assert!(bird_hits_pipe(&bird.aabb(), &pipe));
    }

    #[test]
    fn test_bird_hits_bottom_segment() {
        let pipe = Pipe::new(BIRD_X, -60.0, 150.0);
        let bird = bird_at(pipe.gap_bottom() - 1.0);
        assert!(bird_hits_pipe(&bird.aabb(), &pipe));
    }

    #[test]
    fn test_exact_touch_is_a_hit() {
        // Bird's top edge exactly on the top segment's bottom edge
        let pipe = Pipe::new(BIRD_X, -60.0, 150.0);
        let bird = bird_at(pipe.gap_top());
        assert!(bird_hits_pipe(&bird.aabb(), &pipe));

        // Bird's bottom edge exactly on the bottom segment's top edge
        let bird = bird_at(pipe.gap_bottom() - BIRD_HEIGHT);
        assert!(bird_hits_pipe(&bird.aabb(), &pipe));
    }

    #[test]
    fn test_no_hit_when_horizontally_clear() {
        let pipe = Pipe::new(WORLD_WIDTH, -60.0, 150.0);
        let bird = bird_at(10.0);
        assert!(!bird_hits_pipe(&bird.aabb(), &pipe));
    }

    #[test]
    fn test_coin_overlap() {
        let bird = Bird::default();
        let center = bird.aabb().center();

        let near = Coin::new(center + Vec2::new(BIRD_WIDTH / 2.0 + COIN_RADIUS, 0.0));
        assert!(bird_touches_coin(&bird.aabb(), &near));

        let far = Coin::new(center + Vec2::new(BIRD_WIDTH + 2.0 * COIN_RADIUS, 0.0));
        assert!(!bird_touches_coin(&bird.aabb(), &far));
    }
}
