//! Swarm controller: moves the enemy grid as one rigid block and picks
//! which enemy fires a volley.
//!
//! The block decision is atomic per invocation: either every enemy shifts
//! horizontally by the same step, or — when any enemy's prospective
//! position would cross a screen edge — the whole block descends one step
//! and the travel direction flips, with no horizontal motion that tick.

use rand::Rng;

use crate::entities::{Enemy, Faction, Projectile};

/// Block movement controller.  The direction sign is the only state and
/// persists across session resets.
#[derive(Debug)]
pub struct Swarm {
    /// +1 = rightward, -1 = leftward.
    direction: i32,
}

impl Default for Swarm {
    fn default() -> Self {
        Swarm { direction: 1 }
    }
}

impl Swarm {
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Advance the block by one step.
    ///
    /// The edge check runs against every enemy's *prospective* position
    /// before anything moves; the first offender decides descend-and-flip
    /// for the entire block.
    pub fn advance_block(&mut self, enemies: &mut [Enemy], screen_width: i32, screen_height: i32) {
        let step = screen_width / 30;

        let mut turn_around = false;
        for enemy in enemies.iter() {
            let next_left = enemy.bounds.left + step * self.direction;
            if next_left <= 0 || next_left + enemy.bounds.width() >= screen_width {
                turn_around = true;
                break;
            }
        }

        if turn_around {
            self.direction = -self.direction;
            let descent = screen_height / 25;
            for enemy in enemies.iter_mut() {
                enemy.translate(0, descent);
            }
        } else {
            for enemy in enemies.iter_mut() {
                enemy.translate(step * self.direction, 0);
            }
        }
    }

    /// Pick one enemy uniformly at random and spawn a downward projectile
    /// from the bottom-center of its bounds.  `None` when the swarm is
    /// empty.
    pub fn fire(
        &self,
        enemies: &[Enemy],
        screen_height: i32,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        if enemies.is_empty() {
            return None;
        }
        let shooter = &enemies[rng.gen_range(0..enemies.len())];
        let cx = shooter.bounds.center_x();
        let cy = shooter.bounds.bottom;
        let speed = screen_height / 100 * 2;
        Some(Projectile::new(cx, cy, speed, screen_height, Faction::Enemy))
    }
}
