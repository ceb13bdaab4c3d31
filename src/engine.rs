//! Simulation engine: owns every entity collection and advances the whole
//! session one fixed tick at a time.
//!
//! `update` consumes the current instant and pointer position, mutates the
//! collections in place, and evaluates the terminal conditions in a fixed
//! order.  Time and randomness are injected by the caller so tests can
//! drive both deterministically.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::entities::{Enemy, Faction, GameStatus, Player, Projectile};
use crate::swarm::Swarm;

pub const ENEMY_ROWS: i32 = 4;
pub const ENEMY_COLS: i32 = 7;

/// Points per enemy destroyed.
const SCORE_PER_KILL: u32 = 10;

/// Minimum time between block movements.
const BLOCK_MOVE_INTERVAL: Duration = Duration::from_millis(600);

/// Minimum time between enemy volleys.
const VOLLEY_INTERVAL: Duration = Duration::from_millis(1200);

/// The entire mutable session state, advanced by [`GameState::update`].
#[derive(Debug)]
pub struct GameState {
    pub width: i32,
    pub height: i32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub score: u32,
    pub status: GameStatus,
    swarm: Swarm,
    last_block_move: Instant,
    last_volley: Instant,
}

impl GameState {
    /// Build a fresh session for the given screen dimensions, with both
    /// rate-limit timers anchored at `now`.
    pub fn new(width: i32, height: i32, now: Instant) -> Self {
        let mut state = GameState {
            width,
            height,
            player: Player::new(0, 0, 1, 1), // replaced by reset
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            score: 0,
            status: GameStatus::Playing,
            swarm: Swarm::default(),
            last_block_move: now,
            last_volley: now,
        };
        state.reset(now);
        state
    }

    /// Reinitialize in place: rebuild the player and the enemy grid, clear
    /// both projectile collections, zero the score, return to `Playing`,
    /// and anchor both timers at `now`.  The swarm's travel direction
    /// persists across resets.
    pub fn reset(&mut self, now: Instant) {
        let player_size = self.width / 12;
        self.player = Player::new(
            self.width / 2 - player_size / 2,
            self.height - player_size * 2,
            player_size,
            player_size * 2,
        );

        self.player_shots.clear();
        self.enemy_shots.clear();

        // Enemy grid, centered horizontally, hanging from the top 8% line.
        self.enemies.clear();
        let enemy_size = self.width / (ENEMY_COLS + 4);
        let pitch_x = enemy_size + enemy_size / 3;
        let pitch_y = enemy_size + enemy_size / 4;
        let offset_x = (self.width - ENEMY_COLS * pitch_x) / 2;
        let offset_y = (self.height as f32 * 0.08) as i32;
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMY_COLS {
                self.enemies.push(Enemy::new(
                    offset_x + col * pitch_x,
                    offset_y + row * pitch_y,
                    enemy_size,
                    enemy_size,
                ));
            }
        }

        self.score = 0;
        self.status = GameStatus::Playing;
        self.last_block_move = now;
        self.last_volley = now;
        log::debug!("session reset: {} enemies", self.enemies.len());
    }

    /// Spawn a player projectile from the ship's muzzle.  Ignored outside
    /// of `Playing`.
    pub fn fire_player_shot(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        let (cx, cy) = self.player.muzzle();
        let speed = self.height / 100 * 3;
        self.player_shots
            .push(Projectile::new(cx, cy, speed, self.height, Faction::Player));
    }

    /// Advance the simulation by one tick.
    ///
    /// `pointer` is the tracked pointer X, `None` while not touching.
    /// Does nothing once a terminal status holds.
    pub fn update(&mut self, now: Instant, pointer: Option<i32>, rng: &mut impl Rng) {
        if self.status != GameStatus::Playing {
            return;
        }

        // 1. Track the pointer.
        if let Some(target_x) = pointer {
            self.player.seek(target_x, self.width);
        }

        // 2./3. Advance projectiles, prune the ones that left the screen.
        for shot in &mut self.player_shots {
            shot.advance();
        }
        self.player_shots.retain(|shot| !shot.is_off_screen());
        for shot in &mut self.enemy_shots {
            shot.advance();
        }
        self.enemy_shots.retain(|shot| !shot.is_off_screen());

        // 4. Block movement on its own cadence.
        if now.duration_since(self.last_block_move) > BLOCK_MOVE_INTERVAL {
            self.last_block_move = now;
            self.swarm
                .advance_block(&mut self.enemies, self.width, self.height);
        }

        // 5. Enemy volley on its own cadence.
        if now.duration_since(self.last_volley) > VOLLEY_INTERVAL {
            if let Some(shot) = self.swarm.fire(&self.enemies, self.height, rng) {
                self.last_volley = now;
                self.enemy_shots.push(shot);
            }
        }

        // 6. Player shots vs enemies: each shot destroys at most the first
        // enemy it overlaps, then both are removed.
        let mut si = 0;
        'shots: while si < self.player_shots.len() {
            for ei in 0..self.enemies.len() {
                if self.player_shots[si]
                    .bounds
                    .intersects(&self.enemies[ei].bounds)
                {
                    self.player_shots.remove(si);
                    self.enemies.remove(ei);
                    self.score += SCORE_PER_KILL;
                    continue 'shots;
                }
            }
            si += 1;
        }

        // 7. Enemy shots vs player: any hit ends the session and the tick.
        for shot in &self.enemy_shots {
            if shot.bounds.intersects(&self.player.bounds) {
                self.status = GameStatus::GameOver;
                log::info!("game over: player hit, score {}", self.score);
                return;
            }
        }

        // 8. Invasion: an enemy reaching the player's row ends the session.
        for enemy in &self.enemies {
            if enemy.bounds.bottom >= self.player.bounds.top {
                self.status = GameStatus::GameOver;
                log::info!("game over: swarm invaded, score {}", self.score);
                return;
            }
        }

        // 9. Victory once the swarm is cleared.
        if self.enemies.is_empty() {
            self.status = GameStatus::Victory;
            log::info!("victory, score {}", self.score);
        }
    }
}
