//! Game entities: projectiles, enemies, the player ship, and the session
//! status.  Each entity owns a `Bounds` used for both position and
//! collision; movement logic beyond the entity's own motion (the swarm's
//! block decision, collision resolution) lives in `swarm` and `engine`.

use crate::geom::Bounds;

/// Projectile width in pixels.
const SHOT_WIDTH: i32 = 6;

/// Who fired a projectile.  Decides the travel direction at construction
/// time and nothing else afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

// ── Projectile ───────────────────────────────────────────────────────────────

/// A projectile in flight.  Player shots travel up (negative Y velocity),
/// enemy shots travel down (positive Y velocity).
#[derive(Clone, Debug)]
pub struct Projectile {
    pub bounds: Bounds,
    velocity_y: i32,
    screen_height: i32,
}

impl Projectile {
    /// Spawn from a muzzle point (cx, cy): the rectangle hangs from the
    /// muzzle, `screen_height / 25` tall and `SHOT_WIDTH` wide.
    pub fn new(cx: i32, cy: i32, speed: i32, screen_height: i32, faction: Faction) -> Self {
        let shot_height = screen_height / 25;
        let bounds = Bounds::new(
            cx - SHOT_WIDTH / 2,
            cy - shot_height,
            cx + SHOT_WIDTH / 2,
            cy,
        );
        let velocity_y = match faction {
            Faction::Player => -speed,
            Faction::Enemy => speed,
        };
        Projectile { bounds, velocity_y, screen_height }
    }

    /// Apply one tick's worth of travel.
    pub fn advance(&mut self) {
        self.bounds.offset(0, self.velocity_y);
    }

    /// True once the whole rectangle has left the screen, above or below.
    /// A projectile exactly at the boundary (bottom == 0) is still on.
    pub fn is_off_screen(&self) -> bool {
        self.bounds.bottom < 0 || self.bounds.top > self.screen_height
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// One invader.  Horizontal motion is driven in lockstep by the swarm
/// controller; the enemy itself only stores its bounding box.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub bounds: Bounds,
}

impl Enemy {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Enemy { bounds: Bounds::from_origin(x, y, width, height) }
    }

    /// Move by (dx, dy).  Called only by the swarm controller.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.bounds.offset(dx, dy);
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// The player ship.  Tracks the pointer horizontally at a bounded rate and
/// never leaves the screen.
#[derive(Clone, Debug)]
pub struct Player {
    pub bounds: Bounds,
    speed: i32,
}

impl Player {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        // Tracking speed proportional to the ship's width.
        Player {
            bounds: Bounds::from_origin(x, y, width, height),
            speed: width / 3,
        }
    }

    /// Step one speed-increment toward `target_x` (pointer position), then
    /// clamp inside `[0, screen_width]`.  Targets closer than one increment
    /// leave the ship in place, so a resting pointer causes no jitter.
    pub fn seek(&mut self, target_x: i32, screen_width: i32) {
        let cx = self.bounds.center_x();
        if (target_x - cx).abs() > self.speed {
            if target_x < cx {
                self.bounds.offset(-self.speed, 0);
            } else {
                self.bounds.offset(self.speed, 0);
            }
        }

        if self.bounds.left < 0 {
            self.bounds.offset_to(0, self.bounds.top);
        }
        if self.bounds.right > screen_width {
            self.bounds.offset_to(screen_width - self.bounds.width(), self.bounds.top);
        }
    }

    /// Where player shots spawn: top-center of the ship.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.bounds.center_x(), self.bounds.top)
    }
}
