//! Fixed-cadence arcade simulation: a player ship defends against a
//! descending enemy block until the swarm is cleared (victory) or a
//! projectile/enemy reaches the ship (game over).
//!
//! The simulation core (`geom`, `entities`, `swarm`, `engine`) is free of
//! I/O; the loop driver (`runner`) pairs it with a pluggable renderer on a
//! dedicated ~60 Hz thread, and `display` is the terminal adapter.

pub mod display;
pub mod engine;
pub mod entities;
pub mod geom;
pub mod runner;
pub mod swarm;
