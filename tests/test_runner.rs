use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use swarm_defense::engine::GameState;
use swarm_defense::entities::GameStatus;
use swarm_defense::runner::{GameLoop, Renderer, Session};

const SCREEN_W: i32 = 600;
const SCREEN_H: i32 = 600;

/// Test renderer: counts frames and can simulate an unavailable target.
struct Probe {
    frames: Arc<AtomicUsize>,
    available: Arc<AtomicBool>,
}

impl Renderer for Probe {
    fn ready(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn draw(&mut self, _state: &GameState) -> std::io::Result<()> {
        self.frames.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

fn probe_loop() -> (GameLoop, Arc<Session>, Arc<AtomicUsize>, Arc<AtomicBool>) {
    let frames = Arc::new(AtomicUsize::new(0));
    let available = Arc::new(AtomicBool::new(true));
    let probe = Probe {
        frames: Arc::clone(&frames),
        available: Arc::clone(&available),
    };
    let session = Arc::new(Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now())));
    let game_loop = GameLoop::new(Arc::clone(&session), Box::new(probe));
    (game_loop, session, frames, available)
}

// ── Loop lifecycle ───────────────────────────────────────────────────────────

#[test]
fn loop_renders_frames_while_running() {
    let (mut game_loop, session, frames, _) = probe_loop();
    game_loop.start();
    assert!(session.is_running());
    thread::sleep(Duration::from_millis(120));
    game_loop.stop();
    assert!(!session.is_running());
    assert!(frames.load(Ordering::Relaxed) > 0);
}

#[test]
fn stop_joins_before_returning() {
    let (mut game_loop, _, frames, _) = probe_loop();
    game_loop.start();
    thread::sleep(Duration::from_millis(80));
    game_loop.stop();
    // No frames may be produced once stop has returned
    let after_stop = frames.load(Ordering::Relaxed);
    thread::sleep(Duration::from_millis(80));
    assert_eq!(frames.load(Ordering::Relaxed), after_stop);
}

#[test]
fn start_and_stop_are_idempotent() {
    let (mut game_loop, _, frames, _) = probe_loop();
    game_loop.stop(); // stop before start is a no-op
    game_loop.start();
    game_loop.start(); // second start is a no-op
    thread::sleep(Duration::from_millis(60));
    game_loop.stop();
    game_loop.stop();
    assert!(frames.load(Ordering::Relaxed) > 0);
}

#[test]
fn loop_restarts_after_stop() {
    let (mut game_loop, _, frames, _) = probe_loop();
    game_loop.start();
    thread::sleep(Duration::from_millis(60));
    game_loop.stop();
    let first_run = frames.load(Ordering::Relaxed);

    game_loop.start();
    thread::sleep(Duration::from_millis(60));
    game_loop.stop();
    assert!(frames.load(Ordering::Relaxed) > first_run);
}

#[test]
fn unavailable_target_skips_iterations() {
    let (mut game_loop, _, frames, available) = probe_loop();
    available.store(false, Ordering::Relaxed);
    game_loop.start();
    thread::sleep(Duration::from_millis(60));
    // Busy-polling, never drawing
    assert_eq!(frames.load(Ordering::Relaxed), 0);

    // Target comes back: frames resume
    available.store(true, Ordering::Relaxed);
    thread::sleep(Duration::from_millis(60));
    game_loop.stop();
    assert!(frames.load(Ordering::Relaxed) > 0);
}

#[test]
fn lock_state_survives_a_panicked_holder() {
    let session = Arc::new(Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now())));
    let holder = Arc::clone(&session);
    let result = thread::spawn(move || {
        let _state = holder.lock_state();
        panic!("tick went wrong while holding the lock");
    })
    .join();
    assert!(result.is_err());

    // The poisoned lock is absorbed; the session stays usable
    let state = session.lock_state();
    assert_eq!(state.status, GameStatus::Playing);
}

// ── Pointer events ───────────────────────────────────────────────────────────

#[test]
fn pointer_tracking_lifecycle() {
    let session = Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now()));
    assert_eq!(session.pointer(), None);
    session.pointer_move(250);
    assert_eq!(session.pointer(), Some(250));
    session.pointer_up();
    assert_eq!(session.pointer(), None);
}

#[test]
fn pointer_down_tracks_and_fires() {
    let session = Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now()));
    session.pointer_down(250);
    assert_eq!(session.pointer(), Some(250));
    assert_eq!(session.lock_state().player_shots.len(), 1);
}

#[test]
fn negative_pointer_is_clamped() {
    let session = Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now()));
    session.pointer_move(-40);
    assert_eq!(session.pointer(), Some(0));
}

#[test]
fn pointer_down_on_terminal_screen_restarts() {
    let session = Session::new(GameState::new(SCREEN_W, SCREEN_H, Instant::now()));
    {
        let mut state = session.lock_state();
        state.status = GameStatus::GameOver;
        state.score = 70;
        state.enemies.clear();
    }
    session.pointer_down(250);
    let state = session.lock_state();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score, 0);
    assert!(!state.enemies.is_empty());
    assert!(state.player_shots.is_empty()); // restart tap does not fire
    drop(state);
    assert_eq!(session.pointer(), None);
}
