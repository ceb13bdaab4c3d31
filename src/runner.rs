//! Game loop driver and shared-session plumbing.
//!
//! Two threads touch the session: the owning lifecycle thread (delivers
//! pointer events, starts and stops the loop) and the loop thread spawned
//! here, which runs update + render pairs at a fixed ~60 Hz cadence.  One
//! mutex guards the game state for the duration of each update + render
//! pair; the pointer position crosses threads as a single atomic word.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::thread_rng;

use crate::engine::GameState;
use crate::entities::GameStatus;

/// Frame budget at the target 60 Hz cadence.
pub const FRAME: Duration = Duration::from_millis(1000 / 60);

/// Sentinel pointer value while nothing is touching.
const POINTER_NONE: i32 = -1;

/// Render collaborator seam.  `ready` probes whether a drawable target can
/// be acquired this iteration; `draw` presents the current snapshot and is
/// always invoked with the session lock held.
pub trait Renderer: Send {
    /// An unready target makes the loop skip the iteration entirely; this
    /// is an expected transient condition, not an error.
    fn ready(&self) -> bool {
        true
    }

    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

// ── Shared session ───────────────────────────────────────────────────────────

/// State shared between the lifecycle thread and the loop thread.
pub struct Session {
    state: Mutex<GameState>,
    pointer_x: AtomicI32,
    running: AtomicBool,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Session {
            state: Mutex::new(state),
            pointer_x: AtomicI32::new(POINTER_NONE),
            running: AtomicBool::new(false),
        }
    }

    /// Lock the game state.  A poisoned lock is absorbed: a panicked tick
    /// must not wedge shutdown or the next frame.
    pub fn lock_state(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Tracked pointer X, `None` while not touching.
    pub fn pointer(&self) -> Option<i32> {
        let x = self.pointer_x.load(Ordering::Relaxed);
        (x != POINTER_NONE).then_some(x)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Pointer pressed at `x`.  On a terminal screen this restarts the
    /// session in place; during play it starts tracking and fires one
    /// player shot from the current muzzle point.
    pub fn pointer_down(&self, x: i32) {
        let mut state = self.lock_state();
        if state.status != GameStatus::Playing {
            self.pointer_x.store(POINTER_NONE, Ordering::Relaxed);
            state.reset(Instant::now());
            return;
        }
        self.pointer_x.store(x.max(0), Ordering::Relaxed);
        state.fire_player_shot();
    }

    /// Pointer dragged to `x`.  A lock-free single-word store: a torn or
    /// stale read on the loop thread self-corrects next tick.
    pub fn pointer_move(&self, x: i32) {
        self.pointer_x.store(x.max(0), Ordering::Relaxed);
    }

    /// Pointer released: stop tracking.
    pub fn pointer_up(&self) {
        self.pointer_x.store(POINTER_NONE, Ordering::Relaxed);
    }
}

// ── Loop driver ──────────────────────────────────────────────────────────────

/// Handle over the loop thread: non-blocking idempotent `start`, blocking
/// idempotent `stop` with join semantics.  The renderer moves into the loop
/// thread on start and is recovered on stop, so the loop can be restarted.
pub struct GameLoop {
    session: Arc<Session>,
    renderer: Option<Box<dyn Renderer>>,
    thread: Option<JoinHandle<Box<dyn Renderer>>>,
}

impl GameLoop {
    pub fn new(session: Arc<Session>, renderer: Box<dyn Renderer>) -> Self {
        GameLoop {
            session,
            renderer: Some(renderer),
            thread: None,
        }
    }

    /// Begin the loop thread.  A second call while running is a no-op.
    pub fn start(&mut self) {
        if self.thread.is_some() {
            return;
        }
        let Some(mut renderer) = self.renderer.take() else {
            return;
        };
        self.session.running.store(true, Ordering::Release);
        let session = Arc::clone(&self.session);
        self.thread = Some(thread::spawn(move || {
            run_loop(&session, renderer.as_mut());
            renderer
        }));
    }

    /// Clear the running flag and block until the loop thread has observed
    /// it and exited.  No state mutation happens after `stop` returns.
    pub fn stop(&mut self) {
        self.session.running.store(false, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            match handle.join() {
                Ok(renderer) => self.renderer = Some(renderer),
                Err(_) => log::error!("game loop thread panicked"),
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Loop body: busy-poll while the render target is unavailable; otherwise
/// run one update (only while `Playing`) + render pair under the session
/// lock, then sleep away the rest of the frame budget.
fn run_loop(session: &Session, renderer: &mut dyn Renderer) {
    log::debug!("game loop started");
    let mut rng = thread_rng();

    while session.running.load(Ordering::Acquire) {
        if !renderer.ready() {
            continue;
        }

        let frame_start = Instant::now();
        {
            let mut state = session.lock_state();
            if state.status == GameStatus::Playing {
                state.update(frame_start, session.pointer(), &mut rng);
            }
            // Terminal screens keep rendering with the simulation frozen.
            if let Err(err) = renderer.draw(&state) {
                log::warn!("frame draw failed: {err}");
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    log::debug!("game loop exited");
}
