use std::io::{stdout, BufWriter};
use std::sync::Arc;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal, ExecutableCommand,
};

use swarm_defense::display::{TerminalCanvas, CELL_W};
use swarm_defense::engine::GameState;
use swarm_defense::runner::{GameLoop, Session};

/// Center of a terminal column in simulation pixels.
fn pointer_x(column: u16) -> i32 {
    column as i32 * CELL_W + CELL_W / 2
}

/// Lifecycle-thread event loop: translates terminal events into pointer
/// events for the session.  Returns when the user quits.
fn run(session: &Arc<Session>) -> std::io::Result<()> {
    loop {
        match event::read()? {
            Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
            Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => session.pointer_down(pointer_x(column)),
                MouseEventKind::Drag(MouseButton::Left) => session.pointer_move(pointer_x(column)),
                MouseEventKind::Up(MouseButton::Left) => session.pointer_up(),
                _ => {}
            },
            _ => {}
        }
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(event::EnableMouseCapture)?;

    let result = (|| {
        let (cols, rows) = terminal::size()?;
        let canvas = TerminalCanvas::new(BufWriter::new(stdout()), cols, rows);
        let (sim_w, sim_h) = canvas.sim_size();

        let session = Arc::new(Session::new(GameState::new(sim_w, sim_h, Instant::now())));
        let mut game_loop = GameLoop::new(Arc::clone(&session), Box::new(canvas));
        game_loop.start();

        let result = run(&session);
        game_loop.stop();
        result
    })();

    // Always restore the terminal
    let _ = out.execute(event::DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
