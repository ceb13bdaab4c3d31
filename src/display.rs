//! Terminal rendering adapter — all terminal I/O lives here.
//!
//! The simulation runs in a virtual pixel space; this module maps it onto
//! terminal cells (one cell ≈ `CELL_W` × `CELL_H` pixels, approximating
//! square pixels on a typical font) and translates state into crossterm
//! commands.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::engine::GameState;
use crate::entities::GameStatus;
use crate::geom::Bounds;
use crate::runner::Renderer;

/// Simulation pixels per terminal column.
pub const CELL_W: i32 = 8;
/// Simulation pixels per terminal row.
pub const CELL_H: i32 = 16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Cyan;
const C_MUZZLE: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_ANTENNA: Color = Color::Yellow;
const C_SHOT_PLAYER: Color = Color::Yellow;
const C_SHOT_ENEMY: Color = Color::Red;
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Renderer implementation ───────────────────────────────────────────────────

/// Draws the game onto a terminal writer.  The terminal target is always
/// available, so `ready` keeps its default.
pub struct TerminalCanvas<W: Write + Send> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write + Send> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalCanvas { out, cols, rows }
    }

    /// Simulation-space dimensions covered by this terminal.
    pub fn sim_size(&self) -> (i32, i32) {
        (self.cols as i32 * CELL_W, self.rows as i32 * CELL_H)
    }
}

impl<W: Write + Send> Renderer for TerminalCanvas<W> {
    fn draw(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        match state.status {
            GameStatus::GameOver => draw_end_screen(&mut self.out, self.cols, self.rows, state, false)?,
            GameStatus::Victory => draw_end_screen(&mut self.out, self.cols, self.rows, state, true)?,
            GameStatus::Playing => {
                for enemy in &state.enemies {
                    draw_enemy(&mut self.out, self.cols, self.rows, &enemy.bounds)?;
                }
                for shot in &state.player_shots {
                    fill_rect(&mut self.out, self.cols, self.rows, &shot.bounds, C_SHOT_PLAYER, '║')?;
                }
                for shot in &state.enemy_shots {
                    fill_rect(&mut self.out, self.cols, self.rows, &shot.bounds, C_SHOT_ENEMY, '↓')?;
                }
                draw_player(&mut self.out, self.cols, self.rows, state)?;
                draw_hud(&mut self.out, self.cols, self.rows, state)?;
            }
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Drawing helpers ──────────────────────────────────────────────────────────

/// Fill the cells covered by a simulation-space rectangle, clipped to the
/// terminal.
fn fill_rect<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    bounds: &Bounds,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let col0 = (bounds.left / CELL_W).max(0);
    let col1 = ((bounds.right + CELL_W - 1) / CELL_W).min(cols as i32);
    let row0 = (bounds.top / CELL_H).max(0);
    let row1 = ((bounds.bottom + CELL_H - 1) / CELL_H).min(rows as i32);
    if col0 >= col1 || row0 >= row1 {
        return Ok(());
    }

    out.queue(style::SetForegroundColor(color))?;
    let line: String = std::iter::repeat(glyph).take((col1 - col0) as usize).collect();
    for row in row0..row1 {
        out.queue(cursor::MoveTo(col0 as u16, row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    bounds: &Bounds,
) -> std::io::Result<()> {
    fill_rect(out, cols, rows, bounds, C_ENEMY, '▓')?;

    // Antenna details above the hull
    let row = bounds.top / CELL_H - 1;
    if row < 0 || row >= rows as i32 {
        return Ok(());
    }
    let inset = bounds.width() / 4;
    out.queue(style::SetForegroundColor(C_ANTENNA))?;
    for x in [bounds.left + inset, bounds.right - inset] {
        let col = x / CELL_W;
        if col >= 0 && col < cols as i32 {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print("╻"))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    state: &GameState,
) -> std::io::Result<()> {
    fill_rect(out, cols, rows, &state.player.bounds, C_PLAYER, '█')?;

    // Cannon detail on top of the hull
    let (mx, my) = state.player.muzzle();
    let col = mx / CELL_W;
    let row = my / CELL_H - 1;
    if col >= 0 && col < cols as i32 && row >= 0 && row < rows as i32 {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(C_MUZZLE))?;
        out.queue(Print("▲"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, cols: u16, rows: u16, state: &GameState) -> std::io::Result<()> {
    let score_str = format!("Score: {}", state.score);
    let sx = (cols / 2).saturating_sub(score_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&score_str))?;

    let hint = "Drag to move   Click to shoot   Q to quit";
    let hx = (cols / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── End screens ───────────────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    state: &GameState,
    won: bool,
) -> std::io::Result<()> {
    let (banner, color) = if won {
        ("║     VICTORY      ║", Color::Green)
    } else {
        ("║    GAME  OVER    ║", Color::Red)
    };
    let score_line = format!("Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&score_line, Color::Yellow),
        ("Click to restart   Q to quit", Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
