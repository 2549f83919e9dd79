//! Terminal renderer: a read-only view over engine state.
//!
//! The renderer draws once per frame from the engine's board, active and
//! next pieces, and score flags; it never mutates game state and the core
//! never calls back into it. Full redraws only, which is plenty for a
//! 10x20 grid.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use gridfall_engine::GameEngine;
use gridfall_types::{PieceKind, Position};

/// Left margin of the playfield in terminal columns.
const FIELD_X: u16 = 2;
/// Top margin of the playfield in terminal rows.
const FIELD_Y: u16 = 1;
/// Each board cell is two characters wide so the grid looks square.
const CELL_W: u16 = 2;

const FILLED: &str = "[]";
const EMPTY: &str = " .";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            enhanced_keys: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        // Ask for real press/repeat/release event kinds where the terminal
        // can deliver them; elsewhere the input layer falls back to its
        // auto-release timeout.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.enhanced_keys = true;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw the complete frame from current engine state.
    pub fn draw(&mut self, engine: &GameEngine) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border(engine)?;
        self.draw_board(engine)?;
        self.draw_active(engine)?;
        self.draw_sidebar(engine)?;
        self.draw_banner(engine)?;

        self.buf.queue(ResetColor)?;
        self.flush_buf()
    }

    fn cell_origin(&self, x: i32, y: i32) -> (u16, u16) {
        (FIELD_X + (x as u16) * CELL_W, FIELD_Y + y as u16)
    }

    fn draw_border(&mut self, engine: &GameEngine) -> Result<()> {
        let width = engine.board().width();
        let height = engine.board().height();
        self.buf.queue(SetForegroundColor(Color::DarkGrey))?;
        for y in 0..height {
            let (left, row) = self.cell_origin(0, y);
            self.buf.queue(cursor::MoveTo(left - 1, row))?;
            self.buf.queue(Print("|"))?;
            let (right, _) = self.cell_origin(width, y);
            self.buf.queue(cursor::MoveTo(right, row))?;
            self.buf.queue(Print("|"))?;
        }
        let (left, bottom) = self.cell_origin(0, height);
        self.buf.queue(cursor::MoveTo(left - 1, bottom))?;
        let floor = "-".repeat((width as usize) * (CELL_W as usize) + 2);
        self.buf.queue(Print(floor))?;
        Ok(())
    }

    fn draw_board(&mut self, engine: &GameEngine) -> Result<()> {
        let board = engine.board();
        for y in 0..board.height() {
            for x in 0..board.width() {
                let (col, row) = self.cell_origin(x, y);
                self.buf.queue(cursor::MoveTo(col, row))?;
                match board.cell_kind(Position::new(x, y)) {
                    Some(kind) => {
                        self.buf.queue(SetForegroundColor(kind_color(kind)))?;
                        self.buf.queue(Print(FILLED))?;
                    }
                    None => {
                        self.buf.queue(SetForegroundColor(Color::DarkGrey))?;
                        self.buf.queue(Print(EMPTY))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_active(&mut self, engine: &GameEngine) -> Result<()> {
        let Some(piece) = engine.active() else {
            return Ok(());
        };
        self.buf.queue(SetForegroundColor(kind_color(piece.kind())))?;
        for cell in piece.cells() {
            // Buffer-zone cells sit above the visible board.
            if cell.y < 0 {
                continue;
            }
            let (col, row) = self.cell_origin(cell.x, cell.y);
            self.buf.queue(cursor::MoveTo(col, row))?;
            self.buf.queue(Print(FILLED))?;
        }
        Ok(())
    }

    fn draw_sidebar(&mut self, engine: &GameEngine) -> Result<()> {
        let (panel, _) = self.cell_origin(engine.board().width(), 0);
        let panel = panel + 3;

        self.buf.queue(SetForegroundColor(Color::White))?;
        self.buf.queue(cursor::MoveTo(panel, FIELD_Y))?;
        self.buf.queue(Print(format!("score  {}", engine.score())))?;
        self.buf.queue(cursor::MoveTo(panel, FIELD_Y + 1))?;
        self.buf.queue(Print(format!("level  {}", engine.level())))?;
        self.buf.queue(cursor::MoveTo(panel, FIELD_Y + 2))?;
        self.buf.queue(Print(format!("lines  {}", engine.lines())))?;

        self.buf.queue(cursor::MoveTo(panel, FIELD_Y + 4))?;
        self.buf.queue(Print("next"))?;
        let next = engine.next();
        self.buf.queue(SetForegroundColor(kind_color(next.kind())))?;
        for cell in next.cells() {
            let dx = cell.x - next.pivot().x;
            let dy = cell.y - next.pivot().y;
            let col = panel + 2 + ((dx + 1) as u16) * CELL_W;
            let row = FIELD_Y + 6 + (dy + 1) as u16;
            self.buf.queue(cursor::MoveTo(col, row))?;
            self.buf.queue(Print(FILLED))?;
        }

        if engine.is_muted() {
            self.buf.queue(SetForegroundColor(Color::DarkGrey))?;
            self.buf.queue(cursor::MoveTo(panel, FIELD_Y + 11))?;
            self.buf.queue(Print("muted"))?;
        }
        Ok(())
    }

    fn draw_banner(&mut self, engine: &GameEngine) -> Result<()> {
        let message = if engine.game_over() {
            Some("GAME OVER - r to restart")
        } else if engine.paused() {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(message) = message {
            let (col, row) = self.cell_origin(1, engine.board().height() / 2);
            self.buf.queue(SetAttribute(Attribute::Bold))?;
            self.buf.queue(SetForegroundColor(Color::Yellow))?;
            self.buf.queue(cursor::MoveTo(col, row))?;
            self.buf.queue(Print(message))?;
            self.buf.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::DarkYellow,
    }
}
