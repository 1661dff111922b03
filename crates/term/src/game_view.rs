//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O), so layouts can be unit-tested.

use crate::core::{shape_of, GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const BOARD_COLS: u16 = crate::core::board::COLS as u16;
const BOARD_ROWS: u16 = crate::core::board::ROWS as u16;

const PLAYFIELD_BG: Rgb = Rgb::hex(0x16213e);
const GRID_FG: Rgb = Rgb::hex(0x1f4068);
const FRAME_FG: Rgb = Rgb::hex(0x0f3460);
const PANEL_BG: Rgb = Rgb::hex(0x1a1a2e);
const ACCENT_FG: Rgb = Rgb::hex(0xe94560);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Display colour of each piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::hex(0x00ffff),
        PieceKind::O => Rgb::hex(0xffff00),
        PieceKind::T => Rgb::hex(0x800080),
        PieceKind::S => Rgb::hex(0x00ff00),
        PieceKind::Z => Rgb::hex(0xff0000),
        PieceKind::J => Rgb::hex(0x0000ff),
        PieceKind::L => Rgb::hex(0xffa500),
    }
}

/// Renders the playfield, the side panel and status overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

/// Top-left of the framed playfield in framebuffer coordinates.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    /// Framed playfield size in terminal cells (board plus a one-cell border).
    pub fn frame_size(&self) -> (u16, u16) {
        (BOARD_COLS * self.cell_w + 2, BOARD_ROWS + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(crate::fb::Cell {
            ch: ' ',
            style: CellStyle::new(PANEL_BG, PANEL_BG),
        });

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: 0,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        self.draw_border(fb, origin, frame_w, frame_h);

        for y in 0..BOARD_ROWS {
            for x in 0..BOARD_COLS {
                match PieceKind::from_cell_value(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, origin, x as i8, y as i8, kind),
                    None => self.draw_empty(fb, origin, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|&gy| gy != active.y) {
                let style = CellStyle::new(piece_color(active.kind), PLAYFIELD_BG);
                for (dx, dy) in active.shape.minos() {
                    self.fill_board_cell(fb, origin, active.x + dx, ghost_y + dy, '░', style);
                }
            }
            for (dx, dy) in active.shape.minos() {
                self.draw_block(fb, origin, active.x + dx, active.y + dy, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin.x + frame_w + 2, origin.y);

        if !snap.started {
            self.draw_overlay(fb, origin, &["BLOCKFALL", "R to start"]);
        } else if snap.game_over() {
            self.draw_overlay(fb, origin, &["GAME OVER", "R to restart"]);
        } else if snap.paused() {
            self.draw_overlay(fb, origin, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16) {
        let style = CellStyle::new(FRAME_FG, PANEL_BG);
        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(o.x + w - 1, o.y, '┐', style);
        fb.put_char(o.x, o.y + h - 1, '└', style);
        fb.put_char(o.x + w - 1, o.y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(o.x + dx, o.y, '─', style);
            fb.put_char(o.x + dx, o.y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(o.x, o.y + dy, '│', style);
            fb.put_char(o.x + w - 1, o.y + dy, '│', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, o: Origin, x: u16, y: u16) {
        let style = CellStyle::new(GRID_FG, PLAYFIELD_BG);
        self.fill_board_cell(fb, o, x as i8, y as i8, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG);
        self.fill_board_cell(fb, o, x, y, '█', style);
    }

    /// Paint one board cell; cells outside the visible grid are skipped.
    fn fill_board_cell(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x as u16 >= BOARD_COLS || y as u16 >= BOARD_ROWS {
            return;
        }
        let px = o.x + 1 + (x as u16) * self.cell_w;
        let py = o.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) {
        if x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let value = CellStyle::new(ACCENT_FG, PANEL_BG);
        let help = CellStyle::new(Rgb::new(170, 170, 170), PANEL_BG);

        let mut row = y;
        fb.put_str(x, row, "NEXT", label);
        row += 1;
        if let Some(kind) = snap.next {
            self.draw_preview(fb, x, row, &shape_of(kind), kind);
        }
        row += 3;

        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, row, name, label);
            fb.put_u32(x, row + 1, v, value);
            row += 3;
        }

        fb.put_str(x, row, "SPEED", label);
        fb.put_u32(x, row + 1, snap.fall_interval_ms, value);
        fb.put_str(x + 4, row + 1, "ms", help);
        row += 3;

        for line in [
            "←/→  move",
            "↑    rotate",
            "↓    soft drop",
            "SPC  hard drop",
            "P    pause",
            "R    restart",
            "Q    quit",
        ] {
            if row >= viewport.height {
                break;
            }
            fb.put_str(x, row, line, help);
            row += 1;
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PANEL_BG);
        for (dx, dy) in shape.minos() {
            let px = x + (dx as u16) * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, o: Origin, lines: &[&str]) {
        let (frame_w, frame_h) = self.frame_size();
        let style = CellStyle::new(ACCENT_FG, PANEL_BG).bold();
        let top = o.y + frame_h / 2 - (lines.len() as u16) / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = o.x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}
