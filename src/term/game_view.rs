//! GameView: maps a `GameSnapshot` plus effects into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Tetromino};
use crate::effects::{Particles, Starfield};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PaletteColor, GRID_HEIGHT, GRID_WIDTH};

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

/// Renders the playfield, side panel, backdrop, and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render one frame. `banner` is an optional announcement shown above
    /// the playfield, e.g. on a stage change.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        stars: &Starfield,
        fx: &Particles,
        banner: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        self.draw_stars(&mut fb, stars);

        let board_px_w = u16::from(GRID_WIDTH) * self.cell_w;
        let board_px_h = u16::from(GRID_HEIGHT) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 35),
            bold: false,
            dim: false,
        };
        let border = CellStyle::fg(Rgb::new(200, 200, 200));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..u16::from(GRID_HEIGHT) {
            for x in 0..u16::from(GRID_WIDTH) {
                match snap.board[y as usize][x as usize] {
                    Some(color) => {
                        self.draw_board_cell(&mut fb, start_x, start_y, x, y, color, false)
                    }
                    None => self.draw_empty_cell(&mut fb, start_x, start_y, x, y),
                }
            }
        }

        // Ghost projection under the falling piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle {
                fg: palette_rgb(active.color).faded(0.45),
                bg: Rgb::new(20, 20, 35),
                bold: false,
                dim: true,
            };
            for &(dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = ghost_y + dy;
                if in_board(x, y) {
                    self.fill_cell_rect(
                        &mut fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        '░',
                        ghost_style,
                    );
                }
            }
        }

        // Falling piece, over the ghost.
        if let Some(active) = snap.active {
            for &(dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = active.y + dy;
                if in_board(x, y) {
                    self.draw_board_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        active.color,
                        true,
                    );
                }
            }
        }

        self.draw_particles(&mut fb, fx, start_x, start_y);
        self.draw_side_panel(&mut fb, snap, viewport, start_x, start_y, frame_w);

        if let Some(text) = banner {
            let style = CellStyle::fg(Rgb::new(255, 255, 160)).bold();
            let y = start_y.saturating_sub(1);
            fb.put_str_centered(y, text, style);
        }

        if snap.game_over {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "LOST IN SPACE!");
            let hint = CellStyle::fg(Rgb::new(180, 180, 180));
            let y = start_y.saturating_add(frame_h / 2).saturating_add(2);
            fb.put_str_centered(y, "press R to restart", hint);
        }

        fb
    }

    fn draw_stars(&self, fb: &mut FrameBuffer, stars: &Starfield) {
        for star in stars.stars() {
            let x = star.x as i32;
            let y = star.y as i32;
            if x < 0 || y < 0 {
                continue;
            }
            let bright = f32::from(star.life) / 20.0;
            let style = CellStyle::fg(Rgb::new(255, 255, 255).faded(bright.max(0.3)));
            let ch = if star.life > 12 { '✦' } else { '·' };
            fb.put_char(x as u16, y as u16, ch, style);
        }
    }

    fn draw_particles(&self, fb: &mut FrameBuffer, fx: &Particles, start_x: u16, start_y: u16) {
        for p in fx.particles() {
            let cx = p.x * self.cell_w as f32;
            let cy = p.y * self.cell_h as f32;
            if cx < 0.0 || cy < 0.0 {
                continue;
            }
            let x = start_x + 1 + cx as u16;
            let y = start_y + 1 + cy as u16;
            let strength = f32::from(p.alpha) / 255.0;
            let ch = if p.alpha > 170 {
                '●'
            } else if p.alpha > 85 {
                '•'
            } else {
                '·'
            };
            let style = CellStyle::fg(palette_rgb(p.color).faded(strength));
            fb.put_char(x, y, ch, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(70, 70, 90),
            bg: Rgb::new(20, 20, 35),
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: PaletteColor,
        bold: bool,
    ) {
        let style = CellStyle {
            fg: palette_rgb(color),
            bg: Rgb::new(20, 20, 35),
            bold,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.lines), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STAGE", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            &format!("{} ({})", snap.stage_name, snap.stage + 1),
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in &snap.previews {
            if y.saturating_add(2) >= viewport.height {
                break;
            }
            self.draw_preview(fb, panel_x, y, piece);
            y = y.saturating_add(u16::from(piece.shape.height()) + 1);
        }
    }

    /// Mini rendering of a queued piece, one glyph pair per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Tetromino) {
        let style = CellStyle::fg(palette_rgb(piece.color));
        for &(dx, dy) in piece.shape.cells() {
            let px = x + (dx as u16) * 2;
            let py = y + dy as u16;
            fb.put_str(px, py, "██", style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn in_board(x: i8, y: i8) -> bool {
    x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8
}

fn palette_rgb(color: PaletteColor) -> Rgb {
    let (r, g, b) = color.rgb();
    Rgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn render_default(snap: &GameSnapshot) -> FrameBuffer {
        let view = GameView::default();
        let stars = Starfield::new(80, 24);
        let fx = Particles::new();
        view.render(snap, &stars, &fx, None, Viewport::new(80, 24))
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        fb.cells().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn renders_stats_panel() {
        let mut state = GameState::new(12345);
        state.start();
        let fb = render_default(&state.snapshot());
        let text = screen_text(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("LINES"));
        assert!(text.contains("STAGE"));
        assert!(text.contains("Easy"));
        assert!(text.contains("NEXT"));
    }

    #[test]
    fn game_over_overlay_appears() {
        let mut state = GameState::new(12345);
        state.start();
        let mut guard = 0;
        while !state.game_over() && guard < 500 {
            state.hard_drop();
            guard += 1;
        }
        let fb = render_default(&state.snapshot());
        assert!(screen_text(&fb).contains("LOST IN SPACE!"));
    }

    #[test]
    fn banner_is_drawn_when_present() {
        let state = GameState::new(1);
        let view = GameView::default();
        let stars = Starfield::new(80, 24);
        let fx = Particles::new();
        let fb = view.render(
            &state.snapshot(),
            &stars,
            &fx,
            Some("STAGE 2: Medium"),
            Viewport::new(80, 24),
        );
        assert!(screen_text(&fb).contains("STAGE 2: Medium"));
    }

    #[test]
    fn locked_cells_render_as_blocks() {
        let mut state = GameState::new(12345);
        state.start();
        state.hard_drop();
        let fb = render_default(&state.snapshot());
        assert!(fb.cells().iter().any(|c| c.ch == '█'));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut state = GameState::new(12345);
        state.start();
        let view = GameView::default();
        let stars = Starfield::new(5, 3);
        let fx = Particles::new();
        let fb = view.render(&state.snapshot(), &stars, &fx, None, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
