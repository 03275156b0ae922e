//! Terminal backend
//!
//! World coordinates (1000x600) are scaled onto a character grid the size of
//! the terminal. Sprites become filled blocks of a single glyph.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;

use super::scene::{Align, DrawCommand, Sprite, TextStyle};
use super::Renderer;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{EffectKind, Rect};

/// Glyph used to fill a sprite's cells
pub fn glyph(sprite: Sprite) -> char {
    match sprite {
        Sprite::Car(i) => ['#', '%', '&', '@', '$'][i % 5],
        Sprite::Cone => 'A',
        Sprite::Frank => 'F',
        Sprite::Coin => 'o',
        Sprite::PowerUp(EffectKind::Shield) => 'S',
        Sprite::PowerUp(EffectKind::Slow) => 'Z',
        Sprite::PowerUp(EffectKind::Magnet) => 'M',
        Sprite::PowerUp(EffectKind::Invisible) => '?',
    }
}

/// Fixed-size character buffer
#[derive(Debug, Clone, PartialEq)]
pub struct CharGrid {
    pub cells: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl CharGrid {
    pub fn new(width: u16, height: u16) -> Self {
        CharGrid {
            cells: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.cells[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    /// World x to column
    fn col(&self, x: f32) -> i32 {
        (x / SCREEN_WIDTH * self.width as f32).floor() as i32
    }

    /// World y to row
    fn row(&self, y: f32) -> i32 {
        (y / SCREEN_HEIGHT * self.height as f32).floor() as i32
    }

    /// Fill every cell a world rect touches; always at least one cell
    pub fn fill_rect(&mut self, rect: &Rect, c: char) {
        let x0 = self.col(rect.left());
        let y0 = self.row(rect.top());
        let x1 = ((rect.right() / SCREEN_WIDTH * self.width as f32).ceil() as i32 - 1).max(x0);
        let y1 = ((rect.bottom() / SCREEN_HEIGHT * self.height as f32).ceil() as i32 - 1).max(y0);
        for y in y0.max(0)..=y1.min(self.height as i32 - 1) {
            for x in x0.max(0)..=x1.min(self.width as i32 - 1) {
                self.cells[y as usize][x as usize] = c;
            }
        }
    }

    /// Write text anchored at a world point
    pub fn put_text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let len = text.chars().count() as i32;
        let anchor = self.col(x);
        let start = match align {
            Align::Left => anchor,
            Align::Center => anchor - len / 2,
            Align::Right => anchor - len,
        };
        let row = self.row(y);
        if row < 0 || row >= self.height as i32 {
            return;
        }
        for (i, c) in text.chars().enumerate() {
            let col = start + i as i32;
            if col >= 0 && col < self.width as i32 {
                self.cells[row as usize][col as usize] = c;
            }
        }
    }

    /// Replace every drawn cell with a faint dot
    pub fn dim(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell != ' ' {
                *cell = '.';
            }
        }
    }

    pub fn row_string(&self, y: u16) -> String {
        self.cells[y as usize].iter().collect()
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for y in 0..self.height {
            queue!(out, MoveTo(0, y), Print(self.row_string(y)))?;
        }
        out.flush()
    }
}

/// Draws scenes onto a terminal (or any writer)
pub struct TerminalRenderer<W: Write> {
    out: W,
    grid: CharGrid,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            grid: CharGrid::new(width.max(1), height.max(1)),
        }
    }

    pub fn grid(&self) -> &CharGrid {
        &self.grid
    }

    /// Rasterise without flushing to the writer
    pub fn draw(&mut self, scene: &[DrawCommand]) {
        self.grid.clear();
        for command in scene {
            match command {
                DrawCommand::Sprite { sprite, rect } => self.grid.fill_rect(rect, glyph(*sprite)),
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    style,
                    align,
                } => {
                    let text = match style {
                        TextStyle::Highlight => format!("> {} <", text),
                        TextStyle::Title => text.to_uppercase(),
                        TextStyle::Normal => text.clone(),
                    };
                    self.grid.put_text(&text, *x, *y, *align);
                }
                DrawCommand::Dim => self.grid.dim(),
            }
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, scene: &[DrawCommand]) -> io::Result<()> {
        self.draw(scene);
        self.grid.render(&mut self.out)
    }

    fn resize(&mut self, width: u16, height: u16) {
        log::debug!("Resize to {}x{}", width, height);
        self.grid = CharGrid::new(width.max(1), height.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_scales_to_cells() {
        // 100x60 grid: one cell per 10x10 world units
        let mut grid = CharGrid::new(100, 60);
        grid.fill_rect(&Rect::new(150.0, 300.0, 100.0, 60.0), '#');
        let filled: usize = grid.cells.iter().flatten().filter(|&&c| c == '#').count();
        assert_eq!(filled, 10 * 6);
        assert_eq!(grid.cells[30][15], '#');
        assert_eq!(grid.cells[36][15], ' ');
        assert_eq!(grid.cells[30][25], ' ');
    }

    #[test]
    fn test_tiny_rect_gets_one_cell() {
        let mut grid = CharGrid::new(10, 6);
        grid.fill_rect(&Rect::new(510.0, 310.0, 5.0, 5.0), 'o');
        assert_eq!(grid.cells[3][5], 'o');
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut grid = CharGrid::new(20, 10);
        grid.fill_rect(&Rect::new(980.0, -50.0, 200.0, 100.0), 'A');
        assert_eq!(grid.cells[0][19], 'A');
        assert!(grid.cells[9].iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_text_alignment() {
        let mut grid = CharGrid::new(20, 2);
        grid.put_text("abcd", 500.0, 0.0, Align::Center);
        assert_eq!(grid.row_string(0), "        abcd        ");
        grid.put_text("xy", 1000.0, 300.0, Align::Right);
        assert_eq!(grid.row_string(1), "                  xy");
    }

    #[test]
    fn test_dim_keeps_shape() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 20, 10);
        renderer.draw(&[
            DrawCommand::Sprite {
                sprite: Sprite::Cone,
                rect: Rect::new(0.0, 0.0, 50.0, 60.0),
            },
            DrawCommand::Dim,
        ]);
        assert_eq!(renderer.grid().cells[0][0], '.');
        assert_eq!(renderer.grid().cells[5][5], ' ');
    }

    #[test]
    fn test_present_writes_every_row() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 8, 3);
        renderer.present(&[]).unwrap();
        let written = String::from_utf8_lossy(&renderer.out).into_owned();
        assert_eq!(written.matches("        ").count(), 3);
    }
}
