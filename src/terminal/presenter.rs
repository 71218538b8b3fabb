//! Half-block presentation of a [`Surface`] on a truecolor terminal.
//!
//! Every cell shows two pixel rows: the `▀` glyph is drawn in the top pixel's color
//! over a background of the bottom pixel's color. Only cells that changed since the
//! previous frame are written.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::render::{Rgb, Surface};

const UPPER_HALF_BLOCK: char = '▀';

/// Pixel size of a surface that exactly covers `cols × rows` cells.
pub fn surface_size(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32, rows as u32 * 2)
}

/// Pixel under the top half of a cell, for hit testing mouse events.
pub fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    (col as i32, row as i32 * 2)
}

fn color(pixel: Rgb) -> Color {
    Color::Rgb {
        r: pixel.r,
        g: pixel.g,
        b: pixel.b,
    }
}

#[derive(Debug, Default)]
pub struct Presenter {
    /// Cells as last written, `(top, bottom)` per cell in row-major order.
    previous: Vec<(Rgb, Rgb)>,
    cols: u16,
    rows: u16,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen so the next frame is written in full.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Write `surface` to `out` and flush.
    pub fn present<W: Write>(&mut self, out: &mut W, surface: &Surface) -> io::Result<()> {
        let cols = surface.width().min(u16::MAX as u32) as u16;
        let rows = surface.height().div_ceil(2).min(u16::MAX as u32) as u16;
        let cell_count = cols as usize * rows as usize;

        if self.cols != cols || self.rows != rows || self.previous.len() != cell_count {
            self.cols = cols;
            self.rows = rows;
            self.previous.clear();
        }
        let full = self.previous.is_empty();
        if full {
            self.previous = vec![(Rgb::BLACK, Rgb::BLACK); cell_count];
        }

        let mut colors: Option<(Rgb, Rgb)> = None;
        for row in 0..rows {
            // Cursor position after the last write in this row, if it is contiguous.
            let mut cursor_col: Option<u16> = None;
            for col in 0..cols {
                let x = col as u32;
                let top = surface.get(x, row as u32 * 2).unwrap_or_default();
                let bottom = surface.get(x, row as u32 * 2 + 1).unwrap_or(top);
                let index = row as usize * cols as usize + col as usize;

                if !full && self.previous[index] == (top, bottom) {
                    continue;
                }
                self.previous[index] = (top, bottom);

                if cursor_col != Some(col) {
                    queue!(out, MoveTo(col, row))?;
                }
                if colors != Some((top, bottom)) {
                    queue!(
                        out,
                        SetForegroundColor(color(top)),
                        SetBackgroundColor(color(bottom))
                    )?;
                    colors = Some((top, bottom));
                }
                queue!(out, Print(UPPER_HALF_BLOCK))?;
                cursor_col = Some(col + 1);
            }
        }

        if colors.is_some() {
            queue!(out, ResetColor)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(output: &[u8]) -> usize {
        String::from_utf8_lossy(output)
            .chars()
            .filter(|&c| c == UPPER_HALF_BLOCK)
            .count()
    }

    #[test]
    fn test_geometry_helpers() {
        assert_eq!(surface_size(80, 24), (80, 48));
        assert_eq!(cell_to_pixel(10, 5), (10, 10));
    }

    #[test]
    fn test_first_frame_writes_every_cell() {
        let mut presenter = Presenter::new();
        let surface = Surface::new(4, 6);
        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &surface).unwrap();
        assert_eq!(blocks(&out), 12);
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut presenter = Presenter::new();
        let surface = Surface::new(4, 4);
        presenter.present(&mut Vec::<u8>::new(), &surface).unwrap();

        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &surface).unwrap();
        assert_eq!(blocks(&out), 0);
    }

    #[test]
    fn test_only_changed_cells_are_rewritten() {
        let mut presenter = Presenter::new();
        let mut surface = Surface::new(4, 4);
        presenter.present(&mut Vec::<u8>::new(), &surface).unwrap();

        // Bottom pixel of cell (2, 1).
        surface.set(2, 3, Rgb::new(200, 10, 10));
        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &surface).unwrap();

        assert_eq!(blocks(&out), 1);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("48;2;200;10;10"), "{text:?}");
    }

    #[test]
    fn test_reset_and_resize_force_full_frame() {
        let mut presenter = Presenter::new();
        let surface = Surface::new(3, 2);
        presenter.present(&mut Vec::<u8>::new(), &surface).unwrap();

        presenter.reset();
        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &surface).unwrap();
        assert_eq!(blocks(&out), 3);

        let larger = Surface::new(5, 4);
        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &larger).unwrap();
        assert_eq!(blocks(&out), 10);
    }

    #[test]
    fn test_odd_height_repeats_last_row() {
        let mut presenter = Presenter::new();
        let mut surface = Surface::new(1, 3);
        surface.set(0, 2, Rgb::new(9, 9, 9));
        let mut out = Vec::<u8>::new();
        presenter.present(&mut out, &surface).unwrap();

        assert_eq!(blocks(&out), 2);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("38;2;9;9;9"));
        assert!(text.contains("48;2;9;9;9"));
    }
}
