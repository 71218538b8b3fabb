//! Built-in 5x7 bitmap font.
//!
//! Covers upper-case letters, digits, and the punctuation the views print. Lower-case
//! input is drawn with the upper-case glyphs; any other character renders as a blank
//! cell of normal width.

use super::{Rect, Rgb, Surface};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;

/// Horizontal distance between consecutive glyph origins, in unscaled pixels.
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Seven rows, five columns each; bit 4 is the leftmost column.
pub type Glyph = [u8; 7];

pub fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        _ => return None,
    };
    Some(rows)
}

/// Width in pixels of `text` drawn at `scale`, without trailing spacing.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        0
    } else {
        (count * ADVANCE - 1) * scale
    }
}

pub fn text_height(scale: i32) -> i32 {
    GLYPH_HEIGHT * scale
}

/// Largest scale, at most `preferred`, at which `text` fits in `max_width`. Never below 1.
pub fn fit_scale(text: &str, preferred: i32, max_width: i32) -> i32 {
    let unit = text_width(text, 1).max(1);
    (max_width / unit).clamp(1, preferred.max(1))
}

/// Draw `text` with its top-left corner at `(x, y)`.
pub fn draw_text(surface: &mut Surface, text: &str, x: i32, y: i32, scale: i32, color: Rgb) {
    let scale = scale.max(1);
    let mut origin_x = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            draw_glyph(surface, &rows, origin_x, y, scale, color);
        }
        origin_x += ADVANCE * scale;
    }
}

/// Draw `text` centered on `(center_x, center_y)`.
pub fn draw_text_centered(
    surface: &mut Surface,
    text: &str,
    center_x: i32,
    center_y: i32,
    scale: i32,
    color: Rgb,
) {
    let scale = scale.max(1);
    let x = center_x - text_width(text, scale) / 2;
    let y = center_y - text_height(scale) / 2;
    draw_text(surface, text, x, y, scale, color);
}

fn draw_glyph(surface: &mut Surface, rows: &Glyph, x: i32, y: i32, scale: i32, color: Rgb) {
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let cell = Rect::new(x + col * scale, y + row as i32 * scale, scale, scale);
                surface.fill_rect(cell, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
        assert!(glyph('~').is_none());
        assert_eq!(glyph(' '), None);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 3), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 1), 11);
        assert_eq!(text_width("12:34:56", 2), (8 * 6 - 1) * 2);
    }

    #[test]
    fn test_fit_scale() {
        // "ABCD" is 23 pixels wide at scale 1.
        assert_eq!(fit_scale("ABCD", 4, 100), 4);
        assert_eq!(fit_scale("ABCD", 4, 50), 2);
        assert_eq!(fit_scale("ABCD", 4, 10), 1);
    }

    #[test]
    fn test_draw_glyph_pixels() {
        let mut surface = Surface::new(6, 7);
        draw_text(&mut surface, "T", 0, 0, 1, INK);

        for x in 0..5 {
            assert_eq!(surface.get(x, 0), Some(INK));
        }
        assert_eq!(surface.get(2, 6), Some(INK));
        assert_eq!(surface.get(0, 6), Some(Rgb::BLACK));
        assert_eq!(surface.get(5, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_unknown_chars_are_blank_but_advance() {
        let mut surface = Surface::new(20, 7);
        draw_text(&mut surface, "~I", 0, 0, 1, INK);

        assert!((0..6).all(|x| surface.get(x, 0) == Some(Rgb::BLACK)));
        // The middle column of `I` lands one advance later.
        assert_eq!(surface.get(8, 3), Some(INK));
    }

    #[test]
    fn test_offscreen_text_is_clipped() {
        let mut surface = Surface::new(4, 4);
        draw_text(&mut surface, "WWW", -100, -100, 3, INK);
        draw_text_centered(&mut surface, "HELLO", 2, 100, 2, INK);
        assert!(surface.pixels().iter().all(|&p| p == Rgb::BLACK));
    }
}
