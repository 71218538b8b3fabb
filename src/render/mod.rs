//! Software raster used by the views, the compositor, and the presenters.
//!
//! A [`Surface`] is a plain row-major `Vec<Rgb>`. Everything drawn onto it is clipped
//! to its bounds, so callers can pass geometry that hangs off any edge (the transition
//! slides whole views past the top and bottom).

pub mod compositor;
pub mod font;
pub mod layout;
pub mod view;

pub use compositor::{Compositor, Frame, ProgressSample};
pub use layout::{Rect, UnlockedLayout};
pub use view::{SceneRenderer, ViewContext, ViewRenderer};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend `self` over `dst` with constant opacity `alpha` (255 = opaque).
    pub fn over(self, dst: Rgb, alpha: u8) -> Rgb {
        let a = alpha as u16;
        let inv = 255 - a;
        let mix = |src: u8, dst: u8| ((src as u16 * a + dst as u16 * inv + 127) / 255) as u8;
        Rgb::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

/// Owned `width × height` pixel raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Change the dimensions, keeping the allocation when possible. Content is cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Rgb::BLACK);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill the part of `rect` that lies on the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Filled circle centered at `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        if radius <= 0 {
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Alpha-blend all of `src` onto `self` with its top-left corner at `(0, offset_y)`.
    ///
    /// `alpha` is a constant per-pixel opacity; colors are not premultiplied. Rows that
    /// land outside `self` are skipped.
    pub fn blend_from(&mut self, src: &Surface, offset_y: i32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let width = self.width.min(src.width) as usize;
        for src_y in 0..src.height as i32 {
            let dst_y = src_y + offset_y;
            if dst_y < 0 || dst_y >= self.height as i32 {
                continue;
            }
            let src_row = src_y as usize * src.width as usize;
            let dst_row = dst_y as usize * self.width as usize;
            for x in 0..width {
                let dst = &mut self.pixels[dst_row + x];
                *dst = src.pixels[src_row + x].over(*dst, alpha);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
        }
    }
}
