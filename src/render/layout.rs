//! View geometry shared by the renderer and the input hit test.
//!
//! The reveal toggle must be hit-tested in exactly the place it is drawn, so both sides
//! ask [`UnlockedLayout`] for its rectangle instead of duplicating the arithmetic.

/// Axis-aligned rectangle in surface pixels. May extend past the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Text scale that keeps glyphs proportional to the viewport.
fn text_scale(height: i32, divisor: i32) -> i32 {
    (height / divisor).max(1)
}

/// Geometry of the locked (clock) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedLayout {
    pub clock_center_y: i32,
    pub clock_scale: i32,
    pub date_center_y: i32,
    pub date_scale: i32,
    pub hint_center_y: i32,
    pub hint_scale: i32,
}

impl LockedLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        // "HH:MM:SS" is 8 glyphs of 6 columns; keep it inside the width.
        let clock_scale = text_scale(h, 14).min((w / 50).max(1));
        let date_scale = (clock_scale / 2).max(1);
        let hint_scale = (date_scale / 2).max(1);
        let mid = h / 2;

        Self {
            clock_center_y: mid - 4 * clock_scale,
            clock_scale,
            date_center_y: mid + 4 * date_scale + 2,
            date_scale,
            hint_center_y: mid + 10 * date_scale + 4,
            hint_scale,
        }
    }
}

/// Geometry of the unlocked (fake login) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockedLayout {
    pub avatar: Rect,
    pub name_center_y: i32,
    pub name_scale: i32,
    pub input: Rect,
    pub reveal_toggle: Rect,
    pub hint_center_y: i32,
    pub hint_scale: i32,
}

impl UnlockedLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let mid = h / 2;

        let avatar_size = (h / 5).max(3);
        let avatar_y = mid - avatar_size - h / 6;
        let avatar = Rect::new((w - avatar_size) / 2, avatar_y, avatar_size, avatar_size);

        let name_scale = text_scale(h, 45);

        let input_width = (w * 3 / 5).max(1);
        let input_height = (h / 8).max(9);
        let input = Rect::new((w - input_width) / 2, mid + h / 12, input_width, input_height);

        let toggle_size = (input_height * 2 / 3).max(3);
        let toggle_padding = (input_height - toggle_size) / 2;
        let reveal_toggle = Rect::new(
            input.right() - toggle_size - toggle_padding,
            input.y + (input_height - toggle_size) / 2,
            toggle_size,
            toggle_size,
        );

        let hint_scale = text_scale(h, 90);

        Self {
            avatar,
            name_center_y: mid - h / 16,
            name_scale,
            input,
            reveal_toggle,
            hint_center_y: h - h / 10 - 4 * hint_scale,
            hint_scale,
        }
    }

    /// Whether a click at `(x, y)` lands on the reveal toggle.
    pub fn hits_reveal_toggle(&self, x: i32, y: i32) -> bool {
        self.reveal_toggle.contains(x, y)
    }
}
