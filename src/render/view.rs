//! The two views: the locked clock and the unlocked fake login.
//!
//! [`ViewRenderer`] is the seam between the compositor and whatever draws the content.
//! [`SceneRenderer`] is the built-in implementation; it draws everything with solid
//! fills and the 5x7 font so it runs the same on every host.

use chrono::{DateTime, Local};

use super::font::{self, draw_text_centered};
use super::layout::{LockedLayout, Rect, UnlockedLayout};
use super::Surface;
use crate::common::constants::{
    ACCENT_BLUE, DEFAULT_IDLE_THRESHOLD_MS, DEFAULT_SHOW_SECONDS, LOCKED_BACKGROUND,
    LOCKED_HINT, SECRET_MASKED, SECRET_REVEALED, TEXT_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
    UNLOCKED_BACKGROUND,
};
use crate::config::DateFormat;

/// Inputs a view needs beyond the surface itself.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Wall-clock time shown by the locked view.
    pub wall: DateTime<Local>,
    pub username: &'a str,
    pub reveal_secret: bool,
}

/// Draws the full contents of one view into a surface of the viewport's size.
///
/// Implementations must cover every pixel; the compositor does not clear scratch
/// surfaces between frames.
#[cfg_attr(test, mockall::automock)]
pub trait ViewRenderer {
    fn render_locked(&self, surface: &mut Surface, now: &DateTime<Local>);

    fn render_unlocked(&self, surface: &mut Surface, username: &str, reveal_secret: bool);
}

/// Default renderer for both views.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    unlocked_hint: String,
    clock_pattern: &'static str,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_THRESHOLD_MS)
    }
}

impl SceneRenderer {
    /// The unlocked hint quotes `idle_threshold_ms`, so it stays truthful when the
    /// threshold is configured.
    pub fn new(idle_threshold_ms: u64) -> Self {
        Self {
            unlocked_hint: idle_hint(idle_threshold_ms),
            clock_pattern: clock_pattern(DateFormat::default(), DEFAULT_SHOW_SECONDS),
        }
    }

    /// Draw the locked clock in `format`, with or without seconds.
    pub fn with_clock(mut self, format: DateFormat, show_seconds: bool) -> Self {
        self.clock_pattern = clock_pattern(format, show_seconds);
        self
    }

    pub fn unlocked_hint(&self) -> &str {
        &self.unlocked_hint
    }

    pub fn clock_text(&self, now: &DateTime<Local>) -> String {
        now.format(self.clock_pattern).to_string()
    }
}

impl ViewRenderer for SceneRenderer {
    fn render_locked(&self, surface: &mut Surface, now: &DateTime<Local>) {
        surface.fill(LOCKED_BACKGROUND);

        let width = surface.width() as i32;
        let layout = LockedLayout::new(surface.width(), surface.height());
        let center_x = width / 2;

        let time = self.clock_text(now);
        let clock_scale = font::fit_scale(&time, layout.clock_scale, width);
        draw_text_centered(
            surface,
            &time,
            center_x,
            layout.clock_center_y,
            clock_scale,
            TEXT_WHITE,
        );

        let date = now.format("%A, %B %d, %Y").to_string();
        let date_scale = font::fit_scale(&date, layout.date_scale, width);
        draw_text_centered(surface, &date, center_x, layout.date_center_y, date_scale, TEXT_GRAY);

        let hint_scale = font::fit_scale(LOCKED_HINT, layout.hint_scale, width);
        draw_text_centered(
            surface,
            LOCKED_HINT,
            center_x,
            layout.hint_center_y,
            hint_scale,
            TEXT_DARK_GRAY,
        );
    }

    fn render_unlocked(&self, surface: &mut Surface, username: &str, reveal_secret: bool) {
        surface.fill(UNLOCKED_BACKGROUND);

        let width = surface.width() as i32;
        let layout = UnlockedLayout::new(surface.width(), surface.height());
        let center_x = width / 2;

        surface.fill_rect(layout.avatar, ACCENT_BLUE);
        draw_person(surface, layout.avatar);

        let name_scale = font::fit_scale(username, layout.name_scale, width);
        draw_text_centered(
            surface,
            username,
            center_x,
            layout.name_center_y,
            name_scale,
            TEXT_WHITE,
        );

        let input = layout.input;
        surface.fill_rect(input, TEXT_DARK_GRAY);
        let secret = if reveal_secret {
            SECRET_REVEALED
        } else {
            SECRET_MASKED
        };
        let (input_x, input_y) = input.center();
        let secret_scale = font::fit_scale(secret, input.height / 14, input.width * 3 / 4);
        draw_text_centered(surface, secret, input_x, input_y, secret_scale, TEXT_WHITE);

        draw_eye(surface, layout.reveal_toggle, reveal_secret);

        let hint_scale = font::fit_scale(&self.unlocked_hint, layout.hint_scale, width);
        draw_text_centered(
            surface,
            &self.unlocked_hint,
            center_x,
            layout.hint_center_y,
            hint_scale,
            TEXT_GRAY,
        );
    }
}

/// `chrono` pattern for the locked clock.
pub fn clock_pattern(format: DateFormat, show_seconds: bool) -> &'static str {
    match (format, show_seconds) {
        (DateFormat::Military, true) => "%H:%M:%S",
        (DateFormat::Military, false) => "%H:%M",
        (DateFormat::Standard, true) => "%I:%M:%S %p",
        (DateFormat::Standard, false) => "%I:%M %p",
    }
}

/// Hint under the unlocked view, phrased in whole minutes when possible.
pub fn idle_hint(idle_threshold_ms: u64) -> String {
    const MINUTE_MS: u64 = 60_000;
    let span = if idle_threshold_ms >= MINUTE_MS && idle_threshold_ms % MINUTE_MS == 0 {
        plural(idle_threshold_ms / MINUTE_MS, "minute")
    } else {
        plural(idle_threshold_ms.div_ceil(1_000), "second")
    };
    format!("Idle for {span} to lock, or ESC to return")
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Head and shoulders silhouette inside the avatar tile.
fn draw_person(surface: &mut Surface, avatar: Rect) {
    let (cx, _) = avatar.center();
    let size = avatar.width;

    let head_radius = (size / 7).max(1);
    surface.fill_circle(cx, avatar.y + size * 2 / 5, head_radius, TEXT_WHITE);

    let shoulders = Rect::new(cx - size / 4, avatar.y + size * 3 / 5, size / 2, size / 4);
    surface.fill_rect(shoulders, TEXT_WHITE);
}

/// Eye icon for the reveal toggle; the pupil lights up while the secret is shown.
fn draw_eye(surface: &mut Surface, toggle: Rect, revealed: bool) {
    let (cx, cy) = toggle.center();
    let radius = ((toggle.width.min(toggle.height) - 1) / 2).max(1);
    surface.fill_circle(cx, cy, radius, TEXT_GRAY);

    let pupil = if revealed { ACCENT_BLUE } else { TEXT_DARK_GRAY };
    surface.fill_circle(cx, cy, (radius / 2).max(1), pupil);
}
