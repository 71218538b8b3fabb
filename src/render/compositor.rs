//! Frame compositor: blends the source and target views during a transition.
//!
//! The incoming view slides in from below (unlocking) or from above (locking) while the
//! outgoing view slides out the opposite way, cross-fading over the base background.

use super::view::{ViewContext, ViewRenderer};
use super::Surface;
use crate::common::constants::BASE_BACKGROUND;
use crate::core::state::{AnimationDirection, AppState};

/// Offsets and opacities of both views at one point of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Clamped progress in `[0, 1]`.
    pub progress: f32,
    pub source_offset_y: i32,
    pub target_offset_y: i32,
    pub source_alpha: u8,
    pub target_alpha: u8,
}

impl ProgressSample {
    /// Pure function of direction, progress, and viewport height.
    ///
    /// Progress is clamped to `[0, 1]` before anything else; NaN counts as 0.
    pub fn compute(direction: AnimationDirection, progress: f32, height: u32) -> Self {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let sign = direction.travel_sign() as f32;
        if sign == 0.0 {
            return Self {
                progress: p,
                source_offset_y: 0,
                target_offset_y: 0,
                source_alpha: u8::MAX,
                target_alpha: u8::MAX,
            };
        }

        let h = height as f32;
        Self {
            progress: p,
            source_offset_y: (sign * h * p).round() as i32,
            target_offset_y: (-sign * h * (1.0 - p)).round() as i32,
            source_alpha: (255.0 * (1.0 - p)).round() as u8,
            target_alpha: (255.0 * p).round() as u8,
        }
    }
}

/// What a single presented frame shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// No transition; the view of this state fills the surface.
    Settled(AppState),
    Transition {
        source: AppState,
        target: AppState,
        sample: ProgressSample,
    },
}

/// Owns the scratch surfaces the two views are rendered into during a transition.
#[derive(Debug)]
pub struct Compositor {
    source: Surface,
    target: Surface,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            source: Surface::new(0, 0),
            target: Surface::new(0, 0),
        }
    }

    /// Render `frame` into `out`, whose dimensions define the viewport.
    pub fn compose(
        &mut self,
        out: &mut Surface,
        renderer: &dyn ViewRenderer,
        ctx: &ViewContext<'_>,
        frame: &Frame,
    ) {
        match *frame {
            Frame::Settled(state) => render_view(renderer, state, out, ctx),
            Frame::Transition {
                source,
                target,
                sample,
            } => {
                let (width, height) = (out.width(), out.height());
                if self.source.width() != width || self.source.height() != height {
                    self.source.resize(width, height);
                    self.target.resize(width, height);
                }

                render_view(renderer, source, &mut self.source, ctx);
                render_view(renderer, target, &mut self.target, ctx);

                out.fill(BASE_BACKGROUND);
                out.blend_from(&self.source, sample.source_offset_y, sample.source_alpha);
                out.blend_from(&self.target, sample.target_offset_y, sample.target_alpha);
            }
        }
    }
}

fn render_view(
    renderer: &dyn ViewRenderer,
    state: AppState,
    surface: &mut Surface,
    ctx: &ViewContext<'_>,
) {
    match state {
        AppState::Locked => renderer.render_locked(surface, &ctx.wall),
        AppState::Unlocked => renderer.render_unlocked(surface, ctx.username, ctx.reveal_secret),
    }
}
