//! Core lock screen logic, independent of any host.
//!
//! [`Core`] owns everything a running lock screen needs: the transition engine, the
//! idle tracker, the compositor with its renderer, and the session details shown in
//! the views. Hosts feed it input and timer events and ask it to render frames; it
//! never blocks, sleeps, or touches the terminal.
//!
//! Control flow for one host iteration:
//!
//! 1. Input events go to [`Core::handle_input`], which resets the idle clock and may
//!    start a transition or flip the reveal flag.
//! 2. When the [`Scheduler`] says the timer is due, [`Core::on_timer`] checks for idle
//!    auto-lock and schedules a redraw for the live clock.
//! 3. While [`Core::redraw_requested`] is set, the host calls [`Core::render`], which
//!    advances the animation and composes the frame.

pub mod idle;
pub mod input;
pub mod scheduler;
pub mod state;
pub mod transition;

use chrono::{DateTime, Local};

use crate::render::{
    Compositor, Frame, ProgressSample, Surface, UnlockedLayout, ViewContext, ViewRenderer,
};
use crate::time::Timestamp;

pub use idle::IdleTracker;
pub use input::{InputAction, InputEvent, Key};
pub use scheduler::Scheduler;
pub use state::{AnimationDirection, AppState};
pub use transition::{Tick, TransitionEngine};

/// Everything needed to build a [`Core`].
pub struct CoreParams {
    pub renderer: Box<dyn ViewRenderer>,
    pub username: String,
    pub animation_duration_ms: u64,
    pub idle_threshold_ms: u64,
    pub debug_enabled: bool,
}

/// Result of rendering one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOutcome {
    /// No transition was running; the view of this state was drawn.
    Settled(AppState),
    /// A transition frame was drawn at this progress.
    Animating { progress: f32 },
    /// The transition finished on this frame; this state is now current.
    Completed(AppState),
}

pub struct Core {
    engine: TransitionEngine,
    idle: IdleTracker,
    compositor: Compositor,
    renderer: Box<dyn ViewRenderer>,
    username: String,
    reveal_secret: bool,
    redraw: bool,
    debug_enabled: bool,
}

impl Core {
    /// Create a locked, settled core. The first frame is already requested.
    pub fn new(params: CoreParams, now: Timestamp) -> Self {
        Self {
            engine: TransitionEngine::new(params.animation_duration_ms),
            idle: IdleTracker::new(params.idle_threshold_ms, now),
            compositor: Compositor::new(),
            renderer: params.renderer,
            username: params.username,
            reveal_secret: false,
            redraw: true,
            debug_enabled: params.debug_enabled,
        }
    }

    pub fn state(&self) -> AppState {
        self.engine.current()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn idle_tracker(&self) -> &IdleTracker {
        &self.idle
    }

    pub fn reveal_secret(&self) -> bool {
        self.reveal_secret
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the host should render a frame at its next opportunity.
    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    /// Force a redraw, e.g. after the viewport was resized.
    pub fn invalidate(&mut self) {
        self.redraw = true;
    }

    /// Apply one input event. `viewport` is the surface size used for hit testing.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        now: Timestamp,
        viewport: (u32, u32),
    ) -> InputAction {
        self.idle.record_input(now);

        let layout = UnlockedLayout::new(viewport.0, viewport.1);
        let action = input::interpret(
            event,
            self.engine.current(),
            self.engine.is_animating(),
            &layout,
        );

        match action {
            InputAction::Ignore => {}
            InputAction::Request(target) => self.request(target, now),
            InputAction::ToggleReveal => {
                self.reveal_secret = !self.reveal_secret;
                self.redraw = true;
                if self.debug_enabled {
                    log_debug!(
                        "Secret {}",
                        if self.reveal_secret { "revealed" } else { "masked" }
                    );
                }
            }
        }

        action
    }

    /// Periodic timer tick. Returns `true` if the idle auto-lock fired.
    ///
    /// The live clock needs repainting every period, so a redraw is always requested.
    pub fn on_timer(&mut self, now: Timestamp) -> bool {
        self.redraw = true;

        if self.engine.is_animating()
            || self.engine.current() != AppState::Unlocked
            || !self.idle.is_idle(now)
        {
            return false;
        }

        log_decorated!("Idle for {}s, locking", self.idle.idle_for(now) / 1000);
        self.request(AppState::Locked, now);
        true
    }

    /// Advance the animation to `now` and draw the resulting frame into `out`.
    ///
    /// A transition frame keeps the redraw request alive; the frame that completes a
    /// transition requests exactly one more, which draws the settled view.
    pub fn render(
        &mut self,
        now: Timestamp,
        wall: DateTime<Local>,
        out: &mut Surface,
    ) -> RenderOutcome {
        self.redraw = false;

        let animation = self.engine.animation().copied();
        let tick = self.engine.tick(now);

        let (frame, outcome) = match animation {
            None => {
                let current = self.engine.current();
                (Frame::Settled(current), RenderOutcome::Settled(current))
            }
            Some(animation) => {
                self.redraw = true;
                let sample =
                    ProgressSample::compute(animation.direction, tick.progress, out.height());
                let frame = Frame::Transition {
                    source: animation.source,
                    target: animation.target,
                    sample,
                };
                let outcome = if tick.completed {
                    log_decorated!("Now {}", animation.target);
                    RenderOutcome::Completed(animation.target)
                } else {
                    RenderOutcome::Animating {
                        progress: tick.progress,
                    }
                };
                (frame, outcome)
            }
        };

        let ctx = ViewContext {
            wall,
            username: &self.username,
            reveal_secret: self.reveal_secret,
        };
        self.compositor.compose(out, self.renderer.as_ref(), &ctx, &frame);

        outcome
    }

    fn request(&mut self, target: AppState, now: Timestamp) {
        let retarget = self.engine.is_animating();
        if !self.engine.request_state(target, now) {
            return;
        }
        self.redraw = true;

        log_block_start!("{} → {}", self.engine.current(), target);
        if retarget {
            log_indented!("Restarted the running transition");
        }
        if self.debug_enabled {
            log_debug!("Transition takes {}ms", self.engine.duration_ms());
        }
    }
}
