//! Transition engine: the locked/unlocked state machine and its animation clock.
//!
//! The engine owns the authoritative [`AppState`] plus an optional in-flight
//! [`Animation`]. Progress is linear in elapsed time (no easing) and is computed on
//! demand from the timestamp passed to [`TransitionEngine::tick`], so the engine has
//! no timer of its own and behaves identically under real and simulated time.
//!
//! Retargeting mid-animation restarts from the logical `current` state, not from the
//! visually interpolated position, so a second request before completion produces a
//! visible snap back to the start of the new animation.

use crate::common::constants::DEFAULT_ANIMATION_DURATION_MS;
use crate::core::state::{AnimationDirection, AppState};
use crate::time::Timestamp;

/// Snapshot of a running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub source: AppState,
    pub target: AppState,
    pub direction: AnimationDirection,
    pub start: Timestamp,
}

/// Result of advancing the engine to a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Animation progress in `[0, 1]`; `1.0` when nothing is animating.
    pub progress: f32,
    /// True exactly once per animation: on the tick that finished it.
    pub completed: bool,
}

impl Tick {
    const SETTLED: Tick = Tick {
        progress: 1.0,
        completed: false,
    };
}

/// Locked/unlocked state machine with a time-driven transition animation.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    current: AppState,
    animation: Option<Animation>,
    duration_ms: u64,
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DURATION_MS)
    }
}

impl TransitionEngine {
    /// Create an engine in the `Locked` state.
    ///
    /// A zero duration is a programming error; release builds clamp it to 1ms so the
    /// progress division stays defined.
    pub fn new(duration_ms: u64) -> Self {
        debug_assert!(duration_ms > 0, "animation duration must be non-zero");
        Self {
            current: AppState::Locked,
            animation: None,
            duration_ms: duration_ms.max(1),
        }
    }

    /// The state that is authoritative once any running animation completes.
    pub fn current(&self) -> AppState {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Direction of the running animation, `None` when settled.
    pub fn direction(&self) -> AnimationDirection {
        self.animation
            .map_or(AnimationDirection::None, |animation| animation.direction)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Ask for `requested` to become the displayed state.
    ///
    /// Returns `true` when an animation was (re)started. Requesting the current state
    /// is a no-op, including while an animation toward the other state is running:
    /// starting one would have identical source and target.
    pub fn request_state(&mut self, requested: AppState, now: Timestamp) -> bool {
        if requested == self.current {
            return false;
        }

        let source = self.current;
        self.animation = Some(Animation {
            source,
            target: requested,
            direction: AnimationDirection::between(source, requested),
            start: now,
        });
        true
    }

    /// Advance to `now`, completing the animation once its duration has elapsed.
    pub fn tick(&mut self, now: Timestamp) -> Tick {
        let Some(animation) = self.animation else {
            return Tick::SETTLED;
        };

        let raw = self.raw_progress(&animation, now);
        if raw >= 1.0 {
            self.current = animation.target;
            self.animation = None;
            return Tick {
                progress: 1.0,
                completed: true,
            };
        }

        Tick {
            progress: raw,
            completed: false,
        }
    }

    /// Progress at `now` without completing anything. `1.0` when settled.
    pub fn progress_at(&self, now: Timestamp) -> f32 {
        self.animation.map_or(1.0, |animation| {
            self.raw_progress(&animation, now).min(1.0)
        })
    }

    /// Unclamped progress; only the completion check looks past 1.0.
    fn raw_progress(&self, animation: &Animation, now: Timestamp) -> f32 {
        now.saturating_since(animation.start) as f32 / self.duration_ms as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_starts_locked_and_settled() {
        let engine = TransitionEngine::default();
        assert_eq!(engine.current(), AppState::Locked);
        assert!(!engine.is_animating());
        assert_eq!(engine.direction(), AnimationDirection::None);
        assert_eq!(engine.duration_ms(), 500);
    }

    #[test]
    fn test_tick_when_settled_is_trivial() {
        let mut engine = TransitionEngine::default();
        for ms in [0, 1, 499, 500, 1_000_000] {
            let tick = engine.tick(at(ms));
            assert_eq!(tick.progress, 1.0);
            assert!(!tick.completed);
            assert_eq!(engine.current(), AppState::Locked);
        }
    }

    #[test]
    fn test_request_current_state_is_noop() {
        let mut engine = TransitionEngine::default();
        let before = engine.clone();

        assert!(!engine.request_state(AppState::Locked, at(42)));
        assert_eq!(engine.current(), before.current());
        assert_eq!(engine.animation(), before.animation());
    }

    #[test]
    fn test_request_starts_animation() {
        let mut engine = TransitionEngine::default();
        assert!(engine.request_state(AppState::Unlocked, at(100)));

        let animation = *engine.animation().unwrap();
        assert_eq!(animation.source, AppState::Locked);
        assert_eq!(animation.target, AppState::Unlocked);
        assert_eq!(animation.direction, AnimationDirection::LockedToUnlocked);
        assert_eq!(animation.start, at(100));
        assert_eq!(engine.progress_at(at(100)), 0.0);
        // Logical state only changes on completion.
        assert_eq!(engine.current(), AppState::Locked);
    }

    #[test]
    fn test_unlock_scenario() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(0));

        let mid = engine.tick(at(250));
        assert!((mid.progress - 0.5).abs() < f32::EPSILON);
        assert!(!mid.completed);
        assert_eq!(engine.current(), AppState::Locked);

        let done = engine.tick(at(500));
        assert_eq!(done.progress, 1.0);
        assert!(done.completed);
        assert_eq!(engine.current(), AppState::Unlocked);
        assert!(!engine.is_animating());
        assert_eq!(engine.direction(), AnimationDirection::None);

        let after = engine.tick(at(501));
        assert_eq!(after, Tick::SETTLED);
    }

    #[test]
    fn test_late_tick_completes_in_one_step() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(0));
        let tick = engine.tick(at(10_000));
        assert!(tick.completed);
        assert_eq!(tick.progress, 1.0);
    }

    #[test]
    fn test_tick_before_start_reports_zero() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(1_000));
        let tick = engine.tick(at(900));
        assert_eq!(tick.progress, 0.0);
        assert!(!tick.completed);
    }

    #[test]
    fn test_relock_direction() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(0));
        engine.tick(at(500));

        assert!(engine.request_state(AppState::Locked, at(600)));
        assert_eq!(engine.direction(), AnimationDirection::UnlockedToLocked);
        assert_eq!(engine.animation().unwrap().source, AppState::Unlocked);
    }

    #[test]
    fn test_retarget_mid_animation_restarts_from_logical_state() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(0));
        engine.tick(at(300));

        // Second request for the same target restarts the clock from `current`.
        assert!(engine.request_state(AppState::Unlocked, at(300)));
        let animation = *engine.animation().unwrap();
        assert_eq!(animation.source, AppState::Locked);
        assert_eq!(animation.start, at(300));
        assert_eq!(engine.progress_at(at(300)), 0.0);
    }

    #[test]
    fn test_request_current_state_mid_animation_keeps_running() {
        let mut engine = TransitionEngine::default();
        engine.request_state(AppState::Unlocked, at(0));

        assert!(!engine.request_state(AppState::Locked, at(200)));
        let animation = *engine.animation().unwrap();
        assert_eq!(animation.target, AppState::Unlocked);
        assert_eq!(animation.start, at(0));
    }

    #[test]
    fn test_custom_duration() {
        let mut engine = TransitionEngine::new(2_000);
        engine.request_state(AppState::Unlocked, at(0));
        assert!((engine.tick(at(500)).progress - 0.25).abs() < f32::EPSILON);
        assert!(!engine.tick(at(1_999)).completed);
        assert!(engine.tick(at(2_000)).completed);
    }
}
