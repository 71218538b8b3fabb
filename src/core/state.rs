//! Lock screen states and the animation direction between them.

use std::fmt;

/// Which view the lock screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Clock view; any click or key starts unlocking.
    Locked,
    /// Fake login view with avatar, username, and password box.
    Unlocked,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Locked => "locked",
            AppState::Unlocked => "unlocked",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a running transition animation.
///
/// Locked → Unlocked slides both views up (the locked view leaves through the top,
/// the unlocked view enters from the bottom); Unlocked → Locked slides them down.
/// Both directions fade the source out and the target in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationDirection {
    None,
    LockedToUnlocked,
    UnlockedToLocked,
}

impl AnimationDirection {
    /// Direction for a `(source, target)` pair. Equal states have no direction.
    pub const fn between(source: AppState, target: AppState) -> Self {
        match (source, target) {
            (AppState::Locked, AppState::Unlocked) => AnimationDirection::LockedToUnlocked,
            (AppState::Unlocked, AppState::Locked) => AnimationDirection::UnlockedToLocked,
            (AppState::Locked, AppState::Locked) | (AppState::Unlocked, AppState::Unlocked) => {
                AnimationDirection::None
            }
        }
    }

    /// Vertical travel sign: -1 when views move up, +1 when they move down.
    pub const fn travel_sign(&self) -> i32 {
        match self {
            AnimationDirection::LockedToUnlocked => -1,
            AnimationDirection::UnlockedToLocked => 1,
            AnimationDirection::None => 0,
        }
    }
}

impl fmt::Display for AnimationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnimationDirection::None => "none",
            AnimationDirection::LockedToUnlocked => "locked → unlocked",
            AnimationDirection::UnlockedToLocked => "unlocked → locked",
        };
        f.write_str(label)
    }
}
