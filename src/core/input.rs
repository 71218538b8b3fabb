//! Host-neutral input events and the policy that maps them onto state requests.

use crate::core::state::AppState;
use crate::render::UnlockedLayout;

/// Keys the policy distinguishes. Everything except Escape behaves the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// A single user input, in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerMove { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    Key(Key),
}

/// What an input asks the core to do, beyond resetting the idle clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Ignore,
    Request(AppState),
    ToggleReveal,
}

/// Decide the effect of `event` given the logical state.
///
/// - Click or key on the locked view unlocks, unless a transition is already running.
/// - Escape on the unlocked view relocks, even mid-animation.
/// - A click on the reveal toggle of the unlocked view flips the secret.
/// - Pointer movement only counts as activity.
pub fn interpret(
    event: InputEvent,
    current: AppState,
    animating: bool,
    layout: &UnlockedLayout,
) -> InputAction {
    match (current, event) {
        (_, InputEvent::PointerMove { .. }) => InputAction::Ignore,
        (AppState::Locked, InputEvent::Click { .. } | InputEvent::Key(_)) => {
            if animating {
                InputAction::Ignore
            } else {
                InputAction::Request(AppState::Unlocked)
            }
        }
        (AppState::Unlocked, InputEvent::Key(Key::Escape)) => {
            InputAction::Request(AppState::Locked)
        }
        (AppState::Unlocked, InputEvent::Key(Key::Other)) => InputAction::Ignore,
        (AppState::Unlocked, InputEvent::Click { x, y }) => {
            if layout.hits_reveal_toggle(x, y) {
                InputAction::ToggleReveal
            } else {
                InputAction::Ignore
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> UnlockedLayout {
        UnlockedLayout::new(160, 90)
    }

    fn toggle_click() -> InputEvent {
        let (x, y) = layout().reveal_toggle.center();
        InputEvent::Click { x, y }
    }

    #[test]
    fn test_locked_unlocks_on_click_or_key() {
        let layout = layout();
        for event in [
            InputEvent::Click { x: 0, y: 0 },
            InputEvent::Key(Key::Other),
            InputEvent::Key(Key::Escape),
            toggle_click(),
        ] {
            assert_eq!(
                interpret(event, AppState::Locked, false, &layout),
                InputAction::Request(AppState::Unlocked),
                "{event:?}"
            );
        }
    }

    #[test]
    fn test_locked_ignores_input_while_animating() {
        let layout = layout();
        assert_eq!(
            interpret(InputEvent::Key(Key::Other), AppState::Locked, true, &layout),
            InputAction::Ignore
        );
        assert_eq!(
            interpret(InputEvent::Click { x: 5, y: 5 }, AppState::Locked, true, &layout),
            InputAction::Ignore
        );
    }

    #[test]
    fn test_escape_relocks_even_mid_animation() {
        let layout = layout();
        for animating in [false, true] {
            assert_eq!(
                interpret(InputEvent::Key(Key::Escape), AppState::Unlocked, animating, &layout),
                InputAction::Request(AppState::Locked)
            );
        }
        assert_eq!(
            interpret(InputEvent::Key(Key::Other), AppState::Unlocked, false, &layout),
            InputAction::Ignore
        );
    }

    #[test]
    fn test_reveal_toggle_hit_test() {
        let layout = layout();
        assert_eq!(
            interpret(toggle_click(), AppState::Unlocked, false, &layout),
            InputAction::ToggleReveal
        );
        assert_eq!(
            interpret(InputEvent::Click { x: 0, y: 0 }, AppState::Unlocked, false, &layout),
            InputAction::Ignore
        );
    }

    #[test]
    fn test_pointer_move_never_changes_state() {
        let layout = layout();
        for current in [AppState::Locked, AppState::Unlocked] {
            assert_eq!(
                interpret(InputEvent::PointerMove { x: 1, y: 1 }, current, false, &layout),
                InputAction::Ignore
            );
        }
    }
}
