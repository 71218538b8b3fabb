//! Interactive terminal host.
//!
//! Runs the lock screen fullscreen in the alternate screen buffer. The loop blocks in
//! `crossterm::event::poll` until the scheduler's next deadline, feeds input into the
//! [`Core`], fires the periodic timer, and presents a frame whenever one is requested.

pub mod presenter;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use crossterm::terminal;
use std::io;

use crate::common::utils::TerminalGuard;
use crate::core::{Core, InputEvent, Key, Scheduler};
use crate::io::signals::SignalState;
use crate::render::Surface;
use crate::time::source;

pub use presenter::{Presenter, cell_to_pixel, surface_size};

/// Terminal event translated for the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Input(InputEvent),
    Resize { cols: u16, rows: u16 },
    Quit,
    Ignore,
}

/// Map one crossterm event. Only key presses count; releases and repeats are ignored.
pub fn map_event(event: &Event) -> HostEvent {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return HostEvent::Ignore;
            }
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q')
                    if key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    HostEvent::Quit
                }
                KeyCode::Esc => HostEvent::Input(InputEvent::Key(Key::Escape)),
                _ => HostEvent::Input(InputEvent::Key(Key::Other)),
            }
        }
        Event::Mouse(mouse) => {
            let (x, y) = cell_to_pixel(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(_) => HostEvent::Input(InputEvent::Click { x, y }),
                MouseEventKind::Up(_) => HostEvent::Ignore,
                _ => HostEvent::Input(InputEvent::PointerMove { x, y }),
            }
        }
        Event::Resize(cols, rows) => HostEvent::Resize {
            cols: *cols,
            rows: *rows,
        },
        _ => HostEvent::Ignore,
    }
}

/// Run the lock screen until the user quits or a shutdown signal arrives.
///
/// The terminal is restored before this returns, on success and on error.
pub fn run(
    mut core: Core,
    mut scheduler: Scheduler,
    signal_state: &SignalState,
    debug_enabled: bool,
) -> Result<()> {
    let _guard = TerminalGuard::new().context("failed to take over the terminal")?;

    let (cols, rows) = terminal::size().context("failed to query the terminal size")?;
    let (width, height) = surface_size(cols, rows);
    let mut surface = Surface::new(width, height);
    let mut presenter = Presenter::new();
    let mut stdout = io::stdout();

    if debug_enabled {
        log_debug!("Terminal {cols}x{rows}, surface {width}x{height}");
    }

    while signal_state.is_running() {
        if signal_state.shutdown_requested() {
            break;
        }

        let now = source::monotonic();
        if scheduler.timer_due(now) {
            core.on_timer(now);
        }

        if core.redraw_requested() {
            core.render(now, source::now(), &mut surface);
            presenter
                .present(&mut stdout, &surface)
                .context("failed to draw the frame")?;
        }

        let wait = scheduler.next_wakeup(source::monotonic(), core.redraw_requested());
        if !event::poll(wait).context("failed to poll terminal events")? {
            continue;
        }

        let event = event::read().context("failed to read terminal event")?;
        match map_event(&event) {
            HostEvent::Input(input) => {
                let viewport = (surface.width(), surface.height());
                core.handle_input(input, source::monotonic(), viewport);
            }
            HostEvent::Resize { cols, rows } => {
                let (width, height) = surface_size(cols, rows);
                surface.resize(width, height);
                presenter.reset();
                core.invalidate();
                if debug_enabled {
                    log_debug!("Resized to {cols}x{rows}");
                }
            }
            HostEvent::Quit => {
                log_block_start!("Quit requested");
                break;
            }
            HostEvent::Ignore => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseButton, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        for c in ['c', 'q'] {
            assert_eq!(
                map_event(&key(KeyCode::Char(c), KeyModifiers::CONTROL)),
                HostEvent::Quit
            );
        }
        assert_eq!(
            map_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            HostEvent::Input(InputEvent::Key(Key::Other))
        );
    }

    #[test]
    fn test_escape_and_other_keys() {
        assert_eq!(
            map_event(&key(KeyCode::Esc, KeyModifiers::NONE)),
            HostEvent::Input(InputEvent::Key(Key::Escape))
        );
        assert_eq!(
            map_event(&key(KeyCode::Enter, KeyModifiers::NONE)),
            HostEvent::Input(InputEvent::Key(Key::Other))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(map_event(&release), HostEvent::Ignore);
    }

    #[test]
    fn test_mouse_maps_to_top_pixel_of_cell() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left), 7, 4)),
            HostEvent::Input(InputEvent::Click { x: 7, y: 8 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Moved, 1, 1)),
            HostEvent::Input(InputEvent::PointerMove { x: 1, y: 2 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            HostEvent::Input(InputEvent::PointerMove { x: 0, y: 0 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Up(MouseButton::Left), 7, 4)),
            HostEvent::Ignore
        );
    }

    #[test]
    fn test_resize_and_focus() {
        assert_eq!(
            map_event(&Event::Resize(100, 30)),
            HostEvent::Resize { cols: 100, rows: 30 }
        );
        assert_eq!(map_event(&Event::FocusGained), HostEvent::Ignore);
    }
}
