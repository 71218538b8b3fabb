//! Shared helpers: path display and terminal state management.

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, IsTerminal};
use std::path::Path;

/// Render a path for logs with the home directory replaced by `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

/// RAII guard that puts the terminal into fullscreen raw mode and restores it on drop.
///
/// Raw mode, the alternate screen, a hidden cursor, and mouse capture are all undone in
/// reverse order when the guard goes out of scope, including on early error returns.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enter fullscreen mode. Fails when stdout is not a terminal.
    pub fn new() -> Result<Self> {
        if !io::stdout().is_terminal() {
            anyhow::bail!("stdout is not a terminal");
        }

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("failed to enter the alternate screen");
        }

        Ok(Self { active: true })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_path_outside_home() {
        let path = Path::new("/definitely/not/home/file.txt");
        assert_eq!(private_path(path), "/definitely/not/home/file.txt");
    }

    #[test]
    fn test_private_path_inside_home() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".config").join("vivace");
            assert_eq!(private_path(&path), "~/.config/vivace");
            assert_eq!(private_path(&home), "~");
        }
    }
}
