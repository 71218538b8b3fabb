//! Structured logging with vivace's box-drawing output style.
//!
//! Every line is routed through [`write_output`], which either prints to stdout or, once
//! [`Log::start_file_logging`] has been called, forwards the line to a background writer
//! thread with ANSI colors stripped. The interactive terminal host owns the screen while
//! it runs, so it either disables logging or routes it to a file.
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (`┃` spacer, then `┣ message`).
//! - `log_decorated!` continues a block (`┣ message`).
//! - `log_indented!` lists details under the previous line (`┃   message`).
//! - `log_pipe!` inserts a spacer line, usually before a level-prefixed message.
//! - `log_version!` / `log_end!` frame the whole run.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!` carry a
//!   `[LEVEL]` tag; `log_error_exit!` closes the frame on a fatal error.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Shape of a single log line.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Decorated,
    Indented,
    Pipe,
    BlockStart,
    Version,
    End,
    Level(Level),
    ErrorExit,
}

/// Severity tag for level-prefixed lines.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32mINFO\x1b[0m",
            Level::Debug => "\x1b[32mDEBUG\x1b[0m",
            Level::Warning => "\x1b[33mWARNING\x1b[0m",
            Level::Error => "\x1b[31mERROR\x1b[0m",
        }
    }
}

/// Logging control surface.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Route all further output to `file_path` instead of stdout.
    ///
    /// The returned guard flushes and joins the writer thread when dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Timestamp prefix shown while running on simulated time, e.g. `[+12.500s] `.
    ///
    /// Real-time runs get no prefix.
    pub fn timestamp_prefix() -> String {
        if crate::time::source::is_initialized() && crate::time::source::is_simulated() {
            let elapsed = crate::time::source::monotonic().as_millis();
            format!("[+{}.{:03}s] ", elapsed / 1000, elapsed % 1000)
        } else {
            String::new()
        }
    }
}

/// Guard for file logging that ensures clean shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Build the full text for one log line, including the trailing newline.
pub fn format_line(line: Line, message: &str) -> String {
    let prefix = Log::timestamp_prefix();
    match line {
        Line::Decorated => format!("{prefix}┣ {message}\n"),
        Line::Indented => format!("{prefix}┃   {message}\n"),
        Line::Pipe => format!("{prefix}┃\n"),
        Line::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
        Line::Version => format!(
            "{prefix}┏ vivace v{} ━━╸\n",
            env!("CARGO_PKG_VERSION")
        ),
        Line::End => format!("{prefix}╹\n"),
        Line::Level(level) => format!("{prefix}┣[{}] {message}\n", level.tag()),
        Line::ErrorExit => format!(
            "{prefix}┃\n{prefix}┗[{}] {message}\n",
            Level::Error.tag()
        ),
    }
}

/// Emit one line if logging is enabled. Used by the macros.
pub fn emit(line: Line, message: &str) {
    if Log::is_enabled() {
        write_output(&format_line(line, message));
    }
}

pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __vivace_log {
    ($line:expr, $fmt:literal $($arg:tt)*) => {{
        if $crate::common::logger::Log::is_enabled() {
            $crate::common::logger::emit($line, &format!($fmt $($arg)*));
        }
    }};
    ($line:expr, $expr:expr) => {{
        if $crate::common::logger::Log::is_enabled() {
            $crate::common::logger::emit($line, &format!("{}", $expr));
        }
    }};
}

/// Log a message that continues the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {
        $crate::__vivace_log!($crate::common::logger::Line::Decorated, $($arg)+)
    };
}

/// Log a detail line nested under the previous message.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {
        $crate::__vivace_log!($crate::common::logger::Line::Indented, $($arg)+)
    };
}

/// Log an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::common::logger::emit($crate::common::logger::Line::Pipe, "")
    };
}

/// Log the first line of a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {
        $crate::__vivace_log!($crate::common::logger::Line::BlockStart, $($arg)+)
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::emit($crate::common::logger::Line::Version, "")
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::emit($crate::common::logger::Line::End, "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__vivace_log!(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Info),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__vivace_log!(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Debug),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__vivace_log!(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Warning),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__vivace_log!(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Error),
            $($arg)+
        )
    };
}

/// Log a fatal error and close the log frame.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {
        $crate::__vivace_log!($crate::common::logger::Line::ErrorExit, $($arg)+)
    };
}
