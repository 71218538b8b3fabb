//! Unix signal handling.
//!
//! A background thread waits for SIGINT, SIGTERM, and SIGHUP. On any of them it clears
//! the shared `running` flag and forwards a [`SignalMessage`] so a host blocked on its
//! channel wakes up immediately.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender, channel},
    thread,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// SIGINT, SIGTERM, or SIGHUP arrived.
    Shutdown { signal: i32 },
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Cleared once a shutdown signal arrives.
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Drain pending messages without blocking. Returns true if shutdown was requested.
    pub fn shutdown_requested(&self) -> bool {
        let mut requested = !self.is_running();
        while let Ok(SignalMessage::Shutdown { .. }) = self.signal_receiver.try_recv() {
            requested = true;
        }
        requested
    }
}

fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "signal",
    }
}

/// Register the handlers and spawn the listener thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = channel::<SignalMessage>();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running_clone = running.clone();
    let signal_sender_clone = signal_sender.clone();

    thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            log_pipe!();
            if debug_enabled {
                log_info!(
                    "Received {} ({signal}), initiating graceful shutdown...",
                    signal_name(signal)
                );
            } else {
                log_info!("Received {}, initiating graceful shutdown...", signal_name(signal));
            }

            running_clone.store(false, Ordering::SeqCst);
            // The host may already be gone; the flag alone is enough then.
            let _ = signal_sender_clone.send(SignalMessage::Shutdown { signal });
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
        signal_sender,
    })
}
