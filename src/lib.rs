//! # Vivace Library
//!
//! Internal library for the vivace binary: a lock screen simulator that animates
//! between a locked clock view and an unlocked login view.
//!
//! This library exists to enable testing of the internals and to keep CLI dispatch
//! (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Vivace` struct runs the interactive lock screen with resource management
//! - **Core Logic**: `core` module with the transition engine, idle tracking, input policy,
//!   and the `Core` composition root
//! - **Rendering**: `render` module with the software surface, views, and compositor
//! - **Hosts**: `terminal` (interactive, crossterm) and `commands::simulate` (headless)
//! - **Configuration**: `config` module for TOML-based settings
//! - **Infrastructure**: Signal handling, instance lock, session detection, logging,
//!   and the time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod render;
pub mod terminal;
pub mod time;

mod vivace;

pub use vivace::Vivace;
