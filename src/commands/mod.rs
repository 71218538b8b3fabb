//! Command-line command handlers for vivace.
//!
//! The interactive lock screen is the default action and lives in [`crate::vivace`];
//! the modules here implement the subcommands.

pub mod help;
pub mod simulate;
