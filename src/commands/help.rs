//! Help command implementation for vivace.
//!
//! Dispatches `vivace help [COMMAND]` to the command-specific help text, falling back
//! to the general usage.

use anyhow::Result;

/// Run the help command.
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => crate::args::display_help(),
        Some("simulate") | Some("sim") => super::simulate::display_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            crate::args::display_help();
        }
    }
    Ok(())
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: vivace help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("vivace help");
    log_indented!("vivace help simulate");
    log_end!();
}
