//! Main application entry point.
//!
//! Parses the command line and dispatches to the interactive lock screen, the
//! simulate command, or the help and version output. Errors from any of them end the
//! process with a failure status after being logged.

use std::path::{Path, PathBuf};

use vivace::{
    Vivace,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::constants::EXIT_FAILURE,
    config, log_end, log_error_exit, log_indented,
};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowCommandHelp(command) => commands::help::run_help_command(Some(&command)),
        CliAction::Run {
            debug_enabled,
            config_dir,
            data_dir,
            log_file,
        } => config::set_config_dir(config_dir).and_then(|()| {
            Vivace::new(debug_enabled)
                .with_data_dir(data_dir.map(PathBuf::from))
                .with_log_file(log_file)
                .run()
        }),
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            data_dir,
            options,
        } => config::set_config_dir(config_dir).and_then(|()| {
            commands::simulate::handle_simulate_command(
                &options,
                data_dir.as_deref().map(Path::new),
                debug_enabled,
            )
        }),
    };

    if let Err(e) = result {
        log_error_exit!("{e}");
        for cause in e.chain().skip(1) {
            log_indented!("{cause}");
        }
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }
}
