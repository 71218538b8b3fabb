//! Command-line argument parsing and processing.
//!
//! Supports the interactive run (default), the `simulate` subcommand, and the usual
//! help and version flags. Problems are reported with `log_warning!` and turn into
//! [`CliAction::ShowHelpDueToError`] rather than an error value, so `main` always has a
//! single action to dispatch on.

/// Options of the `simulate` subcommand. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulateArgs {
    /// Event script, e.g. `"1000:click, 4000:esc"`.
    pub script: Option<String>,
    /// Simulated milliseconds to run for.
    pub until_ms: Option<u64>,
    /// Surface size in pixels.
    pub size: Option<(u32, u32)>,
    /// Directory to write PNG frames into.
    pub frames_dir: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the interactive lock screen in the terminal
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        data_dir: Option<String>,
        log_file: Option<String>,
    },
    /// Drive the lock screen headlessly on simulated time
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        data_dir: Option<String>,
        options: SimulateArgs,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display help for one command and exit
    ShowCommandHelp(String),
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Simulate,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "simulate" | "sim" => Some(Command::Simulate),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `160x90`. Both sides must be positive.
pub fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once(['x', 'X'])?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

impl ParsedArgs {
    /// Parse the arguments of the current process.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }

    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Global flags may appear
    /// before or after the command.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        ParsedArgs {
            action: parse_action(&args_vec),
        }
    }
}

fn parse_action(args: &[String]) -> CliAction {
    let mut debug_enabled = false;
    let mut display_help = false;
    let mut display_version = false;
    let mut invalid = false;
    let mut config_dir = None;
    let mut data_dir = None;
    let mut log_file = None;
    let mut command: Option<Command> = None;
    let mut help_topic: Option<String> = None;
    let mut simulate = SimulateArgs::default();
    let mut simulate_flag_used: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        // Flags that take a value consume the next argument.
        let value = |i: &mut usize, usage: &str| -> Option<String> {
            match args.get(*i + 1) {
                Some(next) if !next.starts_with('-') => {
                    *i += 1;
                    Some(next.clone())
                }
                _ => {
                    log_warning!("Missing value for {arg}. Usage: {arg} {usage}");
                    None
                }
            }
        };

        match arg {
            "--help" | "-h" => display_help = true,
            "--version" | "-V" | "-v" => display_version = true,
            "--debug" | "-d" => debug_enabled = true,
            "--config" | "-c" => match value(&mut i, "<directory>") {
                Some(dir) => config_dir = Some(dir),
                None => invalid = true,
            },
            "--data-dir" => match value(&mut i, "<directory>") {
                Some(dir) => data_dir = Some(dir),
                None => invalid = true,
            },
            "--log" | "-l" => match value(&mut i, "<file>") {
                Some(file) => log_file = Some(file),
                None => invalid = true,
            },
            "--script" | "-s" => {
                simulate_flag_used = Some("--script");
                match value(&mut i, "\"<ms>:<event>, ...\"") {
                    Some(script) => simulate.script = Some(script),
                    None => invalid = true,
                }
            }
            "--until" | "-u" => {
                simulate_flag_used = Some("--until");
                match value(&mut i, "<milliseconds>") {
                    Some(raw) => match raw.parse::<u64>() {
                        Ok(ms) if ms > 0 => simulate.until_ms = Some(ms),
                        _ => {
                            log_warning!("Invalid --until value: {raw}. Use a positive number of milliseconds");
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                }
            }
            "--size" => {
                simulate_flag_used = Some("--size");
                match value(&mut i, "<width>x<height>") {
                    Some(raw) => match parse_size(&raw) {
                        Some(size) => simulate.size = Some(size),
                        None => {
                            log_warning!("Invalid --size value: {raw}. Use WIDTHxHEIGHT, e.g. 160x90");
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                }
            }
            "--frames" | "-f" => {
                simulate_flag_used = Some("--frames");
                match value(&mut i, "<directory>") {
                    Some(dir) => simulate.frames_dir = Some(dir),
                    None => invalid = true,
                }
            }
            _ if arg.starts_with('-') => {
                log_warning!("Unknown option: {arg}");
                invalid = true;
            }
            _ => match (command, Command::from_arg(arg)) {
                (None, Some(parsed)) => command = Some(parsed),
                (Some(Command::Help), _) if help_topic.is_none() => {
                    help_topic = Some(arg.to_string());
                }
                (None, None) => {
                    log_warning!("Unknown command: {arg}");
                    invalid = true;
                }
                (Some(_), _) => {
                    log_warning!("Unexpected argument: {arg}");
                    invalid = true;
                }
            },
        }
        i += 1;
    }

    if let Some(flag) = simulate_flag_used
        && command != Some(Command::Simulate)
        && !invalid
    {
        log_warning!("{flag} is only valid with the simulate command");
        invalid = true;
    }

    if display_version {
        CliAction::ShowVersion
    } else if invalid {
        CliAction::ShowHelpDueToError
    } else if display_help {
        match command {
            Some(Command::Simulate) => CliAction::ShowCommandHelp("simulate".to_string()),
            _ => CliAction::ShowHelp,
        }
    } else {
        match command {
            Some(Command::Help) => match help_topic {
                Some(topic) => CliAction::ShowCommandHelp(topic),
                None => CliAction::ShowHelp,
            },
            Some(Command::Simulate) => CliAction::Simulate {
                debug_enabled,
                config_dir,
                data_dir,
                options: simulate,
            },
            None => CliAction::Run {
                debug_enabled,
                config_dir,
                data_dir,
                log_file,
            },
        }
    }
}

/// Display version information.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Display the general usage text.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("vivace [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("    --data-dir <dir>   Keep the password marker under this directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-l, --log <file>       Keep logging to a file while the screen is shown");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_indented!("simulate, sim          Run headlessly on a simulated clock");
    log_block_start!("Controls:");
    log_indented!("Click or any key       Unlock");
    log_indented!("Esc                    Lock again");
    log_indented!("Ctrl+C, Ctrl+Q         Quit");
    log_end!();
}
