//! Command-line argument parsing and help for folder-search.
//!
//! Long flags are accepted with one or two leading dashes (`-dir` and `--dir`).
//! A flag value may follow as the next argument or after `=` (`-dir=/tmp`).
//!
//! When invoked with no args/flags (fds), folder-search starts in the current directory.

use crate::config::Config;

/// What the entry point should do after parsing the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CliAction {
    Run(CliArgs),
    Exit,
    /// Bad command line; exit with a usage error.
    Invalid,
}

/// Flags that shape the browsing session. `None` leaves the config value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliArgs {
    pub(crate) dir: String,
    pub(crate) name: Option<String>,
    pub(crate) case_sensitive: Option<bool>,
    pub(crate) strict: Option<bool>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            name: None,
            case_sensitive: None,
            strict: None,
        }
    }
}

/// Result of parsing without side effects.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Parsed {
    Run(CliArgs),
    Help,
    Version,
    Init,
    Invalid(String),
}

pub(crate) fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        Parsed::Run(cli) => CliAction::Run(cli),
        Parsed::Help => {
            print_help();
            CliAction::Exit
        }
        Parsed::Version => {
            print_version();
            CliAction::Exit
        }
        Parsed::Init => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        Parsed::Invalid(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try --help for available options");
            CliAction::Invalid
        }
    }
}

/// Parses the arguments that follow the program name.
pub(crate) fn parse_args(args: &[String]) -> Parsed {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let Some(flag) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            return Parsed::Invalid(format!("unexpected argument: {}", arg));
        };
        let (flag, inline) = match flag.split_once('=') {
            Some((f, v)) => (f, Some(v.to_string())),
            None => (flag, None),
        };

        match flag {
            "h" | "help" => return Parsed::Help,
            "v" | "version" => return Parsed::Version,
            "init" => return Parsed::Init,
            "dir" | "name" => {
                let Some(value) = inline.or_else(|| iter.next().cloned()) else {
                    return Parsed::Invalid(format!("flag needs an argument: -{}", flag));
                };
                if flag == "dir" {
                    cli.dir = value;
                } else {
                    cli.name = Some(value);
                }
            }
            "case-sensitive" => match parse_bool(inline.as_deref()) {
                Some(b) => cli.case_sensitive = Some(b),
                None => return Parsed::Invalid(format!("invalid boolean value: {}", arg)),
            },
            "strict" => match parse_bool(inline.as_deref()) {
                Some(b) => cli.strict = Some(b),
                None => return Parsed::Invalid(format!("invalid boolean value: {}", arg)),
            },
            _ => return Parsed::Invalid(format!("unknown flag: {}", arg)),
        }
    }

    Parsed::Run(cli)
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value {
        None => Some(true),
        Some(v) => match v.to_lowercase().as_str() {
            "1" | "t" | "true" => Some(true),
            "0" | "f" | "false" => Some(false),
            _ => None,
        },
    }
}

fn print_version() {
    println!("folder-search {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"folder-search - browse directories from the terminal and pick one

USAGE:
  fds [OPTIONS]

OPTIONS:
  -dir <PATH>             Directory to start in (default ".")
  -name <PATTERN>         Only list directories whose name contains PATTERN
  -case-sensitive         Match PATTERN case-sensitively
  -strict                 Stop navigating after a directory cannot be read
      --init              Write the default configuration file
  -h, --help              Print help information
  -v, --version           Print the version

  Long options may also be written with two dashes (--dir).

KEYS:
  up/down, k/j            Move the cursor
  right, l                Enter the directory under the cursor
  left, h                 Go to the parent directory
  enter                   Select the directory under the cursor and exit
  /                       Edit the name filter (enter/esc to finish)
  ctrl+f                  Clear the name filter
  c                       Toggle case sensitivity
  r                       Rescan the current directory
  q, esc, ctrl+c          Quit without a selection

The selected path is printed to stdout, e.g. cd "$(fds)".

ENVIRONMENT:
  FDS_CONFIG              Override the default config path
  FDS_LOG                 Log filter (e.g. "debug"), overrides general.log_level
  FDS_LOG_DIR             Directory for folder-search.log
"#
    );
}
