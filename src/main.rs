//! main.rs
//! Entry point for folder-search

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::app::{AppState, ErrorPolicy, Navigator};
use crate::config::Config;
use crate::core::{ScanWorker, terminal};
use crate::error::{AppError, InitError};
use crate::utils::cli::{CliAction, CliArgs, handle_args};
use crate::utils::{init_logging, resolve_initial_dir};

use std::path::PathBuf;

fn main() {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[fds] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let cli = match handle_args() {
        CliAction::Run(cli) => cli,
        CliAction::Exit => return,
        CliAction::Invalid => std::process::exit(2),
    };

    let config = Config::load();
    init_logging(config.general().log_level());

    match run(&config, cli) {
        Ok(Some(path)) => println!("{}", path.display()),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "exiting with failure");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Starts the worker and navigator, waits for the first listing, then runs the TUI.
fn run(config: &Config, cli: CliArgs) -> Result<Option<PathBuf>, AppError> {
    let initial = resolve_initial_dir(&cli.dir)?;

    let mut options = config.general().search_options();
    if let Some(name) = cli.name {
        options = options.with_pattern(name);
    }
    if let Some(case_sensitive) = cli.case_sensitive {
        options = options.with_case_sensitive(case_sensitive);
    }
    let policy = match cli.strict {
        Some(true) => ErrorPolicy::Strict,
        Some(false) => ErrorPolicy::Lenient,
        None => config.general().error_policy(),
    };

    let worker = ScanWorker::spawn()?;
    let mut nav = Navigator::start(initial, options, policy, worker).map_err(InitError::from)?;
    if let Err(e) = nav.await_initial() {
        if let Err(quit_err) = nav.quit() {
            tracing::debug!(error = %quit_err, "worker shutdown after failed start");
        }
        return Err(e.into());
    }

    let mut app = AppState::new(config, nav);
    terminal::run_terminal(&mut app)
}
