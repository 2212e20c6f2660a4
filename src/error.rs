//! Error types for folder-search.
//!
//! Three layers of failure exist:
//! - [ScanError]: a single directory could not be listed. Recoverable, shown in the view.
//! - [NavError]: the controller was used after the scan worker went away. Fatal.
//! - [InitError]: startup could not complete. Fatal, exit code 1.
//!
//! [AppError] is what the binary bubbles up to `main`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A directory could not be enumerated.
///
/// Carries the path and the flattened cause so it can travel between threads
/// by value and be compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{}: no such directory", .0.display())]
    NotFound(PathBuf),

    #[error("{}: permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl ScanError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path),
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path),
            io::ErrorKind::NotADirectory => ScanError::NotADirectory(path),
            _ => ScanError::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

/// Misuse of the navigation controller after the worker is gone.
#[derive(Debug, Error)]
pub enum NavError {
    /// A request was issued after shutdown, or the worker hung up.
    #[error("scan worker is no longer running")]
    WorkerStopped,
}

/// Startup failures. All of them abort before the event loop starts.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to get current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("failed to start scan worker: {0}")]
    Worker(#[source] io::Error),

    #[error("initial directory scan failed: {0}")]
    InitialScan(#[from] ScanError),

    #[error(transparent)]
    Nav(#[from] NavError),
}

/// Top level error returned to the binary entry point.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error initializing application: {0}")]
    Init(#[from] InitError),

    #[error("Error running UI: {0}")]
    Nav(#[from] NavError),

    #[error("Error running UI: terminal failure: {0}")]
    Terminal(#[from] io::Error),
}
