//! Navigation controller for folder-search.
//!
//! [Navigator] is the single owner of "which directory is shown". It turns
//! navigation events into scan requests for the [ScanWorker], applies the responses
//! and exposes the result as a read-only [ViewModel].
//!
//! A navigation event only names a candidate path. The candidate becomes the current
//! path once its scan succeeds; a failed scan never moves the current path. While a
//! scan is pending, any further navigation first blocks on that scan's response,
//! applies it, and only then computes and sends its own request.

use crate::core::filter::SearchOptions;
use crate::core::paths;
use crate::core::worker::{ScanRequest, ScanResponse, ScanWorker};
use crate::error::{InitError, NavError, ScanError};

use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What happens to the view after a failed scan.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Keep the last good listing and show the error until the next success.
    #[default]
    Lenient,
    /// Replace the view with the error; only quitting is possible afterwards.
    Strict,
}

/// Controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    AwaitingScan,
    /// Strict policy after a failed scan. Only quit is accepted.
    Halted,
    Selected(PathBuf),
    Quit,
}

impl NavPhase {
    /// True once navigation can no longer issue scans.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavPhase::Halted | NavPhase::Selected(_) | NavPhase::Quit)
    }
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub title: String,
    pub items: &'a [String],
    pub error_message: Option<String>,
    pub pending: bool,
    pub halted: bool,
}

/// Holds the current path, the pending candidate and the listing shown for the current path.
pub struct Navigator {
    current: PathBuf,
    pending: Option<PathBuf>,
    items: Vec<String>,
    error: Option<ScanError>,
    options: Arc<SearchOptions>,
    policy: ErrorPolicy,
    phase: NavPhase,
    worker: Option<ScanWorker>,
}

impl Navigator {
    /// Sets the current path and issues the first scan for it.
    pub fn start(
        initial: PathBuf,
        options: SearchOptions,
        policy: ErrorPolicy,
        worker: ScanWorker,
    ) -> Result<Self, NavError> {
        tracing::info!(path = %initial.display(), ?policy, "starting navigation");
        let mut nav = Self {
            current: initial.clone(),
            pending: None,
            items: Vec::new(),
            error: None,
            options: Arc::new(options),
            policy,
            phase: NavPhase::Idle,
            worker: Some(worker),
        };
        nav.issue(initial)?;
        Ok(nav)
    }

    /// Blocks for the first scan started by [Navigator::start].
    ///
    /// A failure here means the program has nothing to show and must not start.
    pub fn await_initial(&mut self) -> Result<(), InitError> {
        self.settle()?;
        match &self.error {
            Some(e) => Err(InitError::InitialScan(e.clone())),
            None => Ok(()),
        }
    }

    // Getters / accessors

    #[inline]
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    #[inline]
    pub fn pending_path(&self) -> Option<&Path> {
        self.pending.as_deref()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[inline]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[inline]
    pub fn phase(&self) -> &NavPhase {
        &self.phase
    }

    /// Snapshot of what the renderer should draw.
    pub fn view(&self) -> ViewModel<'_> {
        ViewModel {
            title: self.current.display().to_string(),
            items: &self.items,
            error_message: self.error.as_ref().map(|e| e.to_string()),
            pending: self.pending.is_some(),
            halted: self.phase == NavPhase::Halted,
        }
    }

    // Navigation events

    /// Moves into the child directory `name` of the current path.
    pub fn enter_child(&mut self, name: &str) -> Result<(), NavError> {
        if !self.ready_for_navigation()? {
            return Ok(());
        }
        let candidate = paths::child(&self.current, name);
        tracing::debug!(dir = %candidate.display(), "navigating into directory");
        self.issue(candidate)
    }

    /// Moves to the parent of the current path. A no-op at the filesystem root.
    pub fn go_parent(&mut self) -> Result<(), NavError> {
        if !self.ready_for_navigation()? {
            return Ok(());
        }
        if paths::is_root(&self.current) {
            tracing::debug!(dir = %self.current.display(), "already at root, staying put");
            return Ok(());
        }
        let candidate = paths::parent(&self.current);
        tracing::debug!(dir = %candidate.display(), "navigating to parent directory");
        self.issue(candidate)
    }

    /// Scans the current path again.
    pub fn refresh(&mut self) -> Result<(), NavError> {
        if !self.ready_for_navigation()? {
            return Ok(());
        }
        tracing::debug!(dir = %self.current.display(), "rescanning directory");
        self.issue(self.current.clone())
    }

    /// Replaces the search options and rescans the current path with them.
    pub fn set_options(&mut self, options: SearchOptions) -> Result<(), NavError> {
        if !self.ready_for_navigation()? {
            return Ok(());
        }
        if *self.options == options {
            return Ok(());
        }
        tracing::debug!(
            pattern = options.pattern(),
            case_sensitive = options.case_sensitive(),
            "search options replaced"
        );
        self.options = Arc::new(options);
        self.issue(self.current.clone())
    }

    /// Ends navigation with `name` as the user's choice.
    ///
    /// Returns the absolute path of the chosen directory. No further scans happen.
    pub fn select(&mut self, name: &str) -> Result<PathBuf, NavError> {
        let chosen = paths::child(&self.current, name);
        tracing::info!(dir = %chosen.display(), "directory selected");
        self.shutdown_worker()?;
        self.phase = NavPhase::Selected(chosen.clone());
        Ok(chosen)
    }

    /// Ends navigation without a choice and stops the worker.
    ///
    /// Calling it a second time is a programming error and returns
    /// [NavError::WorkerStopped].
    pub fn quit(&mut self) -> Result<(), NavError> {
        tracing::info!("user quit application");
        self.shutdown_worker()?;
        self.phase = NavPhase::Quit;
        Ok(())
    }

    // Response handling

    /// Blocks until the pending scan, if any, has been applied.
    ///
    /// Returns true when a response was applied.
    pub fn settle_pending(&mut self) -> Result<bool, NavError> {
        if self.pending.is_none() {
            return Ok(false);
        }
        self.settle()?;
        Ok(true)
    }

    /// Applies a finished response if one is ready, without blocking.
    ///
    /// Returns true when the view changed.
    pub fn poll(&mut self) -> Result<bool, NavError> {
        if self.pending.is_none() {
            return Ok(false);
        }
        match self.worker()?.try_response()? {
            Some(response) => {
                self.on_response(response);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Applies one worker response to the navigation state.
    pub fn on_response(&mut self, response: ScanResponse) {
        let Some(candidate) = self.pending.take() else {
            tracing::warn!(path = %response.path.display(), "unexpected scan response ignored");
            return;
        };
        debug_assert_eq!(candidate, response.path);

        match response.result.into_result() {
            Ok(entries) => {
                tracing::debug!(dir = %candidate.display(), count = entries.len(), "listing applied");
                self.current = candidate;
                self.items = entries;
                self.error = None;
                self.phase = NavPhase::Idle;
            }
            Err(e) => {
                tracing::error!(dir = %candidate.display(), error = %e, "directory scan failed");
                self.error = Some(e);
                self.phase = match self.policy {
                    ErrorPolicy::Lenient => NavPhase::Idle,
                    ErrorPolicy::Strict => NavPhase::Halted,
                };
            }
        }
    }

    // Internals

    fn worker(&self) -> Result<&ScanWorker, NavError> {
        self.worker.as_ref().ok_or(NavError::WorkerStopped)
    }

    /// Waits for the pending scan, if any, and applies it.
    fn settle(&mut self) -> Result<(), NavError> {
        if self.pending.is_some() {
            tracing::debug!("waiting for pending scan before navigating");
            let response = self.worker()?.wait_response()?;
            self.on_response(response);
        }
        Ok(())
    }

    /// Settles any pending scan, then reports whether navigation may continue.
    fn ready_for_navigation(&mut self) -> Result<bool, NavError> {
        if self.worker.is_none() {
            return Err(NavError::WorkerStopped);
        }
        self.settle()?;
        Ok(!self.phase.is_terminal())
    }

    fn issue(&mut self, candidate: PathBuf) -> Result<(), NavError> {
        let request = ScanRequest::new(candidate.clone(), Arc::clone(&self.options));
        self.worker()?.request(request)?;
        self.pending = Some(candidate);
        self.phase = NavPhase::AwaitingScan;
        Ok(())
    }

    fn shutdown_worker(&mut self) -> Result<(), NavError> {
        let worker = self.worker.take().ok_or(NavError::WorkerStopped)?;
        self.pending = None;
        worker.shutdown();
        Ok(())
    }
}
