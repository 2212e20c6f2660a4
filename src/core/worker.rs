//! Background scan worker for folder-search.
//!
//! A single thread owns every directory listing. The navigation controller hands it
//! a [ScanRequest] over a zero-capacity channel and later picks up the matching
//! [ScanResponse], again over a zero-capacity channel. Nothing else crosses the
//! thread boundary: requests and responses move by value.
//!
//! Because both channels are rendezvous channels and the controller never sends a
//! second request before consuming the first response, at most one scan is ever in
//! flight and responses come back in request order.
//!
//! # Shutdown
//! Shutdown is a third channel that is never written to. Dropping its sender
//! disconnects it, which wakes the worker out of either of its two `select!`s. A
//! result that is still waiting to be handed over at that point is dropped.
//! [ScanWorker::shutdown] consumes the handle, so shutting down twice or sending
//! after shutdown cannot be written.

use crate::core::filter::{self, ScanResult, SearchOptions};
use crate::error::{InitError, NavError};

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A request to list one directory with the given options.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    path: PathBuf,
    options: Arc<SearchOptions>,
}

impl ScanRequest {
    pub fn new(path: PathBuf, options: Arc<SearchOptions>) -> Self {
        Self { path, options }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn options(&self) -> &Arc<SearchOptions> {
        &self.options
    }
}

/// The worker's answer to a [ScanRequest], tagged with the scanned path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResponse {
    pub path: PathBuf,
    pub result: ScanResult,
}

/// Handle to the scan worker thread.
pub struct ScanWorker {
    request_tx: Sender<ScanRequest>,
    response_rx: Receiver<ScanResponse>,
    shutdown_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ScanWorker {
    /// Spawns the worker thread and wires up its three channels.
    pub fn spawn() -> Result<Self, InitError> {
        let (request_tx, request_rx) = bounded::<ScanRequest>(0);
        let (response_tx, response_rx) = bounded::<ScanResponse>(0);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("fds-scan".into())
            .spawn(move || run_worker(request_rx, response_tx, shutdown_rx))
            .map_err(InitError::Worker)?;

        tracing::info!("scan worker started");
        Ok(Self {
            request_tx,
            response_rx,
            shutdown_tx,
            handle: Some(handle),
        })
    }

    /// Builds a handle over channels whose other ends are driven by the caller.
    ///
    /// Lets tests stand in for the worker thread and observe the handoff.
    pub fn from_channels(
        request_tx: Sender<ScanRequest>,
        response_rx: Receiver<ScanResponse>,
        shutdown_tx: Sender<()>,
    ) -> Self {
        Self {
            request_tx,
            response_rx,
            shutdown_tx,
            handle: None,
        }
    }

    /// Hands a request to the worker, blocking until it accepts.
    pub fn request(&self, request: ScanRequest) -> Result<(), NavError> {
        tracing::debug!(path = %request.path.display(), "sending scan request");
        self.request_tx
            .send(request)
            .map_err(|_| NavError::WorkerStopped)
    }

    /// Takes a finished response if the worker is offering one.
    pub fn try_response(&self) -> Result<Option<ScanResponse>, NavError> {
        match self.response_rx.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(NavError::WorkerStopped),
        }
    }

    /// Blocks until the worker hands over its next response.
    pub fn wait_response(&self) -> Result<ScanResponse, NavError> {
        self.response_rx.recv().map_err(|_| NavError::WorkerStopped)
    }

    /// Signals shutdown and waits for the worker thread to exit.
    ///
    /// A scan stuck in the filesystem keeps the thread alive until it returns.
    pub fn shutdown(self) {
        let ScanWorker {
            request_tx,
            response_rx,
            shutdown_tx,
            handle,
        } = self;

        drop(shutdown_tx);
        drop(request_tx);
        drop(response_rx);

        if let Some(handle) = handle
            && handle.join().is_err()
        {
            tracing::error!("scan worker panicked");
        }
        tracing::info!("scan worker shut down");
    }
}

/// Worker loop: wait for shutdown or a request, scan, hand the result back.
fn run_worker(
    request_rx: Receiver<ScanRequest>,
    response_tx: Sender<ScanResponse>,
    shutdown_rx: Receiver<()>,
) {
    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(request_rx) -> msg => {
                let Ok(ScanRequest { path, options }) = msg else {
                    break;
                };

                let result = filter::list(&path, &options);
                match result.error() {
                    Some(e) => tracing::warn!(path = %path.display(), error = %e, "directory scan failed"),
                    None => tracing::debug!(
                        path = %path.display(),
                        count = result.entries().len(),
                        "directory scan completed"
                    ),
                }

                select! {
                    send(response_tx, ScanResponse { path, result }) -> sent => {
                        if sent.is_err() {
                            break;
                        }
                    }
                    recv(shutdown_rx) -> _ => {
                        tracing::debug!("shutdown while handing over a result, dropping it");
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!("scan worker loop exited");
}

/// Worker thread integration tests.
#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, rng};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn opts() -> Arc<SearchOptions> {
        Arc::new(SearchOptions::default())
    }

    #[test]
    fn worker_lists_requested_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("alpha"))?;
        fs::File::create(dir.path().join("file.txt"))?;

        let worker = ScanWorker::spawn()?;
        worker.request(ScanRequest::new(dir.path().to_path_buf(), opts()))?;
        let response = worker.wait_response()?;

        assert_eq!(response.path, dir.path());
        assert_eq!(response.result.entries(), ["alpha".to_string()]);
        worker.shutdown();
        Ok(())
    }

    #[test]
    fn worker_reports_scan_error_and_keeps_running() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing");

        let worker = ScanWorker::spawn()?;
        worker.request(ScanRequest::new(missing.clone(), opts()))?;
        let response = worker.wait_response()?;
        assert!(response.result.error().is_some());
        assert!(response.result.entries().is_empty());

        // still alive after a failure
        worker.request(ScanRequest::new(dir.path().to_path_buf(), opts()))?;
        let response = worker.wait_response()?;
        assert!(response.result.is_ok());
        worker.shutdown();
        Ok(())
    }

    #[test]
    fn worker_responses_follow_request_order() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let mut dirs = vec![temp.path().to_path_buf()];
        for i in 0..4 {
            let d = temp.path().join(format!("d{i}"));
            fs::create_dir(&d)?;
            dirs.push(d);
        }
        dirs.push(temp.path().join("nope"));

        let worker = ScanWorker::spawn()?;
        let mut rng = rng();
        for _ in 0..50 {
            let dir = &dirs[rng.random_range(0..dirs.len())];
            let options = Arc::new(
                SearchOptions::default()
                    .with_case_sensitive(rng.random_bool(0.5))
                    .with_pattern(if rng.random_bool(0.5) { "d" } else { "" }),
            );
            worker.request(ScanRequest::new(dir.clone(), options))?;
            let response = worker.wait_response()?;
            assert_eq!(&response.path, dir, "response out of order");
        }
        worker.shutdown();
        Ok(())
    }

    #[test]
    fn try_response_is_empty_when_idle() -> Result<(), Box<dyn std::error::Error>> {
        let worker = ScanWorker::spawn()?;
        assert!(worker.try_response()?.is_none());
        worker.shutdown();
        Ok(())
    }

    #[test]
    fn shutdown_while_result_is_unclaimed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let worker = ScanWorker::spawn()?;
        worker.request(ScanRequest::new(dir.path().to_path_buf(), opts()))?;

        // the worker is now blocked offering its result, shutdown must still return
        thread::sleep(Duration::from_millis(20));
        worker.shutdown();
        Ok(())
    }

    #[test]
    fn request_fails_once_worker_is_gone() {
        let (request_tx, request_rx) = bounded::<ScanRequest>(0);
        let (_response_tx, response_rx) = bounded::<ScanResponse>(0);
        let (shutdown_tx, _shutdown_rx) = bounded::<()>(0);
        drop(request_rx);

        let worker = ScanWorker::from_channels(request_tx, response_rx, shutdown_tx);
        let err = worker.request(ScanRequest::new(PathBuf::from("/"), opts()));
        assert!(matches!(err, Err(NavError::WorkerStopped)));
    }
}
