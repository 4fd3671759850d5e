//! Off-thread list rebuilds with newest-wins delivery.
//!
//! # Responsibility
//! - Run `build_list` on a worker thread so interactive callers never block.
//! - Deliver only the newest requested build; superseded work is dropped.
//!
//! # Invariants
//! - Generations are assigned in submission order starting at 1.
//! - A delivered list is always complete; partial builds are never visible.
//! - Queued requests older than the newest pending one are skipped unbuilt.

use crate::listing::builder::{build_list, ListOrder};
use crate::listing::item::ListItem;
use crate::model::record::Timestamped;
use log::{debug, warn};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const WORKER_THREAD_NAME: &str = "list-refresh";

struct BuildRequest<T> {
    generation: u64,
    order: ListOrder,
    snapshot: Vec<T>,
}

/// One completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltList<T> {
    pub generation: u64,
    pub order: ListOrder,
    pub items: Vec<ListItem<T>>,
}

/// Handle to the background build worker.
pub struct ListRefresher<T> {
    requests: Option<Sender<BuildRequest<T>>>,
    results: Receiver<BuiltList<T>>,
    submitted: u64,
    latest: Option<BuiltList<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T> ListRefresher<T>
where
    T: Timestamped + Clone + Send + 'static,
{
    /// Spawns the worker thread.
    pub fn spawn() -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<BuildRequest<T>>();
        let (result_tx, result_rx) = mpsc::channel::<BuiltList<T>>();

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(request_rx, result_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            results: result_rx,
            submitted: 0,
            latest: None,
            worker: Some(worker),
        })
    }

    /// Queues a rebuild of `snapshot` and returns its generation.
    pub fn submit(&mut self, snapshot: Vec<T>, order: ListOrder) -> u64 {
        self.submitted += 1;
        let generation = self.submitted;
        let request = BuildRequest {
            generation,
            order,
            snapshot,
        };

        let delivered = self
            .requests
            .as_ref()
            .map(|requests| requests.send(request).is_ok())
            .unwrap_or(false);
        if !delivered {
            warn!("event=list_refresh module=refresh status=error generation={generation} error_code=worker_gone");
        }
        generation
    }

    /// Generation of the most recent `submit`, or 0.
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    /// Newest completed build without blocking.
    pub fn latest(&mut self) -> Option<&BuiltList<T>> {
        loop {
            match self.results.try_recv() {
                Ok(built) => self.accept(built),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.latest.as_ref()
    }

    /// Blocks until the newest submission has been built.
    ///
    /// Returns the last completed build if the worker has stopped.
    pub fn wait_latest(&mut self) -> Option<&BuiltList<T>> {
        while !self.is_current() {
            match self.results.recv() {
                Ok(built) => self.accept(built),
                Err(_) => break,
            }
        }
        self.latest.as_ref()
    }

    /// Like `wait_latest`, giving up after `timeout`.
    pub fn wait_latest_timeout(&mut self, timeout: Duration) -> Option<&BuiltList<T>> {
        while !self.is_current() {
            match self.results.recv_timeout(timeout) {
                Ok(built) => self.accept(built),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.latest.as_ref()
    }

    fn is_current(&self) -> bool {
        self.latest
            .as_ref()
            .map_or(self.submitted == 0, |built| built.generation == self.submitted)
    }

    fn accept(&mut self, built: BuiltList<T>) {
        let newer = self
            .latest
            .as_ref()
            .map_or(true, |current| built.generation > current.generation);
        if newer {
            self.latest = Some(built);
        }
    }
}

impl<T> Drop for ListRefresher<T> {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=list_refresh module=refresh status=error error_code=worker_panicked");
            }
        }
    }
}

fn run_worker<T>(requests: Receiver<BuildRequest<T>>, results: Sender<BuiltList<T>>)
where
    T: Timestamped + Clone,
{
    while let Ok(mut request) = requests.recv() {
        // Skip straight to the newest queued request.
        while let Ok(newer) = requests.try_recv() {
            debug!(
                "event=list_refresh module=refresh status=skipped generation={}",
                request.generation
            );
            request = newer;
        }

        let items = build_list(&request.snapshot, request.order);
        let built = BuiltList {
            generation: request.generation,
            order: request.order,
            items,
        };
        if results.send(built).is_err() {
            break;
        }
    }
}
