//! Deferred path requests: submit now, collect the result later.
//!
//! [`PathDispatcher`] owns the grid and a single worker thread. Requests are
//! queued over an [`mpsc`] channel and solved one at a time with the grid
//! locked, so searches never overlap each other or a grid edit made through
//! [`PathDispatcher::with_grid`]. Each [`PathTicket`] yields exactly one
//! [`PathResult`].

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use hexgrid_core::WorldPos;
use log::{debug, warn};

use crate::grid::HexGrid;
use crate::pathfinder::{HexPathfinder, PathResult};

/// A single path query.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub start: WorldPos,
    pub target: WorldPos,
    pub waypoints: Vec<WorldPos>,
}

impl PathRequest {
    pub fn new(start: WorldPos, target: WorldPos) -> Self {
        Self {
            start,
            target,
            waypoints: Vec::new(),
        }
    }

    /// Set the intermediate waypoints (builder).
    pub fn with_waypoints(mut self, waypoints: Vec<WorldPos>) -> Self {
        self.waypoints = waypoints;
        self
    }
}

type Job = (PathRequest, Sender<PathResult>);

/// Handle to the pending result of a submitted request.
#[derive(Debug)]
pub struct PathTicket {
    rx: Option<Receiver<PathResult>>,
}

impl PathTicket {
    /// Block until the result is available.
    ///
    /// A request that was dropped without an answer reads as failed.
    pub fn wait(mut self) -> PathResult {
        match self.rx.take() {
            Some(rx) => rx.recv().unwrap_or_else(|_| PathResult::failed()),
            None => PathResult::failed(),
        }
    }

    /// Return the result if it is ready.
    ///
    /// Yields `Some` exactly once; later calls return `None`.
    pub fn try_result(&mut self) -> Option<PathResult> {
        let rx = self.rx.as_ref()?;
        let res = match rx.try_recv() {
            Ok(res) => res,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => PathResult::failed(),
        };
        self.rx = None;
        Some(res)
    }

    /// Whether the result has already been taken.
    #[inline]
    pub fn is_taken(&self) -> bool {
        self.rx.is_none()
    }
}

/// Serialises path requests against one grid on a background thread.
pub struct PathDispatcher {
    grid: Arc<Mutex<HexGrid>>,
    tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

fn lock(grid: &Mutex<HexGrid>) -> MutexGuard<'_, HexGrid> {
    grid.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PathDispatcher {
    /// Take ownership of `grid` and start the worker.
    pub fn new(grid: HexGrid) -> Self {
        let grid = Arc::new(Mutex::new(grid));
        let (tx, rx) = mpsc::channel::<Job>();
        let shared = Arc::clone(&grid);
        let worker = thread::spawn(move || {
            let mut pathfinder = HexPathfinder::new();
            for (req, reply) in rx {
                let res = {
                    let mut grid = lock(&shared);
                    pathfinder.find_path(&mut grid, req.start, req.target, &req.waypoints)
                };
                if reply.send(res).is_err() {
                    debug!("path: requester dropped its ticket before the result arrived");
                }
            }
        });
        Self {
            grid,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Queue a request. The result arrives through the returned ticket.
    pub fn submit(&self, req: PathRequest) -> PathTicket {
        let (reply_tx, reply_rx) = mpsc::channel();
        let sent = match &self.tx {
            Some(tx) => tx.send((req, reply_tx)).is_ok(),
            None => false,
        };
        if !sent {
            warn!("path: dispatcher worker is gone, request answered as failed");
        }
        PathTicket { rx: Some(reply_rx) }
    }

    /// Submit and wait.
    ///
    /// Must not be called from inside [`with_grid`](Self::with_grid): the
    /// worker needs the grid lock to answer.
    pub fn find_path(&self, start: WorldPos, target: WorldPos, waypoints: &[WorldPos]) -> PathResult {
        self.submit(PathRequest::new(start, target).with_waypoints(waypoints.to_vec()))
            .wait()
    }

    /// Run `f` with exclusive access to the grid, between searches.
    ///
    /// The grid stays locked until `f` returns. Calling [`find_path`] or
    /// [`PathTicket::wait`] on this dispatcher inside `f` deadlocks, because
    /// the worker blocks on the same lock. Submitting from `f` is fine; wait on
    /// the ticket after `with_grid` returns.
    ///
    /// [`find_path`]: Self::find_path
    pub fn with_grid<R>(&self, f: impl FnOnce(&mut HexGrid) -> R) -> R {
        let mut grid = lock(&self.grid);
        f(&mut grid)
    }
}

impl Drop for PathDispatcher {
    /// Pending requests are still answered before the worker exits.
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("path: dispatcher worker panicked");
            }
        }
    }
}
