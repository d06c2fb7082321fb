//! Running a search on a background thread.
//!
//! The strategy moves onto the worker thread together with its grid and
//! comes back through [`SearchTask::join`]. Visits and the final result
//! travel over an `mpsc` channel, so the caller can pace or animate them
//! without touching the grid while the search runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use pathviz_core::Point;

use crate::error::{Error, Result};
use crate::strategy::{Algorithm, SearchStrategy};

/// Sent from the worker thread while a search runs.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// The search visited or relaxed this cell.
    Visited(Point),
    /// The search ended. Always the last event.
    Finished(Result<Vec<Point>>),
}

/// Handle to a search running on its own thread.
#[derive(Debug)]
pub struct SearchTask {
    algorithm: Algorithm,
    handle: JoinHandle<Box<dyn SearchStrategy>>,
    events: Receiver<SearchEvent>,
}

impl SearchTask {
    /// Move `strategy` to a new thread and start `find_path` there.
    ///
    /// Observers already registered on the strategy's grid keep running, on
    /// the worker thread. A panic inside the search (typically from an
    /// observer) is caught: the strategy still comes back through
    /// [`join`](Self::join) and the last event is
    /// `Finished(Err(Error::WorkerPanicked(_)))`.
    pub fn spawn(mut strategy: Box<dyn SearchStrategy>) -> Self {
        let algorithm = strategy.algorithm();
        let (tx, events) = mpsc::channel();

        let handle = thread::spawn(move || {
            let visit_tx = tx.clone();
            let id = strategy.grid_mut().register_observer(move |p| {
                // A dropped receiver is not an error.
                let _ = visit_tx.send(SearchEvent::Visited(p));
            });

            debug!("{algorithm} worker started");
            let result = panic::catch_unwind(AssertUnwindSafe(|| strategy.find_path()))
                .unwrap_or_else(|_| {
                    warn!("{algorithm} search panicked");
                    Err(Error::WorkerPanicked(algorithm))
                });
            strategy.grid_mut().remove_observer(id);
            debug!("{algorithm} worker finished, ok={}", result.is_ok());

            let _ = tx.send(SearchEvent::Finished(result));
            strategy
        });

        Self {
            algorithm,
            handle,
            events,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Block until the next event. `None` once the worker has finished and
    /// every event has been received.
    pub fn recv(&self) -> Option<SearchEvent> {
        self.events.recv().ok()
    }

    /// Like [`recv`](Self::recv) but gives up after `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// The next event if one is already queued.
    pub fn try_recv(&self) -> Option<SearchEvent> {
        match self.events.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Iterate over events until the worker is done.
    pub fn events(&self) -> impl Iterator<Item = SearchEvent> + '_ {
        self.events.iter()
    }

    /// Whether the worker thread has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and take the strategy back. Events not yet
    /// received are dropped. Fails only if the thread died outside the
    /// search itself.
    pub fn join(self) -> Result<Box<dyn SearchStrategy>> {
        let algorithm = self.algorithm;
        self.handle
            .join()
            .map_err(|_| Error::WorkerPanicked(algorithm))
    }
}
