/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Worker pool.
//!
//! Tracks which workers of a fixed roster are free. Free workers are handed
//! out in FIFO order and released workers rejoin at the back of the line.

use std::collections::VecDeque;
use thiserror::Error;

/// Worker identifier (the worker's name).
pub type WorkerId = String;

/// Errors returned by [`WorkerPool`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerPoolError {
    /// Every worker is busy; the caller must queue the order instead.
    #[error("no worker available")]
    NoWorkerAvailable,

    /// The worker was released while already free.
    #[error("worker '{0}' is already available")]
    AlreadyAvailable(WorkerId),

    /// The worker is not part of the roster.
    #[error("worker '{0}' is not on the roster")]
    UnknownWorker(WorkerId),
}

/// FIFO pool of available workers drawn from a fixed roster.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    roster: Vec<WorkerId>,
    available: VecDeque<WorkerId>,
}

impl WorkerPool {
    /// Creates a pool where every roster member starts available, in roster order.
    #[must_use]
    pub fn new<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<WorkerId>,
    {
        let roster: Vec<WorkerId> = roster.into_iter().map(Into::into).collect();
        let available = roster.iter().cloned().collect();
        Self { roster, available }
    }

    /// Takes the next available worker.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerPoolError::NoWorkerAvailable`] when every worker is busy.
    pub fn acquire(&mut self) -> Result<WorkerId, WorkerPoolError> {
        self.available
            .pop_front()
            .ok_or(WorkerPoolError::NoWorkerAvailable)
    }

    /// Returns a busy worker to the back of the available line.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerPoolError::UnknownWorker`] for a name outside the roster
    /// and [`WorkerPoolError::AlreadyAvailable`] for a double release.
    pub fn release(&mut self, worker: WorkerId) -> Result<(), WorkerPoolError> {
        if !self.roster.contains(&worker) {
            return Err(WorkerPoolError::UnknownWorker(worker));
        }
        if self.available.contains(&worker) {
            return Err(WorkerPoolError::AlreadyAvailable(worker));
        }
        self.available.push_back(worker);
        Ok(())
    }

    /// Available workers in the order they would be acquired.
    pub fn available(&self) -> impl Iterator<Item = &WorkerId> + '_ {
        self.available.iter()
    }

    #[inline]
    #[must_use]
    pub fn has_available(&self) -> bool {
        !self.available.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Whether the given worker is currently free.
    #[must_use]
    pub fn is_available(&self, worker: &str) -> bool {
        self.available.iter().any(|w| w == worker)
    }

    /// The full roster, in its configured order.
    #[must_use]
    pub fn roster(&self) -> &[WorkerId] {
        &self.roster
    }
}
