/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulation result types.
//!
//! This module defines the result types returned after the [`Scheduler`]
//! processes a command or an input line.
//!
//! [`Scheduler`]: super::Scheduler

use super::command::CommandError;
use super::event::EventKind;
use crate::workers::WorkerId;

/// Result of processing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationResult {
    /// The order opened a new bundle.
    BundleOpened {
        /// Worker acquired for the bundle.
        worker: WorkerId,
    },

    /// The order joined an open bundle.
    OrderBundled {
        /// Worker carrying the bundle.
        worker: WorkerId,
    },

    /// The order is waiting for a worker.
    OrderQueued {
        /// Zero-based position in the pending queue.
        position: usize,
    },

    /// A report command recorded its event.
    Reported {
        /// Kind of the recorded report.
        kind: EventKind,
    },

    /// The input line was malformed and skipped.
    Rejected {
        /// The error that caused rejection.
        error: CommandError,
    },
}

impl SimulationResult {
    /// Returns `true` if the command was processed.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// Returns `true` if the line was rejected.
    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Worker now carrying the order, for order commands that were not queued.
    #[must_use]
    pub fn worker(&self) -> Option<&str> {
        match self {
            Self::BundleOpened { worker } | Self::OrderBundled { worker } => Some(worker),
            _ => None,
        }
    }
}
