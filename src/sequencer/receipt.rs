/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulation receipt types.
//!
//! This module defines the receipt returned to callers after the
//! [`Scheduler`] processes a command.
//!
//! [`Scheduler`]: super::Scheduler

use super::result::SimulationResult;

/// Receipt returned after processing a command.
///
/// Contains the assigned sequence number and the result of executing
/// the command.
///
/// # Examples
///
/// ```
/// use fulfillment_rs::sequencer::{Scheduler, SimulationResult};
///
/// let mut scheduler = Scheduler::default();
/// let receipt = scheduler.execute_line("CustomerOrder 0900 Alice 3 2");
/// assert_eq!(receipt.sequence_num, 1);
/// assert!(receipt.is_success());
/// assert!(matches!(receipt.result, SimulationResult::BundleOpened { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReceipt {
    /// The monotonically increasing sequence number assigned to this command.
    pub sequence_num: u64,

    /// The result of executing the command.
    pub result: SimulationResult,
}

impl SimulationReceipt {
    /// Creates a new receipt.
    #[must_use]
    pub fn new(sequence_num: u64, result: SimulationResult) -> Self {
        Self {
            sequence_num,
            result,
        }
    }

    /// Returns `true` if the command was processed.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}
