/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Sequencer module driving the fulfillment simulation.
//!
//! This module provides the single-threaded [`Scheduler`] that folds parsed
//! commands over the worker pool and bundle manager in input order, recording
//! every customer order, worker assignment, completion and report as a
//! [`SimulationEvent`] in an append-only journal.
//!
//! # Architecture
//!
//! - Input lines are parsed into [`SimulationCommand`]s; malformed lines are
//!   rejected and skipped
//! - Each command receives a monotonic sequence number and a receipt
//! - Non-order commands first seal every bundle whose window has elapsed
//! - Events are emitted to registered listeners in recording order
//! - At end of input the scheduler flushes all open bundles and the journal
//!   is read back in chronological order
//!
//! # Examples
//!
//! ```
//! use fulfillment_rs::sequencer::{Scheduler, SimulationResult};
//!
//! let mut scheduler = Scheduler::default();
//!
//! scheduler.add_listener(|event| {
//!     println!("{event}");
//! });
//!
//! let receipt = scheduler.execute_line("CustomerOrder 0900 Alice 3 2");
//! assert_eq!(receipt.result, SimulationResult::BundleOpened { worker: "Alice".into() });
//!
//! let receipt = scheduler.execute_line("Ship 0900");
//! assert!(receipt.result.is_rejected());
//!
//! scheduler.finish();
//! assert_eq!(scheduler.max_fulfillment_minutes(), 25);
//! ```

pub mod command;
pub mod core;
pub mod event;
pub mod journal;
pub mod receipt;
pub mod result;

#[cfg(test)]
mod tests;

// Re-export main types
pub use command::{CommandError, SimulationCommand};
pub use self::core::Scheduler;
pub use event::{EventKind, SimulationEvent};
pub use journal::{InMemoryJournal, Journal};
pub use receipt::SimulationReceipt;
pub use result::SimulationResult;
