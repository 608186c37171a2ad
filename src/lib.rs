/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! # Fulfillment-rs
//!
//! A deterministic simulator of a small warehouse order-fulfillment process.
//!
//! Customer orders arrive with `HHMM` timestamps and are bundled onto a fixed
//! pool of workers: orders with the same category profile that arrive within
//! a 5-minute window of a bundle's first order share one trip, up to 10 items.
//! When no worker is free, orders wait in a FIFO queue that no later order
//! may overtake. Bundles are sealed once the window of their last order has
//! elapsed, at which point the worker's assignment and completion times are
//! computed and recorded.
//!
//! ## Modules
//!
//! - [`clock`]: `HHMM` time arithmetic
//! - [`order`]: customer orders and category profiles
//! - [`workers`]: the FIFO worker pool
//! - [`bundle`]: bundling, sealing and processing-time rules
//! - [`sequencer`]: the command-driven [`Scheduler`] and its event journal
//! - [`simulation`]: running a whole command script
//! - [`config`]: tunable roster, window, capacity and travel time
//!
//! ## Example
//!
//! ```
//! use fulfillment_rs::{SimulationConfig, run};
//!
//! let script = "\
//! CustomerOrder 0900 Alice 3 2
//! PrintMaxFulfillmentTime 0930
//! ";
//! let report = run(script.as_bytes(), SimulationConfig::default()).unwrap();
//! let lines: Vec<String> = report.lines().collect();
//! assert_eq!(lines[1], "WorkerAssignment 0905 Alice Alice");
//! assert_eq!(lines[2], "OrderCompletion 0920 Alice");
//! assert_eq!(lines[3], "MaxFulfillmentTime 0930 25");
//! ```

pub mod bundle;
pub mod clock;
pub mod config;
mod error;
pub mod logger;
pub mod order;
pub mod sequencer;
pub mod simulation;
pub mod workers;

pub use bundle::{Bundle, BundleManager, BundleRules, Placement, SealedBundle};
pub use clock::{ClockError, ClockTime};
pub use config::{ConfigError, SimulationConfig};
pub use error::FulfillmentError;
pub use order::{CategoryProfile, CustomerOrder};
pub use sequencer::{Scheduler, SimulationCommand, SimulationEvent};
pub use simulation::{SimulationReport, run, run_file};
pub use workers::{WorkerId, WorkerPool, WorkerPoolError};
