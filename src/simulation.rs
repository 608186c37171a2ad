/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Script runner.
//!
//! Feeds a command stream line by line into a [`Scheduler`], flushes it at
//! end of input and returns the chronological event log.

use crate::config::SimulationConfig;
use crate::error::FulfillmentError;
use crate::sequencer::{Scheduler, SimulationEvent};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// All events in chronological order.
    pub events: Vec<SimulationEvent>,
    /// Number of input lines processed, rejected ones included.
    pub lines_processed: u64,
    /// Number of input lines skipped as malformed.
    pub lines_rejected: u64,
    /// Longest processing time among sealed bundles.
    pub max_fulfillment_minutes: u32,
}

impl SimulationReport {
    /// Events rendered as output lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(ToString::to_string)
    }
}

/// Runs a full simulation over a command stream.
///
/// # Errors
///
/// Returns [`FulfillmentError::Config`] for an invalid configuration and
/// [`FulfillmentError::Stream`] if reading the stream fails part way.
///
/// # Examples
///
/// ```
/// use fulfillment_rs::{SimulationConfig, run};
///
/// let script = "CustomerOrder 0900 Alice 3 2\nPrintMaxFulfillmentTime 0930\n";
/// let report = run(script.as_bytes(), SimulationConfig::default()).unwrap();
/// assert_eq!(report.events.len(), 4);
/// assert_eq!(report.max_fulfillment_minutes, 25);
/// ```
pub fn run<R: BufRead>(
    reader: R,
    config: SimulationConfig,
) -> Result<SimulationReport, FulfillmentError> {
    config.validate()?;
    let mut scheduler = Scheduler::new(config);
    let mut lines_processed = 0u64;
    let mut lines_rejected = 0u64;

    for line in reader.lines() {
        let receipt = scheduler.execute_line(&line?);
        lines_processed += 1;
        if receipt.result.is_rejected() {
            lines_rejected += 1;
        }
    }

    scheduler.finish();
    let max_fulfillment_minutes = scheduler.max_fulfillment_minutes();
    let events = scheduler.into_events();
    info!(
        lines_processed,
        lines_rejected,
        events = events.len(),
        max_fulfillment_minutes,
        "simulation finished"
    );

    Ok(SimulationReport {
        events,
        lines_processed,
        lines_rejected,
        max_fulfillment_minutes,
    })
}

/// Runs a full simulation over the commands in `path`.
///
/// # Errors
///
/// Returns [`FulfillmentError::Input`] if the file cannot be opened, plus
/// everything [`run`] can return.
pub fn run_file(
    path: impl AsRef<Path>,
    config: SimulationConfig,
) -> Result<SimulationReport, FulfillmentError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FulfillmentError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "reading commands");
    run(BufReader::new(file), config)
}
