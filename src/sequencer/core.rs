/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Core Scheduler implementation.
//!
//! This module provides the [`Scheduler`], the single context object that
//! owns the worker pool, the bundle manager, the event journal and the
//! max-fulfillment tracker, and folds input commands over them in order.

use super::command::SimulationCommand;
use super::event::{EventKind, SimulationEvent};
use super::journal::{InMemoryJournal, Journal};
use super::receipt::SimulationReceipt;
use super::result::SimulationResult;
use crate::bundle::{BundleManager, BundleRules, Placement, SealedBundle};
use crate::clock::ClockTime;
use crate::config::SimulationConfig;
use crate::order::CustomerOrder;
use crate::workers::WorkerPool;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&SimulationEvent) + Send + Sync>;

/// A deterministic, single-threaded order-fulfillment scheduler.
///
/// Every command is processed to completion before the next one; simulated
/// time is carried by the commands themselves. Each processed command gets a
/// monotonically increasing sequence number and every recorded event is
/// appended to the journal and handed to the registered listeners.
///
/// # Examples
///
/// ```
/// use fulfillment_rs::sequencer::Scheduler;
///
/// let mut scheduler = Scheduler::default();
/// scheduler.execute_line("CustomerOrder 0900 Alice 3 2");
/// scheduler.execute_line("PrintMaxFulfillmentTime 0930");
/// scheduler.finish();
///
/// let lines: Vec<String> = scheduler.chronological_lines();
/// assert_eq!(lines, vec![
///     "CustomerOrder 0900 Alice 3 2",
///     "WorkerAssignment 0905 Alice Alice",
///     "OrderCompletion 0920 Alice",
///     "MaxFulfillmentTime 0930 25",
/// ]);
/// ```
pub struct Scheduler {
    /// Configuration the run was built from.
    config: SimulationConfig,

    /// Free workers, in acquisition order.
    pool: WorkerPool,

    /// Open bundles and the pending-order queue.
    bundles: BundleManager,

    /// Every recorded event, in insertion order.
    journal: InMemoryJournal,

    /// Longest processing time of any sealed bundle.
    max_fulfillment_minutes: u32,

    /// Next command sequence number.
    sequence: u64,

    /// Next event sequence number.
    event_sequence: u64,

    /// Event listeners called synchronously for each event.
    event_listeners: Vec<EventListener>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Scheduler {
    /// Creates a scheduler with every roster worker available.
    ///
    /// The configuration is expected to be valid, see
    /// [`SimulationConfig::validate`].
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            pool: WorkerPool::new(config.workers.iter().cloned()),
            bundles: BundleManager::new(BundleRules::from(&config)),
            config,
            journal: InMemoryJournal::new(),
            max_fulfillment_minutes: 0,
            sequence: 1,
            event_sequence: 1,
            event_listeners: Vec::new(),
        }
    }

    /// Registers an event listener.
    ///
    /// Listeners are called synchronously, in recording order, for each event.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&SimulationEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Parses and executes one input line.
    ///
    /// Malformed lines are skipped: they consume a sequence number and return
    /// a [`SimulationResult::Rejected`] receipt, but record no event and
    /// leave the simulation state untouched.
    pub fn execute_line(&mut self, line: &str) -> SimulationReceipt {
        match line.parse::<SimulationCommand>() {
            Ok(command) => self.execute(command),
            Err(error) => {
                let seq = self.next_sequence();
                warn!(sequence_num = seq, line, %error, "skipping malformed command");
                SimulationReceipt::new(seq, SimulationResult::Rejected { error })
            }
        }
    }

    /// Executes one command.
    ///
    /// Orders are recorded and handed to the bundle manager. Every other
    /// command first seals the bundles whose window has elapsed at the
    /// command's time, then records its report.
    pub fn execute(&mut self, command: SimulationCommand) -> SimulationReceipt {
        let seq = self.next_sequence();
        trace!(sequence_num = seq, %command, "executing command");

        let result = match command {
            SimulationCommand::CustomerOrder(order) => self.execute_order(order),
            SimulationCommand::PrintAvailableWorkerList(time) => {
                self.finalize(time);
                let workers: Vec<&str> = self.pool.available().map(String::as_str).collect();
                let payload = workers.join(" ");
                self.report(time, EventKind::AvailableWorkerList, payload)
            }
            SimulationCommand::PrintWorkerAssignmentList(time) => {
                self.finalize(time);
                let payload = self.assignment_list();
                self.report(time, EventKind::WorkerAssignmentList, payload)
            }
            SimulationCommand::PrintMaxFulfillmentTime(time) => {
                self.finalize(time);
                let payload = self.max_fulfillment_minutes.to_string();
                self.report(time, EventKind::MaxFulfillmentTime, payload)
            }
        };

        SimulationReceipt::new(seq, result)
    }

    /// Seals every bundle whose window has elapsed at `now`.
    ///
    /// Records a worker assignment and an order completion event per sealed
    /// bundle and returns how many bundles were sealed. Calling it again
    /// with the same time and no new orders seals nothing.
    pub fn finalize(&mut self, now: ClockTime) -> usize {
        let sealed = self.bundles.seal_elapsed(now, &mut self.pool);
        self.record_sealed(&sealed);
        sealed.len()
    }

    /// Flushes the simulation at end of input.
    ///
    /// Every open bundle is sealed and every queued order is bundled and
    /// sealed in turn. Returns the number of bundles sealed.
    pub fn finish(&mut self) -> usize {
        let sealed = self.bundles.flush(&mut self.pool);
        self.record_sealed(&sealed);
        debug!(
            sealed = sealed.len(),
            events = self.journal.len(),
            max_fulfillment_minutes = self.max_fulfillment_minutes,
            "simulation flushed"
        );
        sealed.len()
    }

    /// The event journal, in insertion order.
    #[must_use]
    pub fn journal(&self) -> &InMemoryJournal {
        &self.journal
    }

    /// Recorded events rendered as output lines, in chronological order.
    #[must_use]
    pub fn chronological_lines(&self) -> Vec<String> {
        self.journal
            .chronological()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Consumes the scheduler, returning its events in chronological order.
    #[must_use]
    pub fn into_events(self) -> Vec<SimulationEvent> {
        self.journal.into_chronological()
    }

    #[must_use]
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    #[must_use]
    pub fn bundles(&self) -> &BundleManager {
        &self.bundles
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Longest processing time among sealed bundles, 0 before any seal.
    #[must_use]
    pub fn max_fulfillment_minutes(&self) -> u32 {
        self.max_fulfillment_minutes
    }

    /// Open bundles as space-separated `worker:customer,customer` entries.
    #[must_use]
    pub fn assignment_list(&self) -> String {
        self.bundles
            .open_bundles()
            .iter()
            .filter(|b| !b.orders().is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn execute_order(&mut self, order: CustomerOrder) -> SimulationResult {
        let event = SimulationEvent::customer_order(self.next_event_sequence(), &order);
        self.record(event);

        match self.bundles.submit(order, &mut self.pool) {
            Placement::Opened { worker } => SimulationResult::BundleOpened { worker },
            Placement::Joined { worker } => SimulationResult::OrderBundled { worker },
            Placement::Queued { position } => SimulationResult::OrderQueued { position },
        }
    }

    fn report(&mut self, time: ClockTime, kind: EventKind, payload: String) -> SimulationResult {
        let event = SimulationEvent::new(self.next_event_sequence(), time, kind, payload);
        self.record(event);
        SimulationResult::Reported { kind }
    }

    fn record_sealed(&mut self, sealed: &[SealedBundle]) {
        for bundle in sealed {
            self.max_fulfillment_minutes = self.max_fulfillment_minutes.max(bundle.processing_minutes);
            let assignment = SimulationEvent::worker_assignment(self.next_event_sequence(), bundle);
            self.record(assignment);
            let completion = SimulationEvent::order_completion(self.next_event_sequence(), bundle);
            self.record(completion);
        }
    }

    fn record(&mut self, event: SimulationEvent) {
        for listener in &self.event_listeners {
            listener(&event);
        }
        self.journal.append(event);
    }

    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence;
        self.sequence += 1;
        seq
    }

    fn next_event_sequence(&mut self) -> u64 {
        let seq = self.event_sequence;
        self.event_sequence += 1;
        seq
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pool", &self.pool)
            .field("bundles", &self.bundles)
            .field("events", &self.journal.len())
            .field("max_fulfillment_minutes", &self.max_fulfillment_minutes)
            .field("listeners", &self.event_listeners.len())
            .finish()
    }
}
