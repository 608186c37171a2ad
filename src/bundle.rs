/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Order bundling.
//!
//! The [`BundleManager`] decides, for every incoming order, whether it joins
//! an open [`Bundle`], opens a new bundle for a freshly acquired worker, or
//! waits in the global FIFO queue. It also seals bundles whose bundling
//! window has elapsed, releasing their workers and draining the queue.
//!
//! # Bundling rules
//!
//! An order joins a bundle only if all of the following hold:
//!
//! - its [`CategoryProfile`] equals the profile of the bundle's first order,
//! - it arrived within the bundling window of the bundle's first order,
//! - the bundle's total item count stays within capacity.
//!
//! Once an order has been queued, every later order is queued behind it
//! until the queue has been drained by a seal, so no order can overtake an
//! older one.
//!
//! [`CategoryProfile`]: crate::order::CategoryProfile

use crate::clock::ClockTime;
use crate::config::SimulationConfig;
use crate::order::CustomerOrder;
use crate::workers::{WorkerId, WorkerPool};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, error};

/// Timing and capacity parameters used by bundling and sealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleRules {
    /// Bundling window in minutes.
    pub window_minutes: u32,
    /// Maximum items per bundle.
    pub capacity: u32,
    /// Minutes per travel leg.
    pub travel_minutes: u32,
}

impl Default for BundleRules {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for BundleRules {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            window_minutes: config.bundle_window_minutes,
            capacity: config.bundle_capacity,
            travel_minutes: config.travel_minutes,
        }
    }
}

/// An open worker assignment collecting compatible orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    worker: WorkerId,
    orders: Vec<CustomerOrder>,
    first_order_time: ClockTime,
}

impl Bundle {
    /// Opens a bundle for `worker` with `order` as its defining first order.
    #[must_use]
    pub fn open(worker: WorkerId, order: CustomerOrder) -> Self {
        Self {
            worker,
            first_order_time: order.arrival_time,
            orders: vec![order],
        }
    }

    /// Worker carrying this bundle.
    #[must_use]
    pub fn worker(&self) -> &str {
        &self.worker
    }

    /// Orders in the sequence they joined.
    #[must_use]
    pub fn orders(&self) -> &[CustomerOrder] {
        &self.orders
    }

    /// Arrival time of the first order.
    #[must_use]
    pub fn first_order_time(&self) -> ClockTime {
        self.first_order_time
    }

    /// Arrival time of the most recently added order.
    #[must_use]
    pub fn last_order_time(&self) -> ClockTime {
        self.orders
            .last()
            .map_or(self.first_order_time, |o| o.arrival_time)
    }

    /// Total items across all orders.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.orders
            .iter()
            .fold(0, |acc: u32, o| acc.saturating_add(o.total_items()))
    }

    /// Total books across all orders.
    #[must_use]
    pub fn book_count(&self) -> u32 {
        self.orders
            .iter()
            .fold(0, |acc: u32, o| acc.saturating_add(o.book_count))
    }

    /// Total electronics items across all orders.
    #[must_use]
    pub fn electronics_count(&self) -> u32 {
        self.orders
            .iter()
            .fold(0, |acc: u32, o| acc.saturating_add(o.electronics_count))
    }

    /// Customer ids in bundle order.
    pub fn customers(&self) -> impl Iterator<Item = &str> + '_ {
        self.orders.iter().map(|o| o.customer_id.as_str())
    }

    /// Whether `order` satisfies the compatibility, window and capacity rules.
    #[must_use]
    pub fn can_accept(&self, order: &CustomerOrder, rules: &BundleRules) -> bool {
        let Some(first) = self.orders.first() else {
            return true;
        };
        order.is_compatible_with(first)
            && first.arrival_time.difference(order.arrival_time) <= rules.window_minutes
            && self
                .total_items()
                .checked_add(order.total_items())
                .is_some_and(|items| items <= rules.capacity)
    }

    /// Whether the window of the most recent order has elapsed at `now`.
    #[must_use]
    pub fn is_due(&self, now: ClockTime, rules: &BundleRules) -> bool {
        !self.orders.is_empty() && self.last_order_time().difference(now) >= rules.window_minutes
    }

    /// Minutes the worker spends on this bundle.
    ///
    /// The bundling window, then, when there is anything to pick: travel to
    /// the first category, one minute per book, travel between categories
    /// when both are present, one minute per electronics item, and travel
    /// back to the packing station.
    #[must_use]
    pub fn processing_minutes(&self, rules: &BundleRules) -> u32 {
        let books = self.book_count();
        let electronics = self.electronics_count();

        let mut minutes = rules.window_minutes;
        if books == 0 && electronics == 0 {
            return minutes;
        }

        // saturates on absurd item counts
        minutes = minutes.saturating_add(rules.travel_minutes);
        if books > 0 {
            minutes = minutes.saturating_add(books);
        }
        if electronics > 0 {
            if books > 0 {
                minutes = minutes.saturating_add(rules.travel_minutes);
            }
            minutes = minutes.saturating_add(electronics);
        }
        minutes.saturating_add(rules.travel_minutes)
    }

    fn push(&mut self, order: CustomerOrder) {
        self.orders.push(order);
    }

    fn seal(self, rules: &BundleRules) -> SealedBundle {
        let processing_minutes = self.processing_minutes(rules);
        let assigned_at = self.last_order_time().add_minutes(rules.window_minutes);
        let completed_at =
            assigned_at.add_minutes(processing_minutes.saturating_sub(rules.window_minutes));
        SealedBundle {
            customers: self.orders.into_iter().map(|o| o.customer_id).collect(),
            worker: self.worker,
            assigned_at,
            completed_at,
            processing_minutes,
        }
    }
}

impl fmt::Display for Bundle {
    /// `worker:customer1,customer2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.worker)?;
        for (i, customer) in self.customers().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(customer)?;
        }
        Ok(())
    }
}

/// Outcome of sealing a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBundle {
    /// Worker that carried the bundle, now released.
    pub worker: WorkerId,
    /// Customers served, in bundle order.
    pub customers: Vec<String>,
    /// Time the assignment takes effect: last order time plus the window.
    pub assigned_at: ClockTime,
    /// Time the bundle is complete.
    pub completed_at: ClockTime,
    /// Total processing minutes, including the initial window.
    pub processing_minutes: u32,
}

impl SealedBundle {
    /// Customer ids joined with commas.
    #[must_use]
    pub fn customer_list(&self) -> String {
        self.customers.join(",")
    }
}

/// Where an incoming order ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The order opened a new bundle for a freshly acquired worker.
    Opened {
        /// Worker now carrying the bundle.
        worker: WorkerId,
    },

    /// The order joined an already open bundle.
    Joined {
        /// Worker carrying the bundle.
        worker: WorkerId,
    },

    /// The order waits in the global FIFO queue.
    Queued {
        /// Zero-based position in the queue.
        position: usize,
    },
}

/// Owner of all open bundles and of the global pending-order queue.
#[derive(Debug, Clone, Default)]
pub struct BundleManager {
    rules: BundleRules,
    /// Open bundles in the order they were opened; at most one per worker.
    open: Vec<Bundle>,
    queue: VecDeque<CustomerOrder>,
}

impl BundleManager {
    /// Creates an empty manager with the given rules.
    #[must_use]
    pub fn new(rules: BundleRules) -> Self {
        Self {
            rules,
            open: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &BundleRules {
        &self.rules
    }

    /// Places a newly arrived order.
    ///
    /// The order is queued when no worker is free or when older orders are
    /// already waiting. Otherwise it joins the first open bundle that accepts
    /// it, or opens a new bundle for the next available worker.
    pub fn submit(&mut self, order: CustomerOrder, pool: &mut WorkerPool) -> Placement {
        if !pool.has_available() || !self.queue.is_empty() {
            return self.enqueue(order);
        }
        match self.place(order, pool) {
            Ok(placement) => placement,
            Err(order) => self.enqueue(order),
        }
    }

    /// Seals every bundle whose window has elapsed at `now`.
    ///
    /// Workers of sealed bundles are released in seal order, then queued
    /// orders are re-placed in FIFO order while workers remain available.
    /// Bundles opened by that drain are left for the next call.
    pub fn seal_elapsed(&mut self, now: ClockTime, pool: &mut WorkerPool) -> Vec<SealedBundle> {
        let rules = self.rules;
        let sealed = self.seal_where(pool, |bundle| bundle.is_due(now, &rules));
        self.drain_queue(pool);
        sealed
    }

    /// Seals every open bundle regardless of time, draining the queue until
    /// no order is left waiting.
    pub fn flush(&mut self, pool: &mut WorkerPool) -> Vec<SealedBundle> {
        let mut sealed = Vec::new();
        loop {
            sealed.extend(self.seal_where(pool, |_| true));
            self.drain_queue(pool);
            if self.open.is_empty() {
                break;
            }
        }
        sealed
    }

    /// Open bundles, in the order they were opened.
    #[must_use]
    pub fn open_bundles(&self) -> &[Bundle] {
        &self.open
    }

    /// Bundle currently carried by `worker`, if any.
    #[must_use]
    pub fn bundle_for(&self, worker: &str) -> Option<&Bundle> {
        self.open.iter().find(|b| b.worker == worker)
    }

    /// Orders waiting for a worker, oldest first.
    pub fn queued(&self) -> impl Iterator<Item = &CustomerOrder> + '_ {
        self.queue.iter()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no bundle is open and no order is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.open.is_empty() && self.queue.is_empty()
    }

    fn enqueue(&mut self, order: CustomerOrder) -> Placement {
        let position = self.queue.len();
        debug!(customer = %order.customer_id, position, "order queued");
        self.queue.push_back(order);
        Placement::Queued { position }
    }

    /// Bundles or opens; hands the order back when no worker can be acquired.
    fn place(
        &mut self,
        order: CustomerOrder,
        pool: &mut WorkerPool,
    ) -> Result<Placement, CustomerOrder> {
        let rules = &self.rules;
        if let Some(bundle) = self.open.iter_mut().find(|b| b.can_accept(&order, rules)) {
            debug!(customer = %order.customer_id, worker = %bundle.worker, "order joined bundle");
            let worker = bundle.worker.clone();
            bundle.push(order);
            return Ok(Placement::Joined { worker });
        }

        match pool.acquire() {
            Ok(worker) => {
                debug!(customer = %order.customer_id, worker = %worker, "bundle opened");
                self.open.push(Bundle::open(worker.clone(), order));
                Ok(Placement::Opened { worker })
            }
            Err(_) => Err(order),
        }
    }

    fn seal_where(
        &mut self,
        pool: &mut WorkerPool,
        mut due: impl FnMut(&Bundle) -> bool,
    ) -> Vec<SealedBundle> {
        let (ready, still_open): (Vec<Bundle>, Vec<Bundle>) =
            std::mem::take(&mut self.open).into_iter().partition(|b| due(b));
        self.open = still_open;

        ready
            .into_iter()
            .map(|bundle| {
                let sealed = bundle.seal(&self.rules);
                debug!(
                    worker = %sealed.worker,
                    customers = %sealed.customer_list(),
                    assigned_at = %sealed.assigned_at,
                    completed_at = %sealed.completed_at,
                    processing_minutes = sealed.processing_minutes,
                    "bundle sealed"
                );
                if let Err(err) = pool.release(sealed.worker.clone()) {
                    error!(%err, "sealed bundle held a worker the pool did not lend out");
                }
                sealed
            })
            .collect()
    }

    fn drain_queue(&mut self, pool: &mut WorkerPool) {
        while pool.has_available() {
            let Some(order) = self.queue.pop_front() else {
                break;
            };
            if let Err(order) = self.place(order, pool) {
                self.queue.push_front(order);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn order(time: &str, customer: &str, books: u32, electronics: u32) -> CustomerOrder {
        CustomerOrder::new(t(time), customer, books, electronics)
    }

    fn pool(n: usize) -> WorkerPool {
        WorkerPool::new(["W1", "W2", "W3", "W4", "W5"].into_iter().take(n))
    }

    #[test]
    fn test_processing_time_mixed() {
        let bundle = Bundle::open("W1".into(), order("0900", "Alice", 3, 2));
        // 5 window + 5 travel + 3 books + 5 between + 2 electronics + 5 return
        assert_eq!(bundle.processing_minutes(&BundleRules::default()), 25);
    }

    #[test]
    fn test_processing_time_single_category() {
        let rules = BundleRules::default();
        let books = Bundle::open("W1".into(), order("0900", "A", 4, 0));
        assert_eq!(books.processing_minutes(&rules), 5 + 5 + 4 + 5);
        let electronics = Bundle::open("W1".into(), order("0900", "A", 0, 7));
        assert_eq!(electronics.processing_minutes(&rules), 5 + 5 + 7 + 5);
    }

    #[test]
    fn test_processing_time_empty_order() {
        let bundle = Bundle::open("W1".into(), order("0900", "A", 0, 0));
        assert_eq!(bundle.processing_minutes(&BundleRules::default()), 5);
    }

    #[test]
    fn test_processing_time_uses_aggregate_counts() {
        let rules = BundleRules::default();
        let mut bundle = Bundle::open("W1".into(), order("0900", "A", 2, 1));
        bundle.push(order("0901", "B", 1, 3));
        // one trip: 5 + 5 + 3 books + 5 + 4 electronics + 5
        assert_eq!(bundle.processing_minutes(&rules), 27);
    }

    #[test]
    fn test_seal_times() {
        let rules = BundleRules::default();
        let mut bundle = Bundle::open("W1".into(), order("0900", "A", 3, 2));
        bundle.push(order("0903", "B", 1, 1));
        let sealed = bundle.seal(&rules);
        assert_eq!(sealed.assigned_at, t("0908"));
        // processing 5 + 5 + 4 + 5 + 3 + 5 = 27, completion = 0908 + 22
        assert_eq!(sealed.processing_minutes, 27);
        assert_eq!(sealed.completed_at, t("0930"));
        assert_eq!(sealed.customer_list(), "A,B");
    }

    #[test]
    fn test_can_accept_rules() {
        let rules = BundleRules::default();
        let bundle = Bundle::open("W1".into(), order("0900", "A", 4, 0));

        assert!(bundle.can_accept(&order("0905", "B", 6, 0), &rules));
        assert!(!bundle.can_accept(&order("0906", "B", 1, 0), &rules), "outside window");
        assert!(!bundle.can_accept(&order("0901", "B", 7, 0), &rules), "over capacity");
        assert!(!bundle.can_accept(&order("0901", "B", 1, 1), &rules), "profile mismatch");
        assert!(!bundle.can_accept(&order("0901", "B", 0, 1), &rules), "profile mismatch");
    }

    #[test]
    fn test_can_accept_rejects_overflowing_totals() {
        let rules = BundleRules {
            capacity: u32::MAX,
            ..BundleRules::default()
        };
        let bundle = Bundle::open("W1".into(), order("0900", "a", u32::MAX, 0));
        assert_eq!(bundle.total_items(), u32::MAX);
        assert!(!bundle.can_accept(&order("0901", "b", 1, 0), &rules));
    }

    #[test]
    fn test_window_measured_from_first_order() {
        let rules = BundleRules::default();
        let mut bundle = Bundle::open("W1".into(), order("0900", "A", 1, 0));
        bundle.push(order("0904", "B", 1, 0));
        assert!(!bundle.can_accept(&order("0906", "C", 1, 0), &rules));
    }

    #[test]
    fn test_display() {
        let mut bundle = Bundle::open("W1".into(), order("0900", "A", 1, 0));
        assert_eq!(bundle.to_string(), "W1:A");
        bundle.push(order("0901", "B", 1, 0));
        assert_eq!(bundle.to_string(), "W1:A,B");
    }

    #[test]
    fn test_submit_opens_then_joins() {
        let mut pool = pool(5);
        let mut manager = BundleManager::default();

        let first = manager.submit(order("0900", "A", 1, 0), &mut pool);
        assert_eq!(first, Placement::Opened { worker: "W1".into() });
        let second = manager.submit(order("0902", "B", 2, 0), &mut pool);
        assert_eq!(second, Placement::Joined { worker: "W1".into() });
        let third = manager.submit(order("0902", "C", 0, 1), &mut pool);
        assert_eq!(third, Placement::Opened { worker: "W2".into() });

        assert_eq!(manager.open_bundles().len(), 2);
        assert_eq!(pool.available_count(), 3);
        assert_eq!(manager.bundle_for("W1").unwrap().total_items(), 3);
    }

    #[test]
    fn test_submit_queues_without_worker() {
        let mut pool = pool(1);
        let mut manager = BundleManager::default();

        manager.submit(order("0900", "A", 1, 0), &mut pool);
        // compatible, but no worker is free at arrival
        let placement = manager.submit(order("0901", "B", 1, 0), &mut pool);
        assert_eq!(placement, Placement::Queued { position: 0 });
        let placement = manager.submit(order("0901", "C", 0, 1), &mut pool);
        assert_eq!(placement, Placement::Queued { position: 1 });
        assert_eq!(manager.queue_len(), 2);
    }

    #[test]
    fn test_new_order_never_overtakes_queue() {
        let mut pool = pool(2);
        let mut manager = BundleManager::default();
        manager.queue.push_back(order("0900", "Old", 1, 0));

        // a worker is free, but an older order is still waiting
        let placement = manager.submit(order("0901", "New", 1, 0), &mut pool);
        assert_eq!(placement, Placement::Queued { position: 1 });
        assert!(manager.open_bundles().is_empty());
        assert_eq!(pool.available_count(), 2);

        let queued: Vec<&str> = manager.queued().map(|o| o.customer_id.as_str()).collect();
        assert_eq!(queued, vec!["Old", "New"]);
    }

    #[test]
    fn test_seal_elapsed_releases_and_drains_fifo() {
        let mut pool = pool(1);
        let mut manager = BundleManager::default();

        manager.submit(order("0900", "A", 1, 0), &mut pool);
        manager.submit(order("0901", "B", 0, 1), &mut pool);
        manager.submit(order("0902", "C", 0, 1), &mut pool);

        assert!(manager.seal_elapsed(t("0904"), &mut pool).is_empty());

        let sealed = manager.seal_elapsed(t("0905"), &mut pool);
        assert_eq!(sealed.len(), 1);
        assert_eq!(sealed[0].customers, vec!["A"]);

        // B takes the released worker; C keeps waiting until a worker frees again
        let bundle = manager.bundle_for("W1").unwrap();
        assert_eq!(bundle.customers().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(bundle.first_order_time(), t("0901"));
        assert_eq!(manager.queue_len(), 1);

        let sealed = manager.seal_elapsed(t("0906"), &mut pool);
        assert_eq!(sealed[0].customers, vec!["B"]);
        let bundle = manager.bundle_for("W1").unwrap();
        assert_eq!(bundle.customers().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(manager.queue_len(), 0);
    }

    #[test]
    fn test_seal_is_idempotent() {
        let mut pool = pool(5);
        let mut manager = BundleManager::default();
        manager.submit(order("0900", "A", 1, 0), &mut pool);

        assert_eq!(manager.seal_elapsed(t("0910"), &mut pool).len(), 1);
        assert!(manager.seal_elapsed(t("0910"), &mut pool).is_empty());
        assert_eq!(pool.available_count(), 5);
    }

    #[test]
    fn test_drained_bundle_waits_for_next_pass() {
        let mut pool = pool(1);
        let mut manager = BundleManager::default();
        manager.submit(order("0900", "A", 1, 0), &mut pool);
        manager.submit(order("0901", "B", 1, 0), &mut pool);

        let sealed = manager.seal_elapsed(t("0930"), &mut pool);
        assert_eq!(sealed.len(), 1);
        assert!(manager.bundle_for("W1").is_some());

        let sealed = manager.seal_elapsed(t("0930"), &mut pool);
        assert_eq!(sealed[0].customers, vec!["B"]);
        assert_eq!(sealed[0].assigned_at, t("0906"));
    }

    #[test]
    fn test_flush_empties_everything() {
        let mut pool = pool(1);
        let mut manager = BundleManager::default();
        manager.submit(order("2357", "A", 1, 0), &mut pool);
        manager.submit(order("2358", "B", 0, 1), &mut pool);
        manager.submit(order("2358", "C", 1, 1), &mut pool);

        let sealed = manager.flush(&mut pool);
        let served: Vec<String> = sealed.iter().map(SealedBundle::customer_list).collect();
        assert_eq!(served, vec!["A", "B", "C"]);
        assert!(manager.is_idle());
        assert_eq!(pool.available_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_open_bundles_respect_rules(
            orders in prop::collection::vec((0u32..30, 0u32..5, 0u32..5), 1..40),
            seal_every in 1usize..6,
        ) {
            let rules = BundleRules::default();
            let mut pool = pool(3);
            let mut manager = BundleManager::new(rules);

            for (i, (minute, books, electronics)) in orders.into_iter().enumerate() {
                let arrival = ClockTime::from_hm(9, minute).unwrap();
                manager.submit(
                    CustomerOrder::new(arrival, format!("C{i}"), books, electronics),
                    &mut pool,
                );
                if i % seal_every == 0 {
                    manager.seal_elapsed(arrival, &mut pool);
                }

                let mut workers: Vec<&str> = manager.open_bundles().iter().map(Bundle::worker).collect();
                workers.sort_unstable();
                workers.dedup();
                prop_assert_eq!(workers.len(), manager.open_bundles().len());
                prop_assert_eq!(
                    pool.available_count() + manager.open_bundles().len(),
                    pool.roster().len()
                );

                for bundle in manager.open_bundles() {
                    prop_assert!(!pool.is_available(bundle.worker()));
                    prop_assert!(bundle.total_items() <= rules.capacity);
                    let first = &bundle.orders()[0];
                    for o in bundle.orders() {
                        prop_assert!(first.arrival_time.difference(o.arrival_time) <= rules.window_minutes);
                        prop_assert_eq!(o.profile(), first.profile());
                    }
                }
            }

            manager.flush(&mut pool);
            prop_assert!(manager.is_idle());
            prop_assert_eq!(pool.available_count(), 3);
        }
    }
}
