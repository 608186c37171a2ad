/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulation event types.
//!
//! This module defines the events recorded by the [`Scheduler`] while it
//! processes commands. Events are immutable and render as one output line:
//! `<EventKind> <HHMM> <payload>`.
//!
//! [`Scheduler`]: super::Scheduler

use crate::bundle::SealedBundle;
use crate::clock::ClockTime;
use crate::order::CustomerOrder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CustomerOrder,
    WorkerAssignment,
    OrderCompletion,
    AvailableWorkerList,
    WorkerAssignmentList,
    MaxFulfillmentTime,
}

impl EventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerOrder => "CustomerOrder",
            Self::WorkerAssignment => "WorkerAssignment",
            Self::OrderCompletion => "OrderCompletion",
            Self::AvailableWorkerList => "AvailableWorkerList",
            Self::WorkerAssignmentList => "WorkerAssignmentList",
            Self::MaxFulfillmentTime => "MaxFulfillmentTime",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event recorded by the scheduler.
///
/// Contains the insertion sequence number, the simulated time the event
/// refers to, its kind and the kind-specific payload text.
///
/// # Examples
///
/// ```
/// use fulfillment_rs::sequencer::{EventKind, SimulationEvent};
///
/// let event = SimulationEvent::new(1, "0905".parse().unwrap(), EventKind::MaxFulfillmentTime, "25");
/// assert_eq!(event.to_string(), "MaxFulfillmentTime 0905 25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Monotonically increasing insertion number.
    pub sequence_num: u64,

    /// Simulated time of the event.
    pub time: ClockTime,

    /// What happened.
    pub kind: EventKind,

    /// Kind-specific payload, already formatted.
    pub payload: String,
}

impl SimulationEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        time: ClockTime,
        kind: EventKind,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            sequence_num,
            time,
            kind,
            payload: payload.into(),
        }
    }

    /// `CustomerOrder <time> <customer> <books> <electronics>`
    #[must_use]
    pub fn customer_order(sequence_num: u64, order: &CustomerOrder) -> Self {
        Self::new(
            sequence_num,
            order.arrival_time,
            EventKind::CustomerOrder,
            format!(
                "{} {} {}",
                order.customer_id, order.book_count, order.electronics_count
            ),
        )
    }

    /// `WorkerAssignment <assigned_at> <worker> <customers>`
    #[must_use]
    pub fn worker_assignment(sequence_num: u64, sealed: &SealedBundle) -> Self {
        Self::new(
            sequence_num,
            sealed.assigned_at,
            EventKind::WorkerAssignment,
            format!("{} {}", sealed.worker, sealed.customer_list()),
        )
    }

    /// `OrderCompletion <completed_at> <customers>`
    #[must_use]
    pub fn order_completion(sequence_num: u64, sealed: &SealedBundle) -> Self {
        Self::new(
            sequence_num,
            sealed.completed_at,
            EventKind::OrderCompletion,
            sealed.customer_list(),
        )
    }

    /// Sort key giving chronological order, ties broken by insertion.
    #[inline]
    #[must_use]
    pub fn chronological_key(&self) -> (ClockTime, u64) {
        (self.time, self.sequence_num)
    }
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.time, self.payload)
    }
}
