/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Journal trait and in-memory implementation for the simulation event log.
//!
//! A journal is an append-only log of [`SimulationEvent`]s kept in insertion
//! order. Output is produced from [`Journal::chronological`], which orders
//! events by simulated time and keeps insertion order among equal times.

use super::event::{EventKind, SimulationEvent};

/// Append-only event log for [`SimulationEvent`]s.
///
/// Implementations must preserve insertion order.
pub trait Journal {
    /// Appends a new event to the journal.
    fn append(&mut self, event: SimulationEvent);

    /// Returns an iterator over all events in insertion order.
    fn iter(&self) -> impl Iterator<Item = &SimulationEvent> + '_;

    /// Returns the total number of events stored.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` if no events have been appended.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sequence number of the last event, or `None` if empty.
    #[must_use]
    fn last_sequence(&self) -> Option<u64>;

    /// Events of one kind, in insertion order.
    fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &SimulationEvent> + '_ {
        self.iter().filter(move |e| e.kind == kind)
    }

    /// All events sorted by time; ties keep insertion order.
    #[must_use]
    fn chronological(&self) -> Vec<&SimulationEvent> {
        let mut events: Vec<&SimulationEvent> = self.iter().collect();
        events.sort_by_key(|e| e.chronological_key());
        events
    }
}

/// In-memory implementation of [`Journal`].
///
/// Stores all events in a `Vec` in insertion order.
///
/// # Examples
///
/// ```
/// use fulfillment_rs::sequencer::journal::{InMemoryJournal, Journal};
/// use fulfillment_rs::sequencer::{EventKind, SimulationEvent};
///
/// let mut journal = InMemoryJournal::new();
/// assert!(journal.is_empty());
///
/// journal.append(SimulationEvent::new(1, "0910".parse().unwrap(), EventKind::MaxFulfillmentTime, "0"));
/// journal.append(SimulationEvent::new(2, "0900".parse().unwrap(), EventKind::MaxFulfillmentTime, "0"));
/// assert_eq!(journal.len(), 2);
/// assert_eq!(journal.chronological()[0].sequence_num, 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryJournal {
    events: Vec<SimulationEvent>,
}

impl InMemoryJournal {
    /// Creates a new empty in-memory journal.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Creates a new in-memory journal with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Returns a slice of all stored events.
    #[must_use]
    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Consumes the journal, returning owned events in chronological order.
    #[must_use]
    pub fn into_chronological(mut self) -> Vec<SimulationEvent> {
        self.events.sort_by_key(SimulationEvent::chronological_key);
        self.events
    }
}

impl Journal for InMemoryJournal {
    fn append(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    fn iter(&self) -> impl Iterator<Item = &SimulationEvent> + '_ {
        self.events.iter()
    }

    #[inline]
    fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    fn last_sequence(&self) -> Option<u64> {
        self.events.last().map(|e| e.sequence_num)
    }
}
