/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Customer order model.
//!
//! A [`CustomerOrder`] is immutable once created. Its [`CategoryProfile`]
//! records which item categories it contains and decides which orders may
//! share a worker trip.

use crate::clock::ClockTime;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Item categories present in an order or bundle.
    ///
    /// The empty set means the order carries no items at all.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CategoryProfile: u8 {
        /// At least one book.
        const BOOKS = 0b01;
        /// At least one electronics item.
        const ELECTRONICS = 0b10;
    }
}

impl CategoryProfile {
    /// Profile of a given pair of item counts.
    #[must_use]
    pub fn from_counts(books: u32, electronics: u32) -> Self {
        let mut profile = Self::empty();
        profile.set(Self::BOOKS, books > 0);
        profile.set(Self::ELECTRONICS, electronics > 0);
        profile
    }

    /// Whether an order with this profile may join a bundle defined by `other`.
    ///
    /// Books-only, electronics-only, mixed and empty orders each only bundle
    /// with their own kind.
    #[inline]
    #[must_use]
    pub fn is_compatible_with(self, other: Self) -> bool {
        self == other
    }
}

/// A customer order as received by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    /// Time the order arrived.
    pub arrival_time: ClockTime,
    /// Customer identifier, echoed in every event for this order.
    pub customer_id: String,
    /// Number of books.
    pub book_count: u32,
    /// Number of electronics items.
    pub electronics_count: u32,
}

impl CustomerOrder {
    /// Creates a new order.
    #[must_use]
    pub fn new(
        arrival_time: ClockTime,
        customer_id: impl Into<String>,
        book_count: u32,
        electronics_count: u32,
    ) -> Self {
        Self {
            arrival_time,
            customer_id: customer_id.into(),
            book_count,
            electronics_count,
        }
    }

    /// Total number of items across categories.
    #[inline]
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.book_count.saturating_add(self.electronics_count)
    }

    #[inline]
    #[must_use]
    pub fn has_books(&self) -> bool {
        self.book_count > 0
    }

    #[inline]
    #[must_use]
    pub fn has_electronics(&self) -> bool {
        self.electronics_count > 0
    }

    /// Category profile of this order.
    #[inline]
    #[must_use]
    pub fn profile(&self) -> CategoryProfile {
        CategoryProfile::from_counts(self.book_count, self.electronics_count)
    }

    /// Whether this order may share a trip with `first`, the defining order of a bundle.
    #[inline]
    #[must_use]
    pub fn is_compatible_with(&self, first: &CustomerOrder) -> bool {
        self.profile().is_compatible_with(first.profile())
    }
}
