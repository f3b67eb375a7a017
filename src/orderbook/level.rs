//! Per-venue quantity bucket for one (side, tick) pair.

use super::venue::{Venue, NUM_VENUES};
use serde::{Deserialize, Serialize};

/// Resting quantity at one price on one side, sharded by venue.
///
/// The per-venue quantities live in a fixed-size array, so `adjust` never
/// allocates. The aggregate is kept alongside and must always equal the
/// sum of the per-venue entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    vqty: [u32; NUM_VENUES],
    agg: u32,
}

impl PriceLevel {
    /// Create an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a signed quantity delta for one venue, updating the
    /// aggregate.
    ///
    /// # Panics
    /// Panics when the delta would drive the venue quantity or the
    /// aggregate outside `u32`. A negative resting quantity means the
    /// book's structures have diverged, and there is no safe state to
    /// continue from.
    pub fn adjust(&mut self, venue: Venue, delta: i64) {
        let slot = &mut self.vqty[venue.index()];
        let next = i64::from(*slot) + delta;
        assert!(
            (0..=i64::from(u32::MAX)).contains(&next),
            "venue quantity out of range at {venue}: {} {delta:+}",
            *slot
        );
        *slot = next as u32;

        let agg = i64::from(self.agg) + delta;
        assert!(
            (0..=i64::from(u32::MAX)).contains(&agg),
            "aggregate quantity out of range: {} {delta:+}",
            self.agg
        );
        self.agg = agg as u32;
    }

    /// Total resting quantity across all venues.
    #[must_use]
    #[inline]
    pub fn aggregate(&self) -> u32 {
        self.agg
    }

    /// Whether no venue has resting quantity here.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agg == 0
    }

    /// Resting quantity contributed by one venue.
    #[must_use]
    #[inline]
    pub fn venue_qty(&self, venue: Venue) -> u32 {
        self.vqty[venue.index()]
    }

    /// The full per-venue quantity vector in canonical venue order.
    #[must_use]
    pub fn per_venue(&self) -> [u32; NUM_VENUES] {
        self.vqty
    }

    /// Venues with positive quantity, in canonical venue order.
    #[must_use]
    pub fn venues_present(&self) -> Vec<Venue> {
        Venue::ALL
            .iter()
            .copied()
            .filter(|v| self.vqty[v.index()] > 0)
            .collect()
    }

    /// Canonical venue string: the one-character codes of every venue
    /// with positive quantity, sorted ascending by code point.
    ///
    /// Consumers compare presence sets with these; digits sort before
    /// letters, so a level with C2, CBOE and AMEX quantity yields `"2CX"`.
    #[must_use]
    pub fn venue_string(&self) -> String {
        let mut codes: Vec<char> = self.venues_present().iter().map(|v| v.code()).collect();
        codes.sort_unstable();
        codes.into_iter().collect()
    }
}
