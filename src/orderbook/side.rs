//! Side tag and the per-side book of occupied price levels.

use super::error::OrderBookError;
use super::level::PriceLevel;
use super::tick::tick_to_price;
use super::venue::Venue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Which side of the market a price level or order belongs to.
///
/// Tick ordering is reversed between sides: a higher tick is a better
/// bid, a lower tick is a better ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy side
    Bid,
    /// Sell side
    Ask,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("BID"),
            Side::Ask => f.write_str("ASK"),
        }
    }
}

impl FromStr for Side {
    type Err = OrderBookError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "BID" => Ok(Side::Bid),
            "ASK" => Ok(Side::Ask),
            other => Err(OrderBookError::UnknownSide {
                tag: other.to_string(),
            }),
        }
    }
}

/// One side of the book: the set of occupied price levels.
///
/// Two structures are kept in lockstep: `ticks`, the ordered set of
/// occupied tick indices, and `levels`, the tick-to-bucket map. After
/// every public call they hold exactly the same keys and every present
/// level has a positive aggregate.
#[derive(Debug, Clone)]
pub struct SideBook {
    side: Side,
    ticks: BTreeSet<u32>,
    levels: HashMap<u32, PriceLevel>,
}

impl SideBook {
    /// Create an empty book for one side.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ticks: BTreeSet::new(),
            levels: HashMap::new(),
        }
    }

    /// The side this book covers.
    #[must_use]
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Add resting quantity at a tick for one venue, creating the level
    /// on first touch.
    ///
    /// Returns the tick that was best before the add, but only when the
    /// add moved the top of book away from an existing best. The very
    /// first level on a side returns `None`: there is no real price the
    /// new best improved on.
    pub fn add(&mut self, tick: u32, venue: Venue, qty: u32) -> Option<u32> {
        let prev_best = self.best_tick();

        let level = self.levels.entry(tick).or_default();
        let first = level.is_empty();
        level.adjust(venue, i64::from(qty));
        if first {
            self.ticks.insert(tick);
        }

        match prev_best {
            Some(prev) if self.best_tick() != Some(prev) => Some(prev),
            _ => None,
        }
    }

    /// Remove resting quantity at a tick for one venue, erasing the
    /// level the moment its aggregate reaches zero.
    ///
    /// # Panics
    /// Panics when the level does not exist or the venue holds less than
    /// `qty` there. Callers route removals through the order index, so
    /// either means the index and the book have diverged.
    pub fn remove(&mut self, tick: u32, venue: Venue, qty: u32) {
        let level = self
            .levels
            .get_mut(&tick)
            .expect("remove targeted an absent price level");
        level.adjust(venue, -i64::from(qty));
        if level.is_empty() {
            self.ticks.remove(&tick);
            self.levels.remove(&tick);
        }
    }

    /// Best occupied tick: the maximum for bids, the minimum for asks.
    /// `None` when the side is empty.
    #[must_use]
    pub fn best_tick(&self) -> Option<u32> {
        match self.side {
            Side::Bid => self.ticks.last().copied(),
            Side::Ask => self.ticks.first().copied(),
        }
    }

    /// Best occupied price, `None` when the side is empty.
    #[must_use]
    pub fn best_price(&self) -> Option<f64> {
        self.best_tick().map(tick_to_price)
    }

    /// The level at a tick, if occupied.
    #[must_use]
    pub fn level(&self, tick: u32) -> Option<&PriceLevel> {
        self.levels.get(&tick)
    }

    /// Per-venue quantities at a tick: only venues with positive
    /// quantity appear. Empty when the level is absent.
    #[must_use]
    pub fn snapshot(&self, tick: u32) -> HashMap<Venue, u32> {
        match self.levels.get(&tick) {
            Some(level) => level
                .venues_present()
                .into_iter()
                .map(|v| (v, level.venue_qty(v)))
                .collect(),
            None => HashMap::new(),
        }
    }

    /// Number of occupied price levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ticks.len()
    }

    /// Occupied levels from best to worst.
    pub(crate) fn iter_levels_best_first(&self) -> impl Iterator<Item = (u32, &PriceLevel)> + '_ {
        let ticks: Vec<u32> = match self.side {
            Side::Bid => self.ticks.iter().rev().copied().collect(),
            Side::Ask => self.ticks.iter().copied().collect(),
        };
        ticks.into_iter().map(move |tick| {
            let level = self
                .levels
                .get(&tick)
                .expect("tick set and level map diverged");
            (tick, level)
        })
    }
}
