//! Normalized input events and the structured results the book emits.

use super::side::Side;
use super::venue::{Venue, NUM_VENUES};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A normalized order event, as produced by an upstream feed handler.
///
/// Venues travel as their one-character codes and sides as `BID`/`ASK`,
/// matching the wire shapes consumers already speak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OrderEvent {
    /// A new resting order.
    Add {
        /// Order identifier, unique among live orders
        oid: String,
        /// Venue the quantity rests on
        venue: Venue,
        /// Book side
        side: Side,
        /// Limit price
        price: f64,
        /// Resting quantity
        qty: u32,
    },
    /// Removal of a live order.
    Cancel {
        /// Order identifier
        oid: String,
    },
    /// Atomic cancel/new: the add is applied before the cancel.
    Replace {
        /// Identifier of the replacement order
        new_oid: String,
        /// Identifier of the order being replaced
        old_oid: String,
        /// Venue the replacement rests on
        venue: Venue,
        /// Book side
        side: Side,
        /// Replacement limit price
        price: f64,
        /// Replacement quantity
        qty: u32,
    },
    /// A (partial) fill against a live order.
    Execute {
        /// Order identifier
        oid: String,
        /// Executed quantity; clamped to the order's remaining quantity
        exec_qty: u32,
    },
}

/// Emitted when an add or replace moves the top of book on its side.
///
/// The old fields describe the level that was best before the event;
/// `old_venues` is its canonical venue string at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbboChange {
    /// New best price on the side
    pub new_price: f64,
    /// Aggregate quantity at the new best level
    pub new_aggregate: u32,
    /// Previous best price
    pub old_price: f64,
    /// Aggregate quantity still resting at the previous best level
    pub old_aggregate: u32,
    /// Canonical venue string of the previous best level
    pub old_venues: String,
}

/// Emitted for every execution against a live order.
///
/// Carries the post-trade state of the executed level. When the
/// execution depleted the level entirely, the remaining aggregate is
/// zero, the per-venue vector is all zeros and the venue string is
/// empty; the execution price is the level's price regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Price the execution happened at
    pub exec_price: f64,
    /// Aggregate quantity left at the level after the trade
    pub level_remaining: u32,
    /// Post-trade per-venue quantities in canonical venue order
    pub per_venue_qty: [u32; NUM_VENUES],
    /// Canonical venue string of the post-trade level
    pub venues: String,
}

/// One reportable result out of a batch of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookUpdate {
    /// The top of book moved on one side
    Nbbo(NbboChange),
    /// An execution was applied
    Execution(ExecutionReport),
}

/// A callback invoked synchronously whenever an add or replace moves the
/// top of book. The side the change happened on is passed alongside the
/// record.
pub type NbboListener = Arc<dyn Fn(Side, &NbboChange) + Send + Sync>;
