//! Core order book: venue-sharded price levels, the live-order index,
//! and NBBO change detection.

use super::error::OrderBookError;
use super::events::{BookUpdate, ExecutionReport, NbboChange, NbboListener, OrderEvent};
use super::level::PriceLevel;
use super::side::{Side, SideBook};
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use super::tick::{price_to_tick, tick_to_price};
use super::venue::{Venue, NUM_VENUES};
use crate::utils::current_time_millis;
use std::collections::HashMap;
use tracing::trace;

/// Location and remaining quantity of one live order.
///
/// The side is stored as a tag; the coordinator owns both side books and
/// indexes into the right one, so no order record ever aliases book
/// state.
#[derive(Debug, Clone, Copy)]
struct OrderRef {
    side: Side,
    tick: u32,
    venue: Venue,
    qty: u32,
}

/// A consolidated multi-venue order book for one instrument.
///
/// The book applies normalized add/cancel/replace/execute events, keeps
/// the per-side price levels and the live-order index in lockstep, and
/// reports a [`NbboChange`] whenever the top of book moves on the event's
/// side.
///
/// All mutating entry points take `&mut self` and run to completion;
/// there is no internal locking. A host that shares a book across
/// threads must serialize access itself.
pub struct OrderBook {
    /// The symbol or identifier for this order book
    symbol: String,

    /// Bid side price levels
    bids: SideBook,

    /// Ask side price levels
    asks: SideBook,

    /// Live orders: identifier to (side, tick, venue, remaining qty)
    orders: HashMap<String, OrderRef>,

    /// Invoked synchronously when an add or replace moves the top of book
    nbbo_listener: Option<NbboListener>,
}

impl OrderBook {
    /// Create a new, empty order book for the given symbol.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            bids: SideBook::new(Side::Bid),
            asks: SideBook::new(Side::Ask),
            orders: HashMap::new(),
            nbbo_listener: None,
        }
    }

    /// Create a new order book with an NBBO change listener attached.
    #[must_use]
    pub fn with_nbbo_listener(symbol: &str, listener: NbboListener) -> Self {
        let mut book = Self::new(symbol);
        book.nbbo_listener = Some(listener);
        book
    }

    /// Set the NBBO change listener for this book.
    pub fn set_nbbo_listener(&mut self, listener: NbboListener) {
        self.nbbo_listener = Some(listener);
    }

    /// Remove the NBBO change listener from this book.
    pub fn remove_nbbo_listener(&mut self) {
        self.nbbo_listener = None;
    }

    /// Get the symbol of this order book.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    fn sidebook(&self, side: Side) -> &SideBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline]
    fn sidebook_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Apply a new resting order.
    ///
    /// Returns `Some(NbboChange)` when the add moved the top of book on
    /// its side away from an existing best; the first-ever level on a
    /// side is not reported as an improvement over a real price.
    ///
    /// # Errors
    /// - [`OrderBookError::MalformedEvent`] for an empty identifier or a
    ///   zero quantity
    /// - [`OrderBookError::PriceOutOfRange`] for an unrepresentable price
    /// - [`OrderBookError::DuplicateOrderId`] when the identifier is
    ///   already live
    ///
    /// No state is mutated on any error path.
    pub fn on_add(
        &mut self,
        oid: &str,
        venue: Venue,
        side: Side,
        price: f64,
        qty: u32,
    ) -> Result<Option<NbboChange>, OrderBookError> {
        if oid.is_empty() {
            return Err(OrderBookError::MalformedEvent {
                message: "empty order id on add".to_string(),
            });
        }
        if qty == 0 {
            return Err(OrderBookError::MalformedEvent {
                message: format!("zero quantity on add for order {oid}"),
            });
        }
        let tick = price_to_tick(price)?;
        if self.orders.contains_key(oid) {
            return Err(OrderBookError::DuplicateOrderId(oid.to_string()));
        }

        trace!(
            "Adding order {} on {}: {} {} @ {} x {}",
            oid, self.symbol, side, venue, price, qty
        );

        let displaced = self.sidebook_mut(side).add(tick, venue, qty);
        self.orders.insert(
            oid.to_string(),
            OrderRef {
                side,
                tick,
                venue,
                qty,
            },
        );

        let change = displaced.map(|old_tick| {
            let sb = self.sidebook(side);
            let new_level = sb
                .level(tick)
                .expect("level just added to the book is missing");
            // An add cannot deplete a level, so the displaced best is
            // still present and readable.
            let old_level = sb
                .level(old_tick)
                .expect("displaced best level is missing");
            NbboChange {
                new_price: tick_to_price(tick),
                new_aggregate: new_level.aggregate(),
                old_price: tick_to_price(old_tick),
                old_aggregate: old_level.aggregate(),
                old_venues: old_level.venue_string(),
            }
        });

        if let Some(change) = &change {
            if let Some(listener) = &self.nbbo_listener {
                listener(side, change);
            }
        }

        Ok(change)
    }

    /// Cancel a live order.
    ///
    /// Unknown identifiers are silently ignored: duplicate cancels are
    /// common in replayed feeds. Cancels never report an NBBO change,
    /// even when the top of book falls as a result; consumers that need
    /// that read [`Self::best_bid`] / [`Self::best_ask`] afterwards.
    pub fn on_cancel(&mut self, oid: &str) {
        let Some(order) = self.orders.remove(oid) else {
            trace!("Cancel for unknown order {} ignored", oid);
            return;
        };
        trace!(
            "Cancelling order {} on {}: {} {} x {}",
            oid, self.symbol, order.side, order.venue, order.qty
        );
        self.sidebook_mut(order.side)
            .remove(order.tick, order.venue, order.qty);
    }

    /// Replace a live order with a new identifier, price and quantity.
    ///
    /// The add is applied before the cancel so a transient depletion of
    /// the old price can never surface as a top-of-book move. Returns
    /// whatever the add returned. An unknown `old_oid` makes the cancel
    /// a no-op; the add still proceeds.
    ///
    /// # Errors
    /// Propagates the add's errors; the cancel does not run on an error.
    pub fn on_replace(
        &mut self,
        new_oid: &str,
        old_oid: &str,
        venue: Venue,
        side: Side,
        price: f64,
        qty: u32,
    ) -> Result<Option<NbboChange>, OrderBookError> {
        let change = self.on_add(new_oid, venue, side, price, qty)?;
        self.on_cancel(old_oid);
        Ok(change)
    }

    /// Apply an execution against a live order.
    ///
    /// The executed quantity is clamped to the order's remaining
    /// quantity; a full execution removes the order from the index.
    /// Returns `None` for unknown identifiers. Executions never report
    /// an NBBO change; the report carries the post-trade level state
    /// directly, and the execution price is the level price the order
    /// rested at even when the trade depleted the level.
    pub fn on_execute(&mut self, oid: &str, exec_qty: u32) -> Option<ExecutionReport> {
        let order = self.orders.get_mut(oid)?;
        let take = exec_qty.min(order.qty);
        order.qty -= take;
        let OrderRef {
            side,
            tick,
            venue,
            qty: remaining,
        } = *order;

        trace!(
            "Executing {} against order {} on {}: {} left",
            take, oid, self.symbol, remaining
        );

        self.sidebook_mut(side).remove(tick, venue, take);

        let report = match self.sidebook(side).level(tick) {
            Some(level) => ExecutionReport {
                exec_price: tick_to_price(tick),
                level_remaining: level.aggregate(),
                per_venue_qty: level.per_venue(),
                venues: level.venue_string(),
            },
            None => ExecutionReport {
                exec_price: tick_to_price(tick),
                level_remaining: 0,
                per_venue_qty: [0; NUM_VENUES],
                venues: String::new(),
            },
        };

        if remaining == 0 {
            self.orders.remove(oid);
        }

        Some(report)
    }

    /// Apply a sequence of events in order, collecting the reportable
    /// results.
    ///
    /// The returned sequence may be shorter than the input: cancels and
    /// quiet adds contribute nothing. The batch is not transactional; on
    /// an error, events already applied remain applied and the error is
    /// returned immediately.
    ///
    /// # Errors
    /// The first failing event's error, as from the per-event methods.
    pub fn on_batch<I>(&mut self, events: I) -> Result<Vec<BookUpdate>, OrderBookError>
    where
        I: IntoIterator<Item = OrderEvent>,
    {
        let mut out = Vec::new();
        for event in events {
            match event {
                OrderEvent::Add {
                    oid,
                    venue,
                    side,
                    price,
                    qty,
                } => {
                    if let Some(change) = self.on_add(&oid, venue, side, price, qty)? {
                        out.push(BookUpdate::Nbbo(change));
                    }
                }
                OrderEvent::Cancel { oid } => self.on_cancel(&oid),
                OrderEvent::Replace {
                    new_oid,
                    old_oid,
                    venue,
                    side,
                    price,
                    qty,
                } => {
                    if let Some(change) =
                        self.on_replace(&new_oid, &old_oid, venue, side, price, qty)?
                    {
                        out.push(BookUpdate::Nbbo(change));
                    }
                }
                OrderEvent::Execute { oid, exec_qty } => {
                    if let Some(report) = self.on_execute(&oid, exec_qty) {
                        out.push(BookUpdate::Execution(report));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Get the best bid price, if any.
    #[must_use]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best_price()
    }

    /// Get the best ask price, if any.
    #[must_use]
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best_price()
    }

    /// Per-venue quantities at a price level: only venues with positive
    /// quantity appear. Empty when the level is absent or the price is
    /// unrepresentable.
    #[must_use]
    pub fn snapshot(&self, side: Side, price: f64) -> HashMap<Venue, u32> {
        match price_to_tick(price) {
            Ok(tick) => self.sidebook(side).snapshot(tick),
            Err(_) => HashMap::new(),
        }
    }

    /// Whether an order identifier is currently live.
    #[must_use]
    pub fn is_live(&self, oid: &str) -> bool {
        self.orders.contains_key(oid)
    }

    /// Remaining resting quantity of a live order.
    #[must_use]
    pub fn remaining_qty(&self, oid: &str) -> Option<u32> {
        self.orders.get(oid).map(|order| order.qty)
    }

    /// Number of live orders in the index.
    #[must_use]
    pub fn live_orders(&self) -> usize {
        self.orders.len()
    }

    /// Number of occupied price levels on a side.
    #[must_use]
    pub fn depth(&self, side: Side) -> usize {
        self.sidebook(side).depth()
    }

    /// A serializable point-in-time view of both sides, levels ordered
    /// best-first.
    #[must_use]
    pub fn book_snapshot(&self) -> OrderBookSnapshot {
        let collect = |sb: &SideBook| -> Vec<LevelSnapshot> {
            sb.iter_levels_best_first()
                .map(|(tick, level)| LevelSnapshot {
                    price: tick_to_price(tick),
                    aggregate: level.aggregate(),
                    venue_qty: level.per_venue(),
                })
                .collect()
        };
        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: collect(&self.bids),
            asks: collect(&self.asks),
        }
    }

    /// The level at a side and tick, if occupied. Test and diagnostic
    /// surface for invariant checks.
    #[must_use]
    pub fn level_at(&self, side: Side, tick: u32) -> Option<&PriceLevel> {
        self.sidebook(side).level(tick)
    }
}
