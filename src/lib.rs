//! # Consolidated Multi-Venue NBBO Order Book
//!
//! A limit order book that aggregates resting quantity across a fixed set of
//! trading venues and reports National Best Bid and Offer (NBBO) changes as
//! individual order events stream in. Designed as the bookkeeping core of an
//! options market-data pipeline: a feed handler decodes wire messages into
//! normalized events, hands them to the book, and forwards the structured
//! change records the book returns.
//!
//! ## Key Features
//!
//! - **Venue-sharded price levels**: every occupied price holds a fixed-size
//!   per-venue quantity vector plus its aggregate, so per-venue breakdowns
//!   and canonical venue strings are available without scanning orders.
//!
//! - **NBBO change detection in O(log P)**: each side keeps its occupied
//!   ticks in an ordered set; an add that moves the top of book returns a
//!   [`NbboChange`] carrying the new and displaced best levels.
//!
//! - **Live-order index**: every resting order is tracked by identifier, so
//!   cancels, replaces and executions are O(log P) with a single hash lookup.
//!
//! - **Structured results, serde throughout**: input events and output
//!   records ([`NbboChange`], [`ExecutionReport`]) serialize to the wire
//!   shapes downstream consumers speak.
//!
//! - **Snapshots with integrity checks**: point-in-time JSON snapshots of
//!   both sides, optionally wrapped in a checksum-validated package.
//!
//! - **Multi-book routing**: a [`BookManager`] owns one book per option
//!   series and funnels every NBBO change into a single channel.
//!
//! ## Design
//!
//! The core is strictly single-threaded: mutating entry points take
//! `&mut self`, run to completion, and never block. Three structures are
//! kept mutually consistent under the event stream:
//!
//! ```text
//! OrderBook
//!   ├── orders: id → (side, tick, venue, qty)     live-order index
//!   ├── bids: SideBook ── ticks: BTreeSet<u32>    occupied price set
//!   │                 └── levels: tick → PriceLevel
//!   │                                └── [u32; NUM_VENUES] + aggregate
//!   └── asks: SideBook (same shape, reversed ordering)
//! ```
//!
//! Prices are integer tick indices at a fixed [`TICK_SIZE`]; the venue set
//! is a closed table of fourteen exchanges fixed at build time. A quantity
//! that would go negative, or a divergence between the tick set and the
//! level map, indicates an upstream sequencing bug with no safe partial
//! state, and panics.
//!
//! ## Example
//!
//! ```
//! use nbbo_book::{OrderBook, Side, Venue};
//!
//! let mut book = OrderBook::new("SPY 240621C00450000");
//!
//! // The first level on a side is not an improvement over a real price.
//! let quiet = book.on_add("a1", Venue::Cboe, Side::Bid, 10.00, 5).unwrap();
//! assert!(quiet.is_none());
//!
//! // A better bid displaces the old best and reports it.
//! let change = book
//!     .on_add("a2", Venue::Ise, Side::Bid, 10.01, 3)
//!     .unwrap()
//!     .expect("top of book moved");
//! assert_eq!(change.new_aggregate, 3);
//! assert_eq!(change.old_aggregate, 5);
//! assert_eq!(change.old_venues, "C");
//! assert_eq!(book.best_bid(), Some(10.01));
//!
//! // Executions report the post-trade level state instead.
//! let report = book.on_execute("a2", 3).unwrap();
//! assert_eq!(report.level_remaining, 0);
//! assert!(report.venues.is_empty());
//! assert_eq!(book.best_bid(), Some(10.00));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`orderbook::book`] | The coordinator: event entry points, queries, snapshots |
//! | [`orderbook::side`] | Side tag and per-side occupied level set |
//! | [`orderbook::level`] | Venue-sharded quantity bucket for one price |
//! | [`orderbook::tick`] | Price to tick-index conversion |
//! | [`orderbook::venue`] | The fixed venue table |
//! | [`orderbook::events`] | Input events, change records, listener alias |
//! | [`orderbook::snapshot`] | Serializable snapshots with checksums |
//! | [`orderbook::manager`] | Multi-book management and event routing |
//! | [`orderbook::error`] | Error types |
//!
//! ## What the core does not do
//!
//! No order matching, no time priority inside a price level, no sub-tick
//! price improvement, and no internal concurrency coordination. Feed
//! decoding, notification transport, persistence and gap recovery belong
//! to the surrounding pipeline.

pub mod orderbook;

pub mod prelude;
mod utils;

pub use orderbook::{
    price_to_tick, tick_to_price, BookManager, BookUpdate, ExecutionReport, LevelSnapshot,
    NbboChange, NbboEvent, NbboListener, OrderBook, OrderBookError, OrderBookSnapshot, OrderEvent,
    PriceLevel, Side, SideBook, SnapshotPackage, Venue, INV_TICK, MAX_TICK, NUM_VENUES,
    SNAPSHOT_FORMAT_VERSION, TICK_SIZE,
};
pub use utils::current_time_millis;
