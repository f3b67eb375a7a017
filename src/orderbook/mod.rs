//! Consolidated multi-venue order book: the price levels, side books,
//! the coordinator, and its event types.

pub mod book;
pub mod error;
/// Normalized input events, NBBO change and execution records.
pub mod events;
pub mod level;
/// Multi-book management with centralized NBBO event routing.
pub mod manager;
pub mod side;
pub mod snapshot;
/// Price to tick-index conversion.
pub mod tick;
/// The fixed venue table.
pub mod venue;

#[cfg(test)]
mod tests;

pub use book::OrderBook;
pub use error::OrderBookError;
pub use events::{BookUpdate, ExecutionReport, NbboChange, NbboListener, OrderEvent};
pub use level::PriceLevel;
pub use manager::{BookManager, NbboEvent};
pub use side::{Side, SideBook};
pub use snapshot::{LevelSnapshot, OrderBookSnapshot, SnapshotPackage, SNAPSHOT_FORMAT_VERSION};
pub use tick::{price_to_tick, tick_to_price, INV_TICK, MAX_TICK, TICK_SIZE};
pub use venue::{Venue, NUM_VENUES};
