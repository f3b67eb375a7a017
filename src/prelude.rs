//! Prelude module that re-exports commonly used types.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use nbbo_book::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::OrderBook;
pub use crate::orderbook::OrderBookError;
pub use crate::orderbook::manager::{BookManager, NbboEvent};

// Event and result types
pub use crate::orderbook::events::{
    BookUpdate, ExecutionReport, NbboChange, NbboListener, OrderEvent,
};

// Snapshot types
pub use crate::orderbook::snapshot::{LevelSnapshot, OrderBookSnapshot, SnapshotPackage};

// Market structure types
pub use crate::orderbook::side::Side;
pub use crate::orderbook::venue::{Venue, NUM_VENUES};

// Tick codec
pub use crate::orderbook::tick::{price_to_tick, tick_to_price, TICK_SIZE};
