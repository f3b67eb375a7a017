//! Multi-book management with centralized NBBO event routing.
//!
//! Options feeds carry many series at once; a [`BookManager`] owns one
//! [`OrderBook`] per symbol and wires every book's NBBO listener to a
//! single channel, so a host drains one receiver instead of polling
//! every book.

use super::book::OrderBook;
use super::events::NbboChange;
use super::side::Side;
use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{error, info};

/// An NBBO change routed through a manager, tagged with the symbol of
/// the book it happened on.
#[derive(Debug, Clone, PartialEq)]
pub struct NbboEvent {
    /// Symbol of the book that produced the change
    pub symbol: String,
    /// Side the top of book moved on
    pub side: Side,
    /// The change record
    pub change: NbboChange,
}

/// Manages multiple order books with centralized NBBO event routing over
/// a standard library mpsc channel.
pub struct BookManager {
    /// Collection of order books indexed by symbol
    books: HashMap<String, OrderBook>,
    /// Sender cloned into every managed book's listener
    sender: mpsc::Sender<NbboEvent>,
    /// Receiver for NBBO events (taken by the host)
    receiver: Option<mpsc::Receiver<NbboEvent>>,
}

impl BookManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            books: HashMap::new(),
            sender,
            receiver: Some(receiver),
        }
    }

    /// Add a new order book for a symbol with its NBBO listener wired to
    /// the manager's channel. Replaces any existing book for the symbol.
    pub fn add_book(&mut self, symbol: &str) {
        let sender = self.sender.clone();
        let event_symbol = symbol.to_string();
        let listener = Arc::new(move |side: Side, change: &NbboChange| {
            let event = NbboEvent {
                symbol: event_symbol.clone(),
                side,
                change: change.clone(),
            };
            if let Err(send_error) = sender.send(event) {
                error!(
                    "Failed to forward NBBO event for {}: {}",
                    event_symbol, send_error
                );
            }
        });
        let book = OrderBook::with_nbbo_listener(symbol, listener);
        info!("Added order book for symbol {}", symbol);
        self.books.insert(symbol.to_string(), book);
    }

    /// Take the NBBO event receiver. Returns `None` after the first
    /// call.
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<NbboEvent>> {
        self.receiver.take()
    }

    /// Get a reference to an order book by symbol.
    #[must_use]
    pub fn get_book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    /// Get a mutable reference to an order book by symbol.
    pub fn get_book_mut(&mut self, symbol: &str) -> Option<&mut OrderBook> {
        self.books.get_mut(symbol)
    }

    /// Get the list of all symbols with order books in this manager.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.books.keys().cloned().collect()
    }

    /// Remove an order book for a specific symbol.
    pub fn remove_book(&mut self, symbol: &str) -> Option<OrderBook> {
        let removed = self.books.remove(symbol);
        if removed.is_some() {
            info!("Removed order book for symbol {}", symbol);
        }
        removed
    }

    /// Check if a book exists for a specific symbol.
    #[must_use]
    pub fn has_book(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    /// Get the number of order books in this manager.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

impl Default for BookManager {
    fn default() -> Self {
        Self::new()
    }
}
