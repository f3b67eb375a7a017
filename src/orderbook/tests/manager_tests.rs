//! Tests for multi-book management and NBBO routing

#[cfg(test)]
mod tests {
    use crate::orderbook::manager::BookManager;
    use crate::orderbook::side::Side;
    use crate::orderbook::tests::test_helpers::approx;
    use crate::orderbook::venue::Venue;

    #[test]
    fn test_book_lifecycle() {
        let mut manager = BookManager::new();
        assert_eq!(manager.book_count(), 0);

        manager.add_book("AAPL");
        manager.add_book("SPX");
        assert_eq!(manager.book_count(), 2);
        assert!(manager.has_book("AAPL"));
        assert!(manager.get_book("AAPL").is_some());
        assert!(manager.get_book("MSFT").is_none());

        let mut symbols = manager.symbols();
        symbols.sort();
        assert_eq!(symbols, vec!["AAPL".to_string(), "SPX".to_string()]);

        let removed = manager.remove_book("AAPL");
        assert!(removed.is_some());
        assert!(!manager.has_book("AAPL"));
        assert!(manager.remove_book("AAPL").is_none());
    }

    #[test]
    fn test_nbbo_events_are_routed_with_symbol() {
        let mut manager = BookManager::new();
        let receiver = manager.take_receiver().unwrap();
        assert!(manager.take_receiver().is_none());

        manager.add_book("AAPL");
        manager.add_book("SPX");

        {
            let book = manager.get_book_mut("AAPL").unwrap();
            book.on_add("a1", Venue::Cboe, Side::Bid, 10.00, 5).unwrap();
            book.on_add("a2", Venue::Ise, Side::Bid, 10.01, 3).unwrap();
        }
        {
            let book = manager.get_book_mut("SPX").unwrap();
            // Quiet add: first level on the side.
            book.on_add("s1", Venue::Box, Side::Ask, 50.00, 1).unwrap();
        }

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.symbol, "AAPL");
        assert_eq!(event.side, Side::Bid);
        assert!(approx(event.change.new_price, 10.01));
        assert_eq!(event.change.old_venues, "C");

        // The quiet add produced nothing.
        assert!(receiver.try_recv().is_err());
    }
}
