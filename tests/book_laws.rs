//! Algebraic laws the book must satisfy across event sequences.

use nbbo_book::{LevelSnapshot, OrderBook, OrderBookSnapshot, Side, Venue};

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// Level data of a snapshot without the timestamp, for state comparison.
fn levels(snapshot: &OrderBookSnapshot) -> (Vec<LevelSnapshot>, Vec<LevelSnapshot>) {
    (snapshot.bids.clone(), snapshot.asks.clone())
}

fn seeded_book() -> OrderBook {
    let mut book = OrderBook::new("XYZ");
    book.on_add("b1", Venue::Cboe, Side::Bid, 10.00, 5).unwrap();
    book.on_add("b2", Venue::Ise, Side::Bid, 10.01, 3).unwrap();
    book.on_add("b3", Venue::Box, Side::Bid, 9.97, 8).unwrap();
    book.on_add("s1", Venue::Arca, Side::Ask, 10.05, 4).unwrap();
    book.on_add("s2", Venue::Ndq, Side::Ask, 10.03, 6).unwrap();
    book
}

#[test]
fn add_then_cancel_restores_prior_state() {
    let mut book = seeded_book();
    let before = levels(&book.book_snapshot());
    let orders_before = book.live_orders();

    book.on_add("tmp", Venue::Mrx, Side::Bid, 10.02, 7).unwrap();
    book.on_cancel("tmp");

    assert_eq!(levels(&book.book_snapshot()), before);
    assert_eq!(book.live_orders(), orders_before);
    assert!(!book.is_live("tmp"));
}

#[test]
fn full_execution_removes_order_and_later_cancel_is_noop() {
    let mut book = seeded_book();

    book.on_execute("b2", 99).unwrap();
    assert!(!book.is_live("b2"));

    let before = levels(&book.book_snapshot());
    book.on_cancel("b2");
    assert_eq!(levels(&book.book_snapshot()), before);
}

#[test]
fn partial_executions_accumulate_to_removal() {
    let mut book = seeded_book();

    book.on_execute("s2", 2).unwrap();
    assert_eq!(book.remaining_qty("s2"), Some(4));
    book.on_execute("s2", 4).unwrap();
    assert!(!book.is_live("s2"));
    assert!(approx(book.best_ask().unwrap(), 10.05));
}

#[test]
fn replace_equals_add_then_cancel() {
    let mut replaced = seeded_book();
    let mut sequential = seeded_book();

    let change_replace = replaced
        .on_replace("n1", "b2", Venue::Ise, Side::Bid, 10.02, 3)
        .unwrap();

    let change_add = sequential
        .on_add("n1", Venue::Ise, Side::Bid, 10.02, 3)
        .unwrap();
    sequential.on_cancel("b2");

    assert_eq!(change_replace, change_add);
    assert_eq!(
        levels(&replaced.book_snapshot()),
        levels(&sequential.book_snapshot())
    );
    assert_eq!(replaced.live_orders(), sequential.live_orders());
}

#[test]
fn booked_quantity_equals_live_order_quantity() {
    let mut book = OrderBook::new("XYZ");
    let oids = [
        ("o1", Venue::Cboe, Side::Bid, 10.00, 5u32),
        ("o2", Venue::Cboe, Side::Bid, 10.00, 3),
        ("o3", Venue::Ise, Side::Bid, 10.01, 7),
        ("o4", Venue::C2, Side::Ask, 10.04, 2),
        ("o5", Venue::Amex, Side::Ask, 10.09, 11),
        ("o6", Venue::Box, Side::Ask, 10.04, 6),
    ];
    for (oid, venue, side, price, qty) in oids {
        book.on_add(oid, venue, side, price, qty).unwrap();
    }
    book.on_execute("o5", 4).unwrap();
    book.on_cancel("o2");
    book.on_replace("o7", "o3", Venue::Ise, Side::Bid, 10.02, 7)
        .unwrap();

    let snapshot = book.book_snapshot();
    let booked: u64 = snapshot
        .bids
        .iter()
        .chain(snapshot.asks.iter())
        .map(|level| u64::from(level.aggregate))
        .sum();
    let live: u64 = ["o1", "o2", "o3", "o4", "o5", "o6", "o7"]
        .iter()
        .filter_map(|oid| book.remaining_qty(oid))
        .map(u64::from)
        .sum();

    assert_eq!(booked, live);

    // Per-level aggregates also match their venue vectors.
    for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
        let sum: u64 = level.venue_qty.iter().map(|&q| u64::from(q)).sum();
        assert_eq!(u64::from(level.aggregate), sum);
        assert!(level.aggregate > 0);
    }
}

#[test]
fn best_prices_track_occupied_levels() {
    let mut book = seeded_book();
    assert!(approx(book.best_bid().unwrap(), 10.01));
    assert!(approx(book.best_ask().unwrap(), 10.03));

    book.on_cancel("b2");
    assert!(approx(book.best_bid().unwrap(), 10.00));
    book.on_cancel("b1");
    assert!(approx(book.best_bid().unwrap(), 9.97));
    book.on_cancel("b3");
    assert_eq!(book.best_bid(), None);

    book.on_execute("s2", 6).unwrap();
    assert!(approx(book.best_ask().unwrap(), 10.05));
}
