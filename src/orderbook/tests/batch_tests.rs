//! Tests for batch event application and event serialization

#[cfg(test)]
mod tests {
    use crate::orderbook::book::OrderBook;
    use crate::orderbook::error::OrderBookError;
    use crate::orderbook::events::{BookUpdate, OrderEvent};
    use crate::orderbook::side::Side;
    use crate::orderbook::tests::test_helpers::{approx, assert_price};
    use crate::orderbook::venue::Venue;

    fn add(oid: &str, venue: Venue, side: Side, price: f64, qty: u32) -> OrderEvent {
        OrderEvent::Add {
            oid: oid.to_string(),
            venue,
            side,
            price,
            qty,
        }
    }

    #[test]
    fn test_batch_collects_reportable_results_in_order() {
        let mut book = OrderBook::new("TEST");
        let events = vec![
            add("a", Venue::Cboe, Side::Bid, 10.00, 5),
            add("b", Venue::Ise, Side::Bid, 10.01, 3), // NBBO change
            OrderEvent::Cancel {
                oid: "a".to_string(),
            },
            OrderEvent::Execute {
                oid: "b".to_string(),
                exec_qty: 1,
            },
            OrderEvent::Replace {
                new_oid: "c".to_string(),
                old_oid: "b".to_string(),
                venue: Venue::Ise,
                side: Side::Bid,
                price: 10.02,
                qty: 4,
            }, // NBBO change
        ];

        let updates = book.on_batch(events).unwrap();
        assert_eq!(updates.len(), 3);

        match &updates[0] {
            BookUpdate::Nbbo(change) => {
                assert!(approx(change.new_price, 10.01));
                assert!(approx(change.old_price, 10.00));
            }
            other => panic!("expected NBBO change, got {other:?}"),
        }
        match &updates[1] {
            BookUpdate::Execution(report) => {
                assert!(approx(report.exec_price, 10.01));
                assert_eq!(report.level_remaining, 2);
            }
            other => panic!("expected execution report, got {other:?}"),
        }
        match &updates[2] {
            BookUpdate::Nbbo(change) => {
                assert!(approx(change.new_price, 10.02));
                assert!(approx(change.old_price, 10.01));
            }
            other => panic!("expected NBBO change, got {other:?}"),
        }

        assert_price(book.best_bid(), 10.02);
        assert!(!book.is_live("a"));
        assert!(!book.is_live("b"));
        assert_eq!(book.remaining_qty("c"), Some(4));
    }

    #[test]
    fn test_batch_error_keeps_applied_events() {
        let mut book = OrderBook::new("TEST");
        let events = vec![
            add("a", Venue::Cboe, Side::Bid, 10.00, 5),
            add("a", Venue::Ise, Side::Bid, 10.01, 3), // duplicate id
            add("b", Venue::Box, Side::Bid, 10.02, 2), // never applied
        ];

        let result = book.on_batch(events);
        assert!(matches!(result, Err(OrderBookError::DuplicateOrderId(_))));

        // The first event stays applied; the failing one and everything
        // after it never touched the book.
        assert_price(book.best_bid(), 10.00);
        assert!(book.is_live("a"));
        assert!(!book.is_live("b"));
    }

    #[test]
    fn test_batch_may_return_fewer_results_than_events() {
        let mut book = OrderBook::new("TEST");
        let events = vec![
            add("a", Venue::Cboe, Side::Bid, 10.00, 5),
            add("b", Venue::Ise, Side::Bid, 10.00, 5),
            OrderEvent::Cancel {
                oid: "ghost".to_string(),
            },
        ];
        let updates = book.on_batch(events).unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn test_event_json_shapes() {
        let event = add("o-1", Venue::Cboe, Side::Bid, 10.0, 5);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"add","oid":"o-1","venue":"C","side":"BID","price":10.0,"qty":5}"#
        );

        let decoded: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);

        let cancel: OrderEvent =
            serde_json::from_str(r#"{"type":"cancel","oid":"o-1"}"#).unwrap();
        assert_eq!(
            cancel,
            OrderEvent::Cancel {
                oid: "o-1".to_string()
            }
        );

        let execute: OrderEvent =
            serde_json::from_str(r#"{"type":"execute","oid":"o-1","exec_qty":3}"#).unwrap();
        assert_eq!(
            execute,
            OrderEvent::Execute {
                oid: "o-1".to_string(),
                exec_qty: 3
            }
        );
    }

    #[test]
    fn test_event_with_unknown_venue_fails_to_decode() {
        let result = serde_json::from_str::<OrderEvent>(
            r#"{"type":"add","oid":"o","venue":"Q","side":"BID","price":1.0,"qty":1}"#,
        );
        assert!(result.is_err());
    }
}
