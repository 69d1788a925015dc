use std::thread;

use trade_cache::{Order, SharedOrderBook, Side};

#[test]
fn concurrent_adds_and_matches_stay_consistent() {
    let book = SharedOrderBook::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let book = book.clone();
            thread::spawn(move || {
                for i in 0..50u64 {
                    let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                    let order = Order::new(
                        format!("T{t}-{i}"),
                        "SEC",
                        side,
                        10 + i,
                        format!("User{t}"),
                        format!("Company{t}"),
                    );
                    assert!(book.add(order).unwrap());
                    book.match_orders("SEC", side);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(book.len(), 200);
    assert_eq!(book.count_orders("SEC"), 200);

    let first = book.match_orders("SEC", Side::Buy);
    assert_eq!(book.match_orders("SEC", Side::Buy), first);
    assert_eq!(book.snapshot().len(), 200);
}

#[test]
fn cancellations_through_handle() {
    let book = SharedOrderBook::new();
    book.add(Order::new("OrdId1", "SEC", Side::Buy, 100, "User1", "CompanyA")).unwrap();
    book.add(Order::new("OrdId2", "SEC", Side::Sell, 200, "User1", "CompanyB")).unwrap();
    book.add(Order::new("OrdId3", "SEC", Side::Sell, 300, "User2", "CompanyB")).unwrap();
    assert!(book.cancel_all_orders_above_quantity("SEC", 250));
    assert!(book.cancel_all_orders_at_quantity("SEC", 200));
    assert_eq!(book.cancel_all_orders_by_user_id("User1"), 1);
    assert_eq!(book.cancel_single_order("OrdId3"), 0);
    assert!(book.is_empty());
}
