use trade_cache::{Order, OrderBook, Side};

const SEC: &str = "US5422358DA3";

fn book_with(orders: &[(&str, &str, Side, u64, &str, &str)]) -> OrderBook {
    let mut book = OrderBook::new();
    for &(id, sec, side, qty, user, company) in orders {
        book.add(Order::new(id, sec, side, qty, user, company)).unwrap();
    }
    book
}

fn mixed_book() -> OrderBook {
    book_with(&[
        ("OrdId1", "US9128473801", Side::Buy, 1000, "User1", "CompanyA"),
        ("OrdId2", SEC, Side::Sell, 3000, "User2", "CompanyB"),
        ("OrdId3", "US9128473801", Side::Sell, 500, "User3", "CompanyA"),
        ("OrdId4", SEC, Side::Buy, 600, "User4", "CompanyC"),
        ("OrdId5", SEC, Side::Buy, 100, "User5", "CompanyB"),
        ("OrdId6", "US19635GY645", Side::Buy, 1000, "User6", "CompanyD"),
        ("OrdId7", SEC, Side::Buy, 2000, "User7", "CompanyE"),
        ("OrdId8", SEC, Side::Sell, 5000, "User8", "CompanyE"),
    ])
}

fn same_quantity_book() -> OrderBook {
    book_with(&[
        ("OrdId2", SEC, Side::Buy, 100, "User1", "CompanyA"),
        ("OrdId3", SEC, Side::Sell, 1000, "User2", "CompanyB"),
        ("OrdId4", SEC, Side::Sell, 100, "User3", "CompanyA"),
        ("OrdId5", SEC, Side::Buy, 1000, "User4", "CompanyC"),
    ])
}

fn first_higher_book() -> OrderBook {
    book_with(&[
        ("OrdId2", SEC, Side::Buy, 600, "User1", "CompanyA"),
        ("OrdId4", SEC, Side::Sell, 700, "User2", "CompanyB"),
        ("OrdId3", SEC, Side::Sell, 100, "User3", "CompanyC"),
        ("OrdId5", SEC, Side::Sell, 800, "User3", "CompanyD"),
    ])
}

#[test]
fn sell_side_matches_against_buys() {
    let mut book = mixed_book();
    assert_eq!(book.match_orders(SEC, Side::Sell), 2700);
}

#[test]
fn buy_side_finds_no_small_enough_sells() {
    let mut book = mixed_book();
    assert_eq!(book.match_orders(SEC, Side::Buy), 0);
}

#[test]
fn repeated_match_returns_same_total_and_keeps_book() {
    let mut book = mixed_book();
    let before: Vec<Order> = book.orders().cloned().collect();
    assert_eq!(book.match_orders(SEC, Side::Sell), 2700);
    assert_eq!(book.match_orders(SEC, Side::Sell), 2700);
    let after: Vec<Order> = book.orders().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(book.count_orders(SEC), 5);
}

#[test]
fn same_quantity_orders_match_both_ways() {
    let mut book = same_quantity_book();
    assert_eq!(book.match_orders(SEC, Side::Buy), 1000);
    assert_eq!(book.match_orders(SEC, Side::Sell), 1000);
}

#[test]
fn larger_candidates_are_skipped_for_taker_cap() {
    let mut book = first_higher_book();
    assert_eq!(book.match_orders(SEC, Side::Buy), 100);
}

#[test]
fn own_company_never_contributes() {
    let mut book = book_with(&[
        ("T1", SEC, Side::Buy, 500, "User1", "CompanyA"),
        ("M1", SEC, Side::Sell, 400, "User2", "CompanyA"),
        ("M2", SEC, Side::Sell, 300, "User3", "CompanyA"),
    ]);
    assert_eq!(book.match_orders(SEC, Side::Buy), 0);
    assert_eq!(book.match_orders(SEC, Side::Sell), 0);
}

#[test]
fn skipped_company_does_not_stop_the_scan() {
    let mut book = book_with(&[
        ("T1", SEC, Side::Buy, 500, "User1", "CompanyA"),
        ("M1", SEC, Side::Sell, 400, "User2", "CompanyA"),
        ("M2", SEC, Side::Sell, 300, "User3", "CompanyB"),
        ("M3", SEC, Side::Sell, 200, "User4", "CompanyC"),
    ]);
    assert_eq!(book.match_orders(SEC, Side::Buy), 500);
}

#[test]
fn unknown_security_matches_nothing() {
    let mut book = mixed_book();
    assert_eq!(book.match_orders("NOPE", Side::Sell), 0);
    assert_eq!(book.len(), 8);
}

#[test]
fn matching_after_cancellation_sees_the_change() {
    let mut book = mixed_book();
    assert_eq!(book.cancel_single_order("OrdId7"), 1);
    assert_eq!(book.match_orders(SEC, Side::Sell), 700);
}
