use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{Order, Quantity, Side};
use crate::orderbook::{BookError, OrderBook};

/// Cloneable handle for callers on several threads.
///
/// Counting and snapshots share the read lock. Everything that can change the
/// book, including matching with its temporary hold on candidates, takes the
/// write lock for the whole operation.
#[derive(Debug, Clone, Default)]
pub struct SharedOrderBook {
    inner: Arc<RwLock<OrderBook>>,
}

impl SharedOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, order: Order) -> Result<bool, BookError> {
        self.inner.write().add(order)
    }

    pub fn cancel_single_order(&self, order_id: &str) -> usize {
        self.inner.write().cancel_single_order(order_id)
    }

    pub fn cancel_all_orders_by_user_id(&self, user_id: &str) -> usize {
        self.inner.write().cancel_all_orders_by_user_id(user_id)
    }

    pub fn cancel_all_orders_at_quantity(&self, security_id: &str, quantity: Quantity) -> bool {
        self.inner.write().cancel_all_orders_at_quantity(security_id, quantity)
    }

    pub fn cancel_all_orders_above_quantity(&self, security_id: &str, quantity: Quantity) -> bool {
        self.inner.write().cancel_all_orders_above_quantity(security_id, quantity)
    }

    pub fn match_orders(&self, security_id: &str, side: Side) -> Quantity {
        self.inner.write().match_orders(security_id, side)
    }

    pub fn count_orders(&self, security_id: &str) -> usize {
        self.inner.read().count_orders(security_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copies the live orders out in identity order.
    pub fn snapshot(&self) -> Vec<Order> {
        self.inner.read().orders().cloned().collect()
    }
}
