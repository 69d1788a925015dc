use std::ops::Bound::{Excluded, Included, Unbounded};

use tracing::{debug, instrument, warn};

use crate::matching;
use crate::metrics;
use crate::models::{Order, OrderId, Quantity, Side};
use crate::store::OrderStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("order {order_id} has zero quantity")]
    ZeroQuantity { order_id: OrderId },
}

/// Resting orders for any number of securities.
#[derive(Debug, Default)]
pub struct OrderBook {
    store: OrderStore,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Adds an order to the book.
    ///
    /// Returns `Ok(false)` without touching the book when an identical order,
    /// or an order with the same id, is already resting.
    pub fn add(&mut self, order: Order) -> Result<bool, BookError> {
        if order.quantity == 0 {
            metrics::order_rejected("zero_quantity");
            return Err(BookError::ZeroQuantity {
                order_id: order.order_id,
            });
        }
        let order_id = order.order_id.clone();
        let added = self.store.insert(order);
        if added {
            metrics::order_added();
            debug!(%order_id, "order added");
        } else {
            metrics::order_rejected("duplicate");
            debug!(%order_id, "duplicate order ignored");
        }
        Ok(added)
    }

    pub fn cancel_single_order(&mut self, order_id: &str) -> usize {
        let removed = self
            .store
            .find_order_id(order_id)
            .and_then(|idx| self.store.remove(idx))
            .map_or(0, |_| 1);
        metrics::orders_cancelled("order_id", removed);
        debug!(order_id, removed, "cancel single order");
        removed
    }

    pub fn cancel_all_orders_by_user_id(&mut self, user_id: &str) -> usize {
        let indices = self.store.user_orders(user_id);
        let removed = self.store.remove_all(indices);
        metrics::orders_cancelled("user_id", removed);
        debug!(user_id, removed, "cancel orders by user");
        removed
    }

    /// Cancels every `security_id` order resting at exactly `quantity`.
    ///
    /// The result reports whether the security+quantity view has any entry
    /// at or after `(security_id, quantity)`, evaluated before erasing. It is
    /// therefore `true` whenever something was cancelled, and may also be
    /// `true` when nothing matched but larger keys exist.
    pub fn cancel_all_orders_at_quantity(&mut self, security_id: &str, quantity: Quantity) -> bool {
        let found = self.store.quantity_view_continues(security_id, Included(quantity));
        let indices = self
            .store
            .quantity_range(security_id, Included(quantity), Included(quantity));
        let removed = self.store.remove_all(indices);
        metrics::orders_cancelled("at_quantity", removed);
        debug!(security_id, quantity, removed, found, "cancel orders at quantity");
        found
    }

    /// Cancels every `security_id` order with quantity strictly above
    /// `quantity`.
    ///
    /// Like [`OrderBook::cancel_all_orders_at_quantity`], the result reports
    /// whether the view has any entry after `(security_id, quantity)`.
    pub fn cancel_all_orders_above_quantity(
        &mut self,
        security_id: &str,
        quantity: Quantity,
    ) -> bool {
        let found = self.store.quantity_view_continues(security_id, Excluded(quantity));
        let indices = self
            .store
            .quantity_range(security_id, Excluded(quantity), Unbounded);
        let removed = self.store.remove_all(indices);
        metrics::orders_cancelled("above_quantity", removed);
        debug!(security_id, quantity, removed, found, "cancel orders above quantity");
        found
    }

    pub fn count_orders(&self, security_id: &str) -> usize {
        self.store.count_security(security_id)
    }

    /// Quantity on `side` of `security_id` that could be matched against the
    /// opposite side. The book is left exactly as it was.
    #[instrument(skip(self))]
    pub fn match_orders(&mut self, security_id: &str, side: Side) -> Quantity {
        let matched = matching::matchable_quantity(&mut self.store, security_id, side);
        metrics::match_computed(matched);
        debug!(matched, "match computed");
        matched
    }

    /// String-typed variant of [`OrderBook::match_orders`]; anything other
    /// than `Buy` or `Sell` matches nothing.
    pub fn match_orders_by_side_name(&mut self, security_id: &str, side: &str) -> Quantity {
        match side.parse::<Side>() {
            Ok(side) => self.match_orders(security_id, side),
            Err(err) => {
                warn!(security_id, %err, "match requested for unknown side");
                0
            }
        }
    }

    /// Live orders in identity order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.store.iter()
    }
}
