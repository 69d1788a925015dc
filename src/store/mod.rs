//! Multi-index order storage.
//!
//! Orders live in a single slab. Every lookup structure is an ordered map
//! from a view key to the slab index of the order, and all of them are
//! updated together by [`OrderStore::insert`] and [`OrderStore::remove`].
//! Non-unique views end their keys with the insertion sequence of the order,
//! so equal keys enumerate in insertion order.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::ops::Bound::{self, Excluded, Included, Unbounded};

use slab::Slab;

use crate::models::{Order, OrderId, Quantity, SecurityId, Side, UserId};

pub type Seq = u64;

/// Key of the security+quantity view: security ascending, quantity ascending.
pub type QuantityKey = (SecurityId, Quantity, Seq);

/// Key of the security+side+quantity view: security and side ascending,
/// quantity descending.
pub type SideKey = (SecurityId, Side, Reverse<Quantity>, Seq);

type UserKey = (UserId, Seq);

#[derive(Debug, Clone)]
struct OrderNode {
    order: Order,
    seq: Seq,
}

impl OrderNode {
    fn quantity_key(&self) -> QuantityKey {
        (self.order.security_id.clone(), self.order.quantity, self.seq)
    }

    fn side_key(&self) -> SideKey {
        (
            self.order.security_id.clone(),
            self.order.side,
            Reverse(self.order.quantity),
            self.seq,
        )
    }

    fn user_key(&self) -> UserKey {
        (self.order.user_id.clone(), self.seq)
    }
}

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Slab<OrderNode>,
    next_seq: Seq,
    by_identity: BTreeMap<Order, usize>,
    by_order_id: BTreeMap<OrderId, usize>,
    by_security_quantity: BTreeMap<QuantityKey, usize>,
    by_security_side_quantity: BTreeMap<SideKey, usize>,
    by_user: BTreeMap<UserKey, usize>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Inserts into every view, or into none when the full tuple or the
    /// order id is already present.
    pub fn insert(&mut self, order: Order) -> bool {
        if self.by_identity.contains_key(&order) || self.by_order_id.contains_key(&order.order_id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        let node = OrderNode { order, seq };
        let quantity_key = node.quantity_key();
        let side_key = node.side_key();
        let user_key = node.user_key();
        let identity = node.order.clone();
        let order_id = node.order.order_id.clone();

        let idx = self.orders.insert(node);
        self.by_identity.insert(identity, idx);
        self.by_order_id.insert(order_id, idx);
        self.by_security_quantity.insert(quantity_key, idx);
        self.by_security_side_quantity.insert(side_key, idx);
        self.by_user.insert(user_key, idx);
        true
    }

    /// Removes the order at `idx` from every view.
    pub fn remove(&mut self, idx: usize) -> Option<Order> {
        let node = self.orders.try_remove(idx)?;
        self.by_identity.remove(&node.order);
        self.by_order_id.remove(&node.order.order_id);
        self.by_security_quantity.remove(&node.quantity_key());
        self.by_security_side_quantity.remove(&node.side_key());
        self.by_user.remove(&node.user_key());
        Some(node.order)
    }

    pub fn remove_all(&mut self, indices: Vec<usize>) -> usize {
        indices
            .into_iter()
            .filter_map(|idx| self.remove(idx))
            .count()
    }

    /// All live orders in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.by_identity.keys()
    }

    pub fn find_order_id(&self, order_id: &str) -> Option<usize> {
        self.by_order_id.get(order_id).copied()
    }

    pub fn user_orders(&self, user_id: &str) -> Vec<usize> {
        let lo = (user_id.to_string(), Seq::MIN);
        let hi = (user_id.to_string(), Seq::MAX);
        self.by_user.range(lo..=hi).map(|(_, &idx)| idx).collect()
    }

    /// Slab indices of `security_id` orders whose quantity lies within the
    /// given bounds, in ascending quantity order.
    pub fn quantity_range(
        &self,
        security_id: &str,
        lower: Bound<Quantity>,
        upper: Bound<Quantity>,
    ) -> Vec<usize> {
        let lo = match lower {
            Included(q) => Included((security_id.to_string(), q, Seq::MIN)),
            Excluded(q) => Excluded((security_id.to_string(), q, Seq::MAX)),
            Unbounded => Included((security_id.to_string(), Quantity::MIN, Seq::MIN)),
        };
        let hi = match upper {
            Included(q) => Included((security_id.to_string(), q, Seq::MAX)),
            Excluded(q) => Excluded((security_id.to_string(), q, Seq::MIN)),
            Unbounded => Included((security_id.to_string(), Quantity::MAX, Seq::MAX)),
        };
        if range_is_inverted(&lo, &hi) {
            return Vec::new();
        }
        self.by_security_quantity
            .range((lo, hi))
            .map(|(_, &idx)| idx)
            .collect()
    }

    /// Whether any entry of the security+quantity view sorts at or after the
    /// position described by `from`, irrespective of security.
    pub fn quantity_view_continues(&self, security_id: &str, from: Bound<Quantity>) -> bool {
        let start = match from {
            Included(q) => Included((security_id.to_string(), q, Seq::MIN)),
            Excluded(q) => Excluded((security_id.to_string(), q, Seq::MAX)),
            Unbounded => Included((security_id.to_string(), Quantity::MIN, Seq::MIN)),
        };
        self.by_security_quantity.range((start, Unbounded)).next().is_some()
    }

    pub fn count_security(&self, security_id: &str) -> usize {
        let lo = (security_id.to_string(), Quantity::MIN, Seq::MIN);
        let hi = (security_id.to_string(), Quantity::MAX, Seq::MAX);
        self.by_security_quantity.range(lo..=hi).count()
    }

    /// Orders of one security and side with quantity in `1..=max_quantity`,
    /// largest quantity first.
    pub fn side_orders(
        &self,
        security_id: &str,
        side: Side,
        max_quantity: Quantity,
    ) -> impl Iterator<Item = (&SideKey, &Order)> + '_ {
        let lo = (security_id.to_string(), side, Reverse(max_quantity), Seq::MIN);
        let hi = (security_id.to_string(), side, Reverse(1), Seq::MAX);
        let entries = if max_quantity == 0 {
            None
        } else {
            Some(self.by_security_side_quantity.range(lo..=hi))
        };
        entries
            .into_iter()
            .flatten()
            .map(move |(key, &idx)| (key, &self.orders[idx].order))
    }

    /// Takes an entry out of the security+side+quantity view only. The order
    /// stays in every other view until [`OrderStore::attach_side_entry`]
    /// puts it back.
    pub fn detach_side_entry(&mut self, key: &SideKey) -> Option<usize> {
        self.by_security_side_quantity.remove(key)
    }

    pub fn attach_side_entry(&mut self, key: SideKey, idx: usize) {
        self.by_security_side_quantity.insert(key, idx);
    }

    #[cfg(test)]
    fn side_view_len(&self) -> usize {
        self.by_security_side_quantity.len()
    }
}

fn range_is_inverted(lo: &Bound<QuantityKey>, hi: &Bound<QuantityKey>) -> bool {
    match (lo, hi) {
        (Included(a), Included(b)) => a > b,
        (Included(a), Excluded(b))
        | (Excluded(a), Included(b))
        | (Excluded(a), Excluded(b)) => a >= b,
        _ => false,
    }
}
