use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::Quantity;

pub const ORDERS_ADDED: &str = "trade_cache_orders_added_total";
pub const ORDERS_REJECTED: &str = "trade_cache_orders_rejected_total";
pub const ORDERS_CANCELLED: &str = "trade_cache_orders_cancelled_total";
pub const MATCH_CALLS: &str = "trade_cache_match_calls_total";
pub const MATCHED_QUANTITY: &str = "trade_cache_matched_quantity";

pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe();
    Ok(handle)
}

fn describe() {
    describe_counter!(ORDERS_ADDED, "Orders accepted into the book");
    describe_counter!(ORDERS_REJECTED, "Orders refused by the book");
    describe_counter!(ORDERS_CANCELLED, "Orders removed by a cancellation");
    describe_counter!(MATCH_CALLS, "Matchable quantity computations");
    describe_histogram!(MATCHED_QUANTITY, "Quantity reported by each match computation");
}

pub(crate) fn order_added() {
    counter!(ORDERS_ADDED).increment(1);
}

pub(crate) fn order_rejected(reason: &'static str) {
    counter!(ORDERS_REJECTED, "reason" => reason).increment(1);
}

pub(crate) fn orders_cancelled(kind: &'static str, count: usize) {
    counter!(ORDERS_CANCELLED, "kind" => kind).increment(count as u64);
}

pub(crate) fn match_computed(matched: Quantity) {
    counter!(MATCH_CALLS).increment(1);
    histogram!(MATCHED_QUANTITY).record(matched as f64);
}
