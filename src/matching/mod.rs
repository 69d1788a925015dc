pub mod reservation;

use tracing::trace;

use crate::models::{Quantity, Side};
use crate::store::OrderStore;

pub use reservation::Reservation;

/// Total `side` quantity of `security_id` that resting opposite orders could
/// absorb.
///
/// Takers are visited largest first. Each taker scans opposite orders from
/// the largest quantity not above its own, skipping its own company, and
/// stops at the first candidate that would push the running sum past the
/// taker's quantity. Accepted candidates are held out of later scans for the
/// rest of the pass and restored before returning.
pub fn matchable_quantity(store: &mut OrderStore, security_id: &str, side: Side) -> Quantity {
    let takers: Vec<(Quantity, String, String)> = store
        .side_orders(security_id, side, Quantity::MAX)
        .map(|(_, order)| (order.quantity, order.company_name.clone(), order.order_id.clone()))
        .collect();
    let contra = side.opposite();

    let mut reservation = Reservation::new(store);
    let mut total: Quantity = 0;

    for (cap, company, taker_id) in takers {
        let mut filled: Quantity = 0;
        let mut accepted = Vec::new();
        for (key, candidate) in reservation.store().side_orders(security_id, contra, cap) {
            if candidate.company_name == company {
                continue;
            }
            let Some(next) = filled.checked_add(candidate.quantity).filter(|&sum| sum <= cap) else {
                break;
            };
            filled = next;
            trace!(
                taker = %taker_id,
                maker = %candidate.order_id,
                qty = candidate.quantity,
                "matched"
            );
            accepted.push(key.clone());
        }
        for key in accepted {
            reservation.hold(key);
        }
        total = total.saturating_add(filled);
    }

    trace!(held = reservation.held(), total, "releasing held candidates");
    total
}
