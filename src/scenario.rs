//! Scripted runs against a fresh book, used by the command line driver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Order, Quantity};
use crate::orderbook::{BookError, OrderBook};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CancelSingleOrder { order_id: String },
    CancelAllOrdersByUserId { user_id: String },
    CancelAllOrdersAtQuantity { security_id: String, quantity: Quantity },
    CancelAllOrdersAboveQuantity { security_id: String, quantity: Quantity },
    CountOrders { security_id: String },
    /// `side` stays textual so unknown sides can be scripted.
    MatchOrders { security_id: String, side: String },
    Dump {
        #[serde(default)]
        comment: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Cancelled(usize),
    RangeFound(bool),
    Count(usize),
    Matched(Quantity),
    Orders(Vec<Order>),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub added: usize,
    pub ignored: usize,
    pub steps: Vec<StepReport>,
}

impl Scenario {
    pub fn run(&self) -> Result<ScenarioReport, BookError> {
        let mut book = OrderBook::new();
        let mut added = 0;
        for order in &self.orders {
            if book.add(order.clone())? {
                added += 1;
            }
        }

        let steps = self
            .steps
            .iter()
            .map(|step| StepReport {
                step: step.clone(),
                outcome: step.apply(&mut book),
            })
            .collect();

        Ok(ScenarioReport {
            name: self.name.clone(),
            added,
            ignored: self.orders.len() - added,
            steps,
        })
    }
}

impl Step {
    pub fn apply(&self, book: &mut OrderBook) -> Outcome {
        match self {
            Self::CancelSingleOrder { order_id } => {
                Outcome::Cancelled(book.cancel_single_order(order_id))
            }
            Self::CancelAllOrdersByUserId { user_id } => {
                Outcome::Cancelled(book.cancel_all_orders_by_user_id(user_id))
            }
            Self::CancelAllOrdersAtQuantity { security_id, quantity } => {
                Outcome::RangeFound(book.cancel_all_orders_at_quantity(security_id, *quantity))
            }
            Self::CancelAllOrdersAboveQuantity { security_id, quantity } => {
                Outcome::RangeFound(book.cancel_all_orders_above_quantity(security_id, *quantity))
            }
            Self::CountOrders { security_id } => Outcome::Count(book.count_orders(security_id)),
            Self::MatchOrders { security_id, side } => {
                Outcome::Matched(book.match_orders_by_side_name(security_id, side))
            }
            Self::Dump { .. } => Outcome::Orders(book.orders().cloned().collect()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CancelSingleOrder { order_id } => write!(f, "cancelSingleOrder {order_id}"),
            Self::CancelAllOrdersByUserId { user_id } => {
                write!(f, "cancelAllOrdersByUserId {user_id}")
            }
            Self::CancelAllOrdersAtQuantity { security_id, quantity } => {
                write!(f, "cancelAllOrdersAtQuantity {security_id} {quantity}")
            }
            Self::CancelAllOrdersAboveQuantity { security_id, quantity } => {
                write!(f, "cancelAllOrdersAboveQuantity {security_id} {quantity}")
            }
            Self::CountOrders { security_id } => write!(f, "countOrders {security_id}"),
            Self::MatchOrders { security_id, side } => {
                write!(f, "matchOrders {security_id} {side}")
            }
            Self::Dump { comment } => f.write_str(comment),
        }
    }
}

/// Plain-text rendering: dumps list one order per line between `orders:`
/// and `orders end`, matches print `Total Matched: N`.
impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "== {} ({} orders, {} ignored) ==",
            self.name, self.added, self.ignored
        )?;
        for entry in &self.steps {
            match &entry.outcome {
                Outcome::Orders(orders) => {
                    writeln!(f)?;
                    writeln!(f, "{}", entry.step)?;
                    writeln!(f, "orders: ")?;
                    for order in orders {
                        writeln!(f, "{order}")?;
                    }
                    writeln!(f, "orders end")?;
                }
                Outcome::Matched(total) => {
                    writeln!(f, "{}", entry.step)?;
                    writeln!(f, "Total Matched: {total}")?;
                }
                Outcome::Cancelled(count) | Outcome::Count(count) => {
                    writeln!(f, "{} -> {count}", entry.step)?;
                }
                Outcome::RangeFound(found) => writeln!(f, "{} -> {found}", entry.step)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;

    fn scenario() -> Scenario {
        Scenario {
            name: "small".to_string(),
            orders: vec![
                Order::new("OrdId1", "SEC", Side::Buy, 100, "User1", "CompanyA"),
                Order::new("OrdId2", "SEC", Side::Sell, 100, "User2", "CompanyB"),
                Order::new("OrdId2", "SEC", Side::Sell, 100, "User2", "CompanyB"),
            ],
            steps: vec![
                Step::MatchOrders {
                    security_id: "SEC".into(),
                    side: "Sell".into(),
                },
                Step::CancelSingleOrder {
                    order_id: "OrdId2".into(),
                },
                Step::Dump {
                    comment: "after cancel".into(),
                },
            ],
        }
    }

    #[test]
    fn run_reports_each_step() {
        let report = scenario().run().unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(report.ignored, 1);
        assert_eq!(report.steps[0].outcome, Outcome::Matched(100));
        assert_eq!(report.steps[1].outcome, Outcome::Cancelled(1));
        match &report.steps[2].outcome {
            Outcome::Orders(orders) => assert_eq!(orders.len(), 1),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn text_rendering_lists_orders_and_totals() {
        let text = scenario().run().unwrap().to_string();
        assert!(text.starts_with("== small (2 orders, 1 ignored) ==\n"));
        assert!(text.contains("matchOrders SEC Sell\nTotal Matched: 100\n"));
        assert!(text.contains("cancelSingleOrder OrdId2 -> 1\n"));
        assert!(text.contains(
            "after cancel\norders: \nOrdId1 : SEC : Buy : 100 : User1 : CompanyA\norders end"
        ));
    }

    #[test]
    fn zero_quantity_order_aborts_the_run() {
        let mut scenario = scenario();
        scenario.orders.push(Order::new("OrdId9", "SEC", Side::Buy, 0, "User9", "CompanyZ"));
        assert!(scenario.run().is_err());
    }
}
