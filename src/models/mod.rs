use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type OrderId = String;
pub type SecurityId = String;
pub type UserId = String;
pub type Quantity = u64;

/// Buy sorts before Sell, which every ordered view relies on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised side {0:?}")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Self::Buy),
            "Sell" => Ok(Self::Sell),
            other => Err(ParseSideError(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resting order.
///
/// Field declaration order is the identity ordering of the book: the derived
/// `Ord` compares order id, security, quantity, side, user and company in
/// that sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order {
    pub order_id: OrderId,
    pub security_id: SecurityId,
    pub quantity: Quantity,
    pub side: Side,
    pub user_id: UserId,
    pub company_name: String,
}

impl Order {
    pub fn new(
        order_id: impl Into<OrderId>,
        security_id: impl Into<SecurityId>,
        side: Side,
        quantity: Quantity,
        user_id: impl Into<UserId>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            security_id: security_id.into(),
            quantity,
            side,
            user_id: user_id.into(),
            company_name: company_name.into(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} : {} : {} : {} : {}",
            self.order_id,
            self.security_id,
            self.side,
            self.quantity,
            self.user_id,
            self.company_name
        )
    }
}
