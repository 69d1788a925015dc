//! In-memory order book for a single trading venue.
//!
//! [`OrderBook`] and [`SharedOrderBook`] are the only ways to touch resting
//! orders. The indexed store and the matching pass behind them stay private
//! to the crate, since every view has to change in step with the others:
//!
//! ```compile_fail
//! use trade_cache::store::OrderStore;
//! ```
//!
//! ```compile_fail
//! use trade_cache::matching::Reservation;
//! ```

pub mod config;
pub(crate) mod matching;
pub mod models;
pub mod orderbook;
pub mod scenario;
pub mod shared;
pub(crate) mod store;

pub mod metrics;

pub use models::{Order, OrderId, ParseSideError, Quantity, SecurityId, Side, UserId};
pub use orderbook::{BookError, OrderBook};
pub use shared::SharedOrderBook;
