//! 订单聚合
//!
mod aggregate;
mod status;

pub use aggregate::{Order, OrderId, OrderInStatus};
pub use status::OrderStatus;
