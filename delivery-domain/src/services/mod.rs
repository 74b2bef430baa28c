//! 领域服务（Domain Service）
//!
//! 封装不属于单个聚合的领域逻辑：订单分派需要同时读取并修改订单与若干快递员。
//!
mod order_dispatcher;

pub use order_dispatcher::{OrderDispatcher, OrderDispatcherService};
