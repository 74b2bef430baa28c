//! 持久化协议（persist）
//!
//! 定义快递员/订单仓储与工作单元（Unit of Work）接口：
//! - 一个工作单元对应一次事务，两个仓储绑定在同一事务上；
//! - 事务只在 `commit` 成功后生效，任何提前返回都会回滚；
//! - `InMemoryStore` 提供带乐观锁的内存实现，供测试与演示使用。
//!
//! 具体存储后端（如 Postgres）由上层提供实现并注入。
//!
mod courier_repository;
mod inmemory;
mod order_repository;
mod unit_of_work;

pub use courier_repository::CourierRepository;
pub use inmemory::{InMemoryStore, InMemoryUnitOfWork};
pub use order_repository::OrderRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
