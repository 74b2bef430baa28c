//! 配送领域层（delivery-domain）
//!
//! 以 DDD 方式建模“订单分派给快递员并随时间推进”的核心：
//! - 共享内核（`kernel`）：坐标 `Location` 与容量 `Volume` 等值对象；
//! - 聚合（`model`）：快递员 `Courier`（含存储位 `StoragePlace`）与订单 `Order`；
//! - 领域服务（`services`）：按最短到达时间挑选快递员的 `OrderDispatcher`；
//! - 持久化协议（`persist`）：仓储与工作单元（Unit of Work）接口，以及一个内存实现；
//! - 规约（`specification`）、实体（`entity`）与值对象（`value_object`）等通用构件。
//!
//! 领域模型本身与存储无关，跨聚合的一致性由工作单元的事务边界保证。
//!
pub mod entity;
pub mod error;
pub mod kernel;
pub mod model;
pub mod persist;
pub mod services;
pub mod specification;
pub mod value_object;
