//! 配送应用层（delivery-application）
//!
//! 以命令/查询处理器编排领域模型：每个处理器在一个工作单元内
//! 加载聚合、调用领域逻辑、写回并提交。周期任务只需按固定间隔分发
//! `AssignOrdersCommand` 与 `MoveCouriersCommand`。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod commands;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod ports;
pub mod queries;
pub mod query;
pub mod query_bus;
pub mod query_handler;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
