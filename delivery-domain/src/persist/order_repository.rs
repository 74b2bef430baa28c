use crate::error::DomainResult;
use crate::model::order::{Order, OrderId};
use async_trait::async_trait;

/// 订单仓储
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get(&self, id: &OrderId) -> DomainResult<Option<Order>>;

    /// 最早创建、仍处于 Created 状态的订单
    async fn get_first_in_created_status(&self) -> DomainResult<Option<Order>>;

    async fn get_all_in_assigned_status(&self) -> DomainResult<Vec<Order>>;

    /// Created 或 Assigned 的订单
    async fn get_all_incomplete(&self) -> DomainResult<Vec<Order>>;

    async fn add(&mut self, order: &Order) -> DomainResult<()>;

    async fn update(&mut self, order: &Order) -> DomainResult<()>;
}
