use crate::error::DomainResult;
use crate::model::courier::{Courier, CourierId};
use async_trait::async_trait;

/// 快递员仓储
///
/// 所有列表查询都按稳定顺序（写入顺序）返回，分派的并列裁决因此可复现。
#[async_trait]
pub trait CourierRepository: Send + Sync {
    async fn get(&self, id: &CourierId) -> DomainResult<Option<Courier>>;

    async fn get_all(&self) -> DomainResult<Vec<Courier>>;

    /// 所有存储位都为空的快递员
    async fn get_all_available(&self) -> DomainResult<Vec<Courier>>;

    async fn add(&mut self, courier: &Courier) -> DomainResult<()>;

    async fn update(&mut self, courier: &Courier) -> DomainResult<()>;
}
