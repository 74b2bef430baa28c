use super::{CourierRepository, OrderRepository};
use crate::error::DomainResult;
use async_trait::async_trait;
use std::sync::Arc;

/// 工作单元：一次事务内的仓储访问
///
/// - `couriers()`/`orders()` 返回的仓储共享同一事务；
/// - `commit` 之前的写入对其他工作单元不可见；
/// - `rollback_unless_committed` 在已提交后调用是空操作，可无条件调用；
/// - 未提交即被丢弃的工作单元等同于回滚。
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&mut self) -> DomainResult<()>;

    async fn commit(&mut self) -> DomainResult<()>;

    async fn rollback_unless_committed(&mut self);

    fn couriers(&mut self) -> &mut dyn CourierRepository;

    fn orders(&mut self) -> &mut dyn OrderRepository;
}

/// 为每个用例调用创建新的工作单元
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    type Uow: UnitOfWork;

    async fn create(&self) -> DomainResult<Self::Uow>;
}

#[async_trait]
impl<T> UnitOfWorkFactory for Arc<T>
where
    T: UnitOfWorkFactory + ?Sized,
{
    type Uow = T::Uow;

    async fn create(&self) -> DomainResult<Self::Uow> {
        (**self).create().await
    }
}
