use crate::{
    command::Command, command_handler::CommandHandler, context::AppContext, error::AppResult,
};
use async_trait::async_trait;
use delivery_domain::entity::Entity;
use delivery_domain::error::DomainError;
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use tracing::Instrument;

/// 推进一个时间步：每个已分派订单的快递员向订单位置移动一步，到达即完成订单
///
/// 整批在一个工作单元内提交，任一订单失败则本步全部回滚。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveCouriersCommand;

impl Command for MoveCouriersCommand {
    const NAME: &'static str = "MoveCouriers";
}

#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    moved: usize,
    completed: usize,
}

pub struct MoveCouriersHandler<F> {
    uow_factory: F,
}

impl<F> MoveCouriersHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self { uow_factory }
    }
}

impl<F> MoveCouriersHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn move_all(&self, uow: &mut F::Uow) -> AppResult<Progress> {
        let orders = uow.orders().get_all_in_assigned_status().await?;
        let mut progress = Progress::default();

        for mut order in orders {
            let courier_id =
                order
                    .courier_id()
                    .copied()
                    .ok_or_else(|| DomainError::InvalidState {
                        reason: format!("assigned order {} has no courier", order.id()),
                    })?;
            let mut courier = uow
                .couriers()
                .get(&courier_id)
                .await?
                .ok_or_else(|| DomainError::not_found("courier", courier_id))?;

            courier.move_towards(order.location())?;
            progress.moved += 1;

            if courier.location() == order.location() {
                order.complete()?;
                courier.complete_order(&order)?;
                progress.completed += 1;
                tracing::info!(order_id = %order.id(), %courier_id, "order delivered");
            } else {
                tracing::debug!(
                    order_id = %order.id(),
                    %courier_id,
                    location = %courier.location(),
                    "courier moved"
                );
            }

            uow.orders().update(&order).await?;
            uow.couriers().update(&courier).await?;
        }

        uow.commit().await?;
        Ok(progress)
    }
}

#[async_trait]
impl<F> CommandHandler<MoveCouriersCommand> for MoveCouriersHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn handle(&self, ctx: &AppContext, _cmd: MoveCouriersCommand) -> AppResult<()> {
        async move {
            let mut uow = self.uow_factory.create().await?;
            uow.begin().await?;

            let result = self.move_all(&mut uow).await;
            uow.rollback_unless_committed().await;

            match result {
                Ok(Progress { moved, completed }) => {
                    tracing::info!(moved, completed, "couriers moved");
                    Ok(())
                }
                Err(err) => {
                    super::log_failure::<MoveCouriersCommand>(&err);
                    Err(err)
                }
            }
        }
        .instrument(super::command_span::<MoveCouriersCommand>(ctx))
        .await
    }
}
