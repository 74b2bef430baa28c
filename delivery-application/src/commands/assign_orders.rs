use crate::{
    command::Command, command_handler::CommandHandler, context::AppContext, error::AppResult,
};
use async_trait::async_trait;
use delivery_domain::entity::Entity;
use delivery_domain::error::DomainError;
use delivery_domain::model::courier::CourierId;
use delivery_domain::model::order::OrderId;
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use delivery_domain::services::{OrderDispatcher, OrderDispatcherService};
use tracing::Instrument;

/// 分派一个订单：取最早创建的 Created 订单，交给到达最快的空闲快递员
///
/// 每次只分派一单，由周期任务反复触发。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssignOrdersCommand;

impl Command for AssignOrdersCommand {
    const NAME: &'static str = "AssignOrders";
}

pub struct AssignOrdersHandler<F, D = OrderDispatcherService> {
    uow_factory: F,
    dispatcher: D,
}

impl<F> AssignOrdersHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self::with_dispatcher(uow_factory, OrderDispatcherService::new())
    }
}

impl<F, D> AssignOrdersHandler<F, D> {
    pub fn with_dispatcher(uow_factory: F, dispatcher: D) -> Self {
        Self {
            uow_factory,
            dispatcher,
        }
    }
}

impl<F, D> AssignOrdersHandler<F, D>
where
    F: UnitOfWorkFactory,
    D: OrderDispatcher,
{
    async fn assign(&self, uow: &mut F::Uow) -> AppResult<(OrderId, CourierId)> {
        let mut order = uow
            .orders()
            .get_first_in_created_status()
            .await?
            .ok_or_else(|| DomainError::NotFound {
                reason: "no order in Created status".to_string(),
            })?;

        let mut couriers = uow.couriers().get_all_available().await?;
        if couriers.is_empty() {
            return Err(DomainError::NotFound {
                reason: "no available courier".to_string(),
            }
            .into());
        }

        let courier = self.dispatcher.dispatch(&mut order, &mut couriers)?;
        let courier_id = *courier.id();

        uow.orders().update(&order).await?;
        uow.couriers().update(courier).await?;
        uow.commit().await?;
        Ok((*order.id(), courier_id))
    }
}

#[async_trait]
impl<F, D> CommandHandler<AssignOrdersCommand> for AssignOrdersHandler<F, D>
where
    F: UnitOfWorkFactory,
    D: OrderDispatcher,
{
    async fn handle(&self, ctx: &AppContext, _cmd: AssignOrdersCommand) -> AppResult<()> {
        async move {
            let mut uow = self.uow_factory.create().await?;
            uow.begin().await?;

            let result = self.assign(&mut uow).await;
            uow.rollback_unless_committed().await;

            match result {
                Ok((order_id, courier_id)) => {
                    tracing::info!(%order_id, %courier_id, "order assigned");
                    Ok(())
                }
                Err(err) => {
                    super::log_failure::<AssignOrdersCommand>(&err);
                    Err(err)
                }
            }
        }
        .instrument(super::command_span::<AssignOrdersCommand>(ctx))
        .await
    }
}
