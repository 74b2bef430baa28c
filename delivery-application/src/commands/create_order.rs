use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::AppContext,
    error::AppResult,
    ports::GeoClient,
};
use async_trait::async_trait;
use delivery_domain::error::DomainError;
use delivery_domain::kernel::Volume;
use delivery_domain::model::order::{Order, OrderId};
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use tracing::Instrument;

/// 接收一个新订单（通常来自上游的“购物车已结算”事件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderCommand {
    order_id: OrderId,
    street: String,
    volume: Volume,
}

impl CreateOrderCommand {
    pub fn new(order_id: OrderId, street: impl Into<String>, volume: i32) -> AppResult<Self> {
        if order_id.is_nil() {
            return Err(DomainError::InvalidValue { field: "order_id" }.into());
        }
        let street = street.into();
        if street.trim().is_empty() {
            return Err(DomainError::ValueRequired { field: "street" }.into());
        }
        let volume = Volume::new(volume)?;
        Ok(Self {
            order_id,
            street,
            volume,
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }
}

impl Command for CreateOrderCommand {
    const NAME: &'static str = "CreateOrder";
}

/// 幂等：订单 id 已存在时直接成功，不做任何修改
pub struct CreateOrderHandler<F, G> {
    uow_factory: F,
    geo: G,
}

impl<F, G> CreateOrderHandler<F, G> {
    pub fn new(uow_factory: F, geo: G) -> Self {
        Self { uow_factory, geo }
    }
}

impl<F, G> CreateOrderHandler<F, G>
where
    F: UnitOfWorkFactory,
    G: GeoClient,
{
    async fn create(&self, uow: &mut F::Uow, cmd: &CreateOrderCommand) -> AppResult<bool> {
        if uow.orders().get(&cmd.order_id).await?.is_some() {
            return Ok(false);
        }

        let location = self.geo.locate(&cmd.street).await?;
        let order = Order::new(cmd.order_id, location, cmd.volume)?;
        uow.orders().add(&order).await?;
        uow.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl<F, G> CommandHandler<CreateOrderCommand> for CreateOrderHandler<F, G>
where
    F: UnitOfWorkFactory,
    G: GeoClient,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreateOrderCommand) -> AppResult<()> {
        async move {
            let mut uow = self.uow_factory.create().await?;
            uow.begin().await?;

            let result = self.create(&mut uow, &cmd).await;
            uow.rollback_unless_committed().await;

            match result {
                Ok(true) => {
                    tracing::info!(order_id = %cmd.order_id, volume = %cmd.volume, "order created");
                    Ok(())
                }
                Ok(false) => {
                    tracing::debug!(order_id = %cmd.order_id, "order already exists");
                    Ok(())
                }
                Err(err) => {
                    super::log_failure::<CreateOrderCommand>(&err);
                    Err(err)
                }
            }
        }
        .instrument(super::command_span::<CreateOrderCommand>(ctx))
        .await
    }
}
