use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::AppContext,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use delivery_domain::entity::Entity;
use delivery_domain::error::DomainError;
use delivery_domain::kernel::Location;
use delivery_domain::model::courier::{Courier, MAX_SPEED, MIN_SPEED};
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use tracing::Instrument;

/// 招募一名快递员，初始位置随机，自带一个 bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCourierCommand {
    name: String,
    speed: u8,
}

impl CreateCourierCommand {
    pub fn new(name: impl Into<String>, speed: u8) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValueRequired { field: "name" }.into());
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(DomainError::out_of_range(
                "speed",
                speed,
                MIN_SPEED.into(),
                MAX_SPEED.into(),
            )
            .into());
        }
        Ok(Self { name, speed })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }
}

impl Command for CreateCourierCommand {
    const NAME: &'static str = "CreateCourier";
}

pub struct CreateCourierHandler<F> {
    uow_factory: F,
}

impl<F> CreateCourierHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl<F> CommandHandler<CreateCourierCommand> for CreateCourierHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreateCourierCommand) -> AppResult<()> {
        async move {
            let courier = Courier::new(cmd.name.as_str(), cmd.speed, Location::random())?;

            let mut uow = self.uow_factory.create().await?;
            uow.begin().await?;
            let result = async {
                uow.couriers().add(&courier).await?;
                uow.commit().await
            }
            .await;
            uow.rollback_unless_committed().await;

            match result {
                Ok(()) => {
                    tracing::info!(
                        courier_id = %courier.id(),
                        name = courier.name(),
                        location = %courier.location(),
                        "courier created"
                    );
                    Ok(())
                }
                Err(err) => {
                    let err = AppError::from(err);
                    super::log_failure::<CreateCourierCommand>(&err);
                    Err(err)
                }
            }
        }
        .instrument(super::command_span::<CreateCourierCommand>(ctx))
        .await
    }
}
