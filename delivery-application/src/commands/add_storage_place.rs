use crate::{
    command::Command, command_handler::CommandHandler, context::AppContext, error::AppResult,
};
use async_trait::async_trait;
use delivery_domain::error::DomainError;
use delivery_domain::kernel::Volume;
use delivery_domain::model::courier::CourierId;
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use tracing::Instrument;

/// 为快递员增加一个存储位（如后备箱）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStoragePlaceCommand {
    courier_id: CourierId,
    name: String,
    volume: Volume,
}

impl AddStoragePlaceCommand {
    pub fn new(courier_id: CourierId, name: impl Into<String>, volume: i32) -> AppResult<Self> {
        if courier_id.is_nil() {
            return Err(DomainError::InvalidValue {
                field: "courier_id",
            }
            .into());
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValueRequired { field: "name" }.into());
        }
        let volume = Volume::new(volume)?;
        Ok(Self {
            courier_id,
            name,
            volume,
        })
    }

    pub fn courier_id(&self) -> CourierId {
        self.courier_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }
}

impl Command for AddStoragePlaceCommand {
    const NAME: &'static str = "AddStoragePlace";
}

pub struct AddStoragePlaceHandler<F> {
    uow_factory: F,
}

impl<F> AddStoragePlaceHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self { uow_factory }
    }
}

impl<F> AddStoragePlaceHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn add(&self, uow: &mut F::Uow, cmd: &AddStoragePlaceCommand) -> AppResult<()> {
        let mut courier = uow
            .couriers()
            .get(&cmd.courier_id)
            .await?
            .ok_or_else(|| DomainError::not_found("courier", cmd.courier_id))?;

        courier.add_storage_place(cmd.name.as_str(), cmd.volume.value())?;
        uow.couriers().update(&courier).await?;
        uow.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl<F> CommandHandler<AddStoragePlaceCommand> for AddStoragePlaceHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn handle(&self, ctx: &AppContext, cmd: AddStoragePlaceCommand) -> AppResult<()> {
        async move {
            let mut uow = self.uow_factory.create().await?;
            uow.begin().await?;

            let result = self.add(&mut uow, &cmd).await;
            uow.rollback_unless_committed().await;

            match &result {
                Ok(()) => tracing::info!(
                    courier_id = %cmd.courier_id,
                    name = cmd.name.as_str(),
                    volume = %cmd.volume,
                    "storage place added"
                ),
                Err(err) => super::log_failure::<AddStoragePlaceCommand>(err),
            }
            result
        }
        .instrument(super::command_span::<AddStoragePlaceCommand>(ctx))
        .await
    }
}
