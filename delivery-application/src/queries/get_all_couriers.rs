use super::LocationDto;
use crate::{
    context::AppContext, dto::Dto, error::AppResult, query::Query, query_handler::QueryHandler,
};
use async_trait::async_trait;
use delivery_domain::entity::Entity;
use delivery_domain::model::courier::{Courier, CourierId};
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GetAllCouriersQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourierDto {
    pub id: CourierId,
    pub name: String,
    pub location: LocationDto,
}

impl From<&Courier> for CourierDto {
    fn from(courier: &Courier) -> Self {
        Self {
            id: *courier.id(),
            name: courier.name().to_string(),
            location: courier.location().into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CouriersDto {
    pub couriers: Vec<CourierDto>,
}

impl Dto for CouriersDto {}

impl Query for GetAllCouriersQuery {
    const NAME: &'static str = "GetAllCouriers";
    type Dto = CouriersDto;
}

pub struct GetAllCouriersHandler<F> {
    uow_factory: F,
}

impl<F> GetAllCouriersHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl<F> QueryHandler<GetAllCouriersQuery> for GetAllCouriersHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn handle(&self, _ctx: &AppContext, _q: GetAllCouriersQuery) -> AppResult<CouriersDto> {
        let mut uow = self.uow_factory.create().await?;
        let couriers = uow.couriers().get_all().await?;
        Ok(CouriersDto {
            couriers: couriers.iter().map(CourierDto::from).collect(),
        })
    }
}
