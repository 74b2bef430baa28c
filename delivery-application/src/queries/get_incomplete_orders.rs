use super::LocationDto;
use crate::{
    context::AppContext, dto::Dto, error::AppResult, query::Query, query_handler::QueryHandler,
};
use async_trait::async_trait;
use delivery_domain::entity::Entity;
use delivery_domain::model::order::{Order, OrderId};
use delivery_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use serde::Serialize;

/// 未完成订单：状态为 Created 或 Assigned
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GetIncompleteOrdersQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub location: LocationDto,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: *order.id(),
            location: order.location().into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncompleteOrdersDto {
    pub orders: Vec<OrderDto>,
}

impl Dto for IncompleteOrdersDto {}

impl Query for GetIncompleteOrdersQuery {
    const NAME: &'static str = "GetIncompleteOrders";
    type Dto = IncompleteOrdersDto;
}

pub struct GetIncompleteOrdersHandler<F> {
    uow_factory: F,
}

impl<F> GetIncompleteOrdersHandler<F> {
    pub fn new(uow_factory: F) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl<F> QueryHandler<GetIncompleteOrdersQuery> for GetIncompleteOrdersHandler<F>
where
    F: UnitOfWorkFactory,
{
    async fn handle(
        &self,
        _ctx: &AppContext,
        _q: GetIncompleteOrdersQuery,
    ) -> AppResult<IncompleteOrdersDto> {
        let mut uow = self.uow_factory.create().await?;
        let orders = uow.orders().get_all_incomplete().await?;
        Ok(IncompleteOrdersDto {
            orders: orders.iter().map(OrderDto::from).collect(),
        })
    }
}
