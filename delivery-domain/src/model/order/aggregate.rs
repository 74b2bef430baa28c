use super::status::OrderStatus;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::kernel::{Location, Volume};
use crate::model::courier::CourierId;
use crate::specification::Specification;
use crate::value_object::Version;
use bon::bon;
use chrono::{DateTime, Utc};
use delivery_macros::entity_id;
use serde::Serialize;
use uuid::Uuid;

#[entity_id]
pub struct OrderId(Uuid);

/// 订单聚合根
///
/// 位置与容量创建后不可变；只通过 `assign` 与 `complete` 推进状态。
/// 不变量：状态为 Assigned/Completed 时必有 `courier_id`，Created 时必无。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    version: Version,
    courier_id: Option<CourierId>,
    location: Location,
    volume: Volume,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(order_id: OrderId, location: Location, volume: Volume) -> DomainResult<Self> {
        if order_id.is_nil() {
            return Err(DomainError::InvalidValue { field: "order_id" });
        }
        Ok(Self {
            id: order_id,
            version: Version::new(),
            courier_id: None,
            location,
            volume,
            status: OrderStatus::Created,
            created_at: Utc::now(),
        })
    }

    pub fn courier_id(&self) -> Option<&CourierId> {
        self.courier_id.as_ref()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 指派快递员。不检查当前状态：重复指派会直接覆盖之前的快递员
    pub fn assign(&mut self, courier_id: CourierId) -> DomainResult<()> {
        if courier_id.is_nil() {
            return Err(DomainError::InvalidValue { field: "courier_id" });
        }
        self.courier_id = Some(courier_id);
        self.status = OrderStatus::Assigned;
        Ok(())
    }

    /// 完成订单，仅允许从 Assigned 进入
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Assigned {
            return Err(DomainError::WrongOrderStatus {
                status: self.status.to_string(),
                action: "complete",
            });
        }
        self.status = OrderStatus::Completed;
        Ok(())
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

#[bon]
impl Order {
    /// 从存储中还原，拒绝状态与快递员不一致的记录
    #[builder(finish_fn = build)]
    pub fn restore(
        id: OrderId,
        #[builder(default)] version: Version,
        courier_id: Option<CourierId>,
        location: Location,
        volume: Volume,
        status: OrderStatus,
        #[builder(default = Utc::now())] created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        match (status, courier_id.is_some()) {
            (OrderStatus::Created, false)
            | (OrderStatus::Assigned | OrderStatus::Completed, true) => Ok(Self {
                id,
                version,
                courier_id,
                location,
                volume,
                status,
                created_at,
            }),
            (status, _) => Err(DomainError::InvalidState {
                reason: format!("{status} order {id} has inconsistent courier_id {courier_id:?}"),
            }),
        }
    }
}

impl Entity for Order {
    type Id = OrderId;
    const TYPE: &'static str = "order";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

/// 处于指定状态的订单
pub struct OrderInStatus(pub OrderStatus);

impl Specification<Order> for OrderInStatus {
    fn is_satisfied_by(&self, candidate: &Order) -> bool {
        candidate.status() == self.0
    }
}
