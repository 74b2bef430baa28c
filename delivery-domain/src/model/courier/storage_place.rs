use crate::error::{DomainError, DomainResult};
use crate::kernel::Volume;
use crate::model::order::OrderId;
use bon::Builder;
use delivery_macros::entity_id;
use serde::Serialize;
use uuid::Uuid;

/// 默认存储位“背包”的名称
pub const BAG_NAME: &str = "bag";
/// 默认存储位“背包”的容量
pub const BAG_VOLUME: i32 = 10;

#[entity_id]
pub struct StoragePlaceId(Uuid);

/// 快递员身上的一个存储位，同一时刻最多存放一个订单
///
/// 不变量：被占用 ⇔ `order_id` 有值；只有占用它的那个订单才能将其清空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
#[builder(start_fn = restore)]
pub struct StoragePlace {
    id: StoragePlaceId,
    #[builder(into)]
    name: String,
    total_volume: Volume,
    order_id: Option<OrderId>,
}

impl StoragePlace {
    pub fn new(name: impl Into<String>, total_volume: Volume) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValueRequired { field: "name" });
        }
        Ok(Self {
            id: StoragePlaceId::generate(),
            name,
            total_volume,
            order_id: None,
        })
    }

    /// 每个新快递员都自带的背包
    pub fn bag() -> Self {
        Self {
            id: StoragePlaceId::generate(),
            name: BAG_NAME.to_string(),
            total_volume: Volume::new_unchecked(BAG_VOLUME),
            order_id: None,
        }
    }

    pub fn id(&self) -> &StoragePlaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_volume(&self) -> Volume {
        self.total_volume
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.order_id.is_some()
    }

    /// 空闲且容量足够时返回 true；被占用或容量不足返回 false（不是错误）
    pub fn can_store(&self, volume: Volume) -> bool {
        !self.is_occupied() && volume.fits_to(&self.total_volume)
    }

    pub fn store(&mut self, order_id: OrderId, volume: Volume) -> DomainResult<()> {
        if !self.can_store(volume) {
            return Err(DomainError::StoragePlaceUnavailable);
        }
        self.order_id = Some(order_id);
        Ok(())
    }

    pub fn clear(&mut self, order_id: OrderId) -> DomainResult<()> {
        if self.order_id != Some(order_id) {
            return Err(DomainError::InvalidValue { field: "order_id" });
        }
        self.order_id = None;
        Ok(())
    }
}
