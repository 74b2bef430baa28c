//! 读侧用例：只读查询，不开启事务，也不提交
//!
mod get_all_couriers;
mod get_incomplete_orders;

pub use get_all_couriers::{CourierDto, CouriersDto, GetAllCouriersHandler, GetAllCouriersQuery};
pub use get_incomplete_orders::{
    GetIncompleteOrdersHandler, GetIncompleteOrdersQuery, IncompleteOrdersDto, OrderDto,
};

use delivery_domain::kernel::Location;
use serde::Serialize;

/// 坐标的传输形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationDto {
    pub x: u8,
    pub y: u8,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            x: location.x(),
            y: location.y(),
        }
    }
}
