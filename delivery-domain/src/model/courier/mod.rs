//! 快递员聚合
//!
//! 快递员独占自己的存储位（`StoragePlace`），存储位不会脱离快递员单独存在；
//! 订单只通过 `CourierId` 弱引用快递员。
//!
mod aggregate;
mod storage_place;

pub use aggregate::{AvailableCourier, Courier, CourierId, MAX_SPEED, MIN_SPEED};
pub use storage_place::{BAG_NAME, BAG_VOLUME, StoragePlace, StoragePlaceId};
