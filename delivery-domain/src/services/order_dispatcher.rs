use crate::error::{DomainError, DomainResult};
use crate::model::courier::Courier;
use crate::model::order::Order;

/// 订单分派：为一个订单从候选快递员中选出最合适的一位，并在双方聚合上落实取件
pub trait OrderDispatcher: Send + Sync {
    /// 返回被选中的快递员（已修改）；订单在成功时处于 Assigned 状态
    fn dispatch<'a>(
        &self,
        order: &mut Order,
        couriers: &'a mut [Courier],
    ) -> DomainResult<&'a mut Courier>;
}

/// 以“最短到达时间”为准的无状态分派实现
///
/// - 跳过装不下订单的快递员；
/// - 到达时间严格小于当前最优才替换，因此并列时取枚举顺序中的第一位；
/// - 选中后取件失败统一报告为 `NoSuitableCourier`，双方聚合保持原状。
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDispatcherService;

impl OrderDispatcherService {
    pub fn new() -> Self {
        Self
    }
}

impl OrderDispatcher for OrderDispatcherService {
    fn dispatch<'a>(
        &self,
        order: &mut Order,
        couriers: &'a mut [Courier],
    ) -> DomainResult<&'a mut Courier> {
        if couriers.is_empty() {
            return Err(DomainError::ValueRequired { field: "couriers" });
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, courier) in couriers.iter().enumerate() {
            if !courier.can_take_order(order) {
                continue;
            }
            let time = courier.calculate_time_to_location(order.location());
            match best {
                Some((_, best_time)) if time >= best_time => {}
                _ => best = Some((idx, time)),
            }
        }

        let (idx, _) = best.ok_or(DomainError::NoSuitableCourier)?;
        let winner = &mut couriers[idx];

        // take_order 同时登记订单侧的快递员，失败时已释放占用的存储位
        if winner.take_order(order).is_err() {
            return Err(DomainError::NoSuitableCourier);
        }

        Ok(winner)
    }
}
