//! 规约（Specification）
//!
//! 封装可复用、可组合的业务筛选条件，例如“空闲的快递员”“处于某状态的订单”。
//! 仓储实现借助规约表达查询语义，而不把条件散落在各个适配器里。
//!

/// 规约模式的核心 trait
pub trait Specification<T> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        AndSpecification::new(Box::new(self), Box::new(other))
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        OrSpecification::new(Box::new(self), Box::new(other))
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification::new(Box::new(self))
    }
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// AND 组合规约
pub struct AndSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> AndSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// OR 组合规约
pub struct OrSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> OrSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// NOT 规约
pub struct NotSpecification<T> {
    inner: Box<dyn Specification<T>>,
}

impl<T> NotSpecification<T> {
    pub fn new(inner: Box<dyn Specification<T>>) -> Self {
        Self { inner }
    }
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{Location, Volume};
    use crate::model::courier::{AvailableCourier, Courier, CourierId};
    use crate::model::order::{Order, OrderId, OrderInStatus, OrderStatus};

    fn order() -> Order {
        Order::new(
            OrderId::generate(),
            Location::min(),
            Volume::new(5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn incomplete_orders_are_created_or_assigned() {
        let incomplete = OrderInStatus(OrderStatus::Created).or(OrderInStatus(OrderStatus::Assigned));

        let mut o = order();
        assert!(incomplete.is_satisfied_by(&o));

        o.assign(CourierId::generate()).unwrap();
        assert!(incomplete.is_satisfied_by(&o));

        o.complete().unwrap();
        assert!(!incomplete.is_satisfied_by(&o));
    }

    #[test]
    fn busy_courier_is_not_available() {
        let mut courier = Courier::new("one", 1, Location::max()).unwrap();
        let busy = AvailableCourier.not();
        assert!(AvailableCourier.is_satisfied_by(&courier));

        let mut o = order();
        courier.take_order(&mut o).unwrap();
        assert!(busy.is_satisfied_by(&courier));

        // 仍有空位也不算空闲：空闲指所有存储位都为空
        courier.add_storage_place("trunk", 20).unwrap();
        let spec = AvailableCourier.and(AvailableCourier);
        assert!(!spec.is_satisfied_by(&courier));
    }
}
