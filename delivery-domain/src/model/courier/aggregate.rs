use super::storage_place::StoragePlace;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::kernel::{Location, MAX_X, MAX_Y, MIN_X, MIN_Y, Volume};
use crate::model::order::{Order, OrderId};
use crate::specification::Specification;
use crate::value_object::Version;
use bon::bon;
use delivery_macros::entity_id;
use serde::Serialize;
use uuid::Uuid;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 5;

#[entity_id]
pub struct CourierId(Uuid);

/// 快递员聚合根
///
/// - 至少拥有一个存储位（新建时自带背包）；
/// - 负责容量校验、取件（写入存储位并回填订单的快递员）、送达（清空存储位）与移动。
///
/// `Courier::restore()` 构建器用于从存储中还原：不生成新 id、不补背包，
/// 但仍拒绝违反不变量的状态。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Courier {
    id: CourierId,
    version: Version,
    name: String,
    speed: u8,
    location: Location,
    storage_places: Vec<StoragePlace>,
}

impl Courier {
    pub fn new(name: impl Into<String>, speed: u8, location: Location) -> DomainResult<Self> {
        let name = name.into();
        check_name_and_speed(&name, speed)?;

        Ok(Self {
            id: CourierId::generate(),
            version: Version::new(),
            name,
            speed,
            location,
            storage_places: vec![StoragePlace::bag()],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn storage_places(&self) -> &[StoragePlace] {
        &self.storage_places
    }

    /// 当前被占用的存储位数量
    pub fn occupied_places(&self) -> usize {
        self.storage_places
            .iter()
            .filter(|p| p.is_occupied())
            .count()
    }

    /// 所有存储位都为空才算空闲
    pub fn is_available(&self) -> bool {
        self.occupied_places() == 0
    }

    pub fn storage_place_holding(&self, order_id: &OrderId) -> Option<&StoragePlace> {
        self.storage_places
            .iter()
            .find(|p| p.order_id() == Some(order_id))
    }

    /// 追加一个存储位，已有存储位保持不变
    pub fn add_storage_place(&mut self, name: impl Into<String>, volume: i32) -> DomainResult<()> {
        let volume = Volume::new(volume)?;
        let place = StoragePlace::new(name, volume)?;
        self.storage_places.push(place);
        Ok(())
    }

    pub fn can_take_order(&self, order: &Order) -> bool {
        self.storage_places
            .iter()
            .any(|p| p.can_store(order.volume()))
    }

    /// 取件：把订单放进第一个能放下的存储位（first-fit），并把自己登记为订单的快递员
    ///
    /// 订单侧登记失败时释放刚占用的存储位后再返回错误。
    pub fn take_order(&mut self, order: &mut Order) -> DomainResult<()> {
        let courier_id = self.id;
        let place = self
            .storage_places
            .iter_mut()
            .find(|p| p.can_store(order.volume()))
            .ok_or(DomainError::CourierCannotTakeOrder)?;

        place.store(*order.id(), order.volume())?;
        if let Err(err) = order.assign(courier_id) {
            place.clear(*order.id())?;
            return Err(err);
        }
        Ok(())
    }

    /// 送达：清空存放该订单的存储位
    pub fn complete_order(&mut self, order: &Order) -> DomainResult<()> {
        let order_id = *order.id();
        if order_id.is_nil() {
            return Err(DomainError::InvalidValue { field: "order_id" });
        }
        let place = self
            .storage_places
            .iter_mut()
            .find(|p| p.order_id() == Some(&order_id))
            .ok_or(DomainError::OrderNotCarried)?;
        place.clear(order_id)
    }

    /// 到达目标所需的步数，向上取整
    pub fn calculate_time_to_location(&self, target: Location) -> f64 {
        let distance = self.location.distance(&target);
        (f64::from(distance) / f64::from(self.speed)).ceil()
    }

    /// 向目标移动一步：最多走 `speed` 格，先消耗 x 轴，剩余的再给 y 轴，结果截断在网格内
    pub fn move_towards(&mut self, target: Location) -> DomainResult<()> {
        let dx = i32::from(target.x()) - i32::from(self.location.x());
        let dy = i32::from(target.y()) - i32::from(self.location.y());
        let mut remaining = i32::from(self.speed);

        let dx = dx.clamp(-remaining, remaining);
        remaining -= dx.abs();
        let dy = dy.clamp(-remaining, remaining);

        let x = (i32::from(self.location.x()) + dx).clamp(i32::from(MIN_X), i32::from(MAX_X));
        let y = (i32::from(self.location.y()) + dy).clamp(i32::from(MIN_Y), i32::from(MAX_Y));

        // 截断后一定落在 u8 范围与网格之内
        self.location = Location::new(x as u8, y as u8)?;
        Ok(())
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

#[bon]
impl Courier {
    #[builder(finish_fn = build)]
    pub fn restore(
        id: CourierId,
        #[builder(default)] version: Version,
        #[builder(into)] name: String,
        speed: u8,
        location: Location,
        storage_places: Vec<StoragePlace>,
    ) -> DomainResult<Self> {
        check_name_and_speed(&name, speed)?;
        if storage_places.is_empty() {
            return Err(DomainError::ValueRequired {
                field: "storage_places",
            });
        }

        Ok(Self {
            id,
            version,
            name,
            speed,
            location,
            storage_places,
        })
    }
}

fn check_name_and_speed(name: &str, speed: u8) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidValue { field: "name" });
    }
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(DomainError::out_of_range(
            "speed",
            speed,
            MIN_SPEED.into(),
            MAX_SPEED.into(),
        ));
    }
    Ok(())
}

impl Entity for Courier {
    type Id = CourierId;
    const TYPE: &'static str = "courier";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

/// 空闲快递员：没有任何被占用的存储位
pub struct AvailableCourier;

impl Specification<Courier> for AvailableCourier {
    fn is_satisfied_by(&self, candidate: &Courier) -> bool {
        candidate.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::OrderStatus;
    use crate::model::courier::{BAG_NAME, BAG_VOLUME};

    fn location(x: u8, y: u8) -> Location {
        Location::new(x, y).unwrap()
    }

    fn order_with_volume(volume: i32) -> Order {
        Order::new(
            OrderId::generate(),
            Location::random(),
            Volume::new(volume).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn new_courier_has_single_bag() {
        let courier = Courier::new("Alice", 2, Location::min()).unwrap();

        assert!(!courier.id().is_nil());
        assert!(courier.version().is_new());
        assert_eq!(courier.name(), "Alice");
        assert_eq!(courier.speed(), 2);
        assert_eq!(courier.storage_places().len(), 1);
        assert_eq!(courier.storage_places()[0].name(), BAG_NAME);
        assert_eq!(
            courier.storage_places()[0].total_volume().value(),
            BAG_VOLUME
        );
        assert!(courier.is_available());

        let other = Courier::new("Alice", 2, Location::min()).unwrap();
        assert_ne!(courier.id(), other.id());
    }

    #[test]
    fn new_courier_rejects_bad_input() {
        assert!(matches!(
            Courier::new("", 2, Location::min()),
            Err(DomainError::InvalidValue { field: "name" })
        ));
        for speed in [0, 6, 100] {
            assert!(matches!(
                Courier::new("Bob", speed, Location::min()),
                Err(DomainError::ValueOutOfRange { field: "speed", .. })
            ));
        }
    }

    #[test]
    fn add_storage_place_appends() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        courier.add_storage_place("trunk", 30).unwrap();

        assert_eq!(courier.storage_places().len(), 2);
        assert_eq!(courier.storage_places()[1].name(), "trunk");

        assert!(courier.add_storage_place("trunk", 0).is_err());
        assert!(courier.add_storage_place("", 5).is_err());
        assert_eq!(courier.storage_places().len(), 2);
    }

    #[test]
    fn can_take_order_checks_capacity() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        assert!(courier.can_take_order(&order_with_volume(10)));
        assert!(!courier.can_take_order(&order_with_volume(11)));

        courier.add_storage_place("trunk", 30).unwrap();
        assert!(courier.can_take_order(&order_with_volume(11)));
    }

    #[test]
    fn take_order_uses_first_fit_and_assigns() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        courier.add_storage_place("trunk", 30).unwrap();
        let mut order = order_with_volume(3);

        courier.take_order(&mut order).unwrap();

        // 背包在前，虽然 trunk 也能放下，依然放进背包
        assert_eq!(courier.storage_places()[0].order_id(), Some(order.id()));
        assert!(!courier.storage_places()[1].is_occupied());
        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(order.courier_id(), Some(courier.id()));
        assert!(!courier.is_available());
    }

    #[test]
    fn take_order_skips_places_that_cannot_store() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        courier.add_storage_place("trunk", 30).unwrap();
        let mut big = order_with_volume(20);

        courier.take_order(&mut big).unwrap();
        assert!(!courier.storage_places()[0].is_occupied());
        assert_eq!(courier.storage_places()[1].order_id(), Some(big.id()));
    }

    #[test]
    fn take_order_fails_when_full() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        let mut first = order_with_volume(5);
        courier.take_order(&mut first).unwrap();

        let mut second = order_with_volume(5);
        let err = courier.take_order(&mut second).unwrap_err();
        assert!(matches!(err, DomainError::CourierCannotTakeOrder));
        assert_eq!(second.status(), OrderStatus::Created);
        assert!(second.courier_id().is_none());
    }

    #[test]
    fn complete_order_clears_place() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        let mut order = order_with_volume(5);
        courier.take_order(&mut order).unwrap();
        assert!(courier.storage_place_holding(order.id()).is_some());

        courier.complete_order(&order).unwrap();
        assert!(courier.is_available());
        assert!(courier.storage_place_holding(order.id()).is_none());
    }

    #[test]
    fn complete_unknown_order_fails() {
        let mut courier = Courier::new("Alice", 2, Location::min()).unwrap();
        let order = order_with_volume(5);
        let err = courier.complete_order(&order).unwrap_err();
        assert!(matches!(err, DomainError::OrderNotCarried));
    }

    #[test]
    fn time_to_location_rounds_up() {
        let courier = Courier::new("Fast", 5, Location::min()).unwrap();
        assert_eq!(courier.calculate_time_to_location(Location::max()), 4.0);

        let courier = Courier::new("Slow", 1, Location::min()).unwrap();
        assert_eq!(courier.calculate_time_to_location(Location::max()), 18.0);
        assert_eq!(courier.calculate_time_to_location(Location::min()), 0.0);

        let courier = Courier::new("Two", 2, location(10, 10)).unwrap();
        assert_eq!(courier.calculate_time_to_location(location(1, 1)), 9.0);
    }

    #[test]
    fn move_consumes_x_axis_first() {
        let mut courier = Courier::new("Alice", 3, location(1, 1)).unwrap();
        courier.move_towards(location(3, 5)).unwrap();
        // dx=2 用掉 2 格，剩 1 格给 y
        assert_eq!(courier.location(), location(3, 2));

        courier.move_towards(location(3, 5)).unwrap();
        assert_eq!(courier.location(), location(3, 5));

        courier.move_towards(location(3, 5)).unwrap();
        assert_eq!(courier.location(), location(3, 5));
    }

    #[test]
    fn move_backwards_on_both_axes() {
        let mut courier = Courier::new("Alice", 2, location(10, 10)).unwrap();
        courier.move_towards(location(1, 1)).unwrap();
        assert_eq!(courier.location(), location(8, 10));

        let mut courier = Courier::new("Bob", 4, location(5, 5)).unwrap();
        courier.move_towards(location(4, 1)).unwrap();
        assert_eq!(courier.location(), location(4, 2));
    }

    fn grid() -> impl Iterator<Item = Location> {
        (MIN_X..=MAX_X).flat_map(|x| (MIN_Y..=MAX_Y).map(move |y| location(x, y)))
    }

    #[test]
    fn move_reaches_any_target_in_exactly_eta_steps() {
        for speed in MIN_SPEED..=MAX_SPEED {
            for start in grid() {
                for target in grid() {
                    let mut courier = Courier::new("Walker", speed, start).unwrap();
                    let steps = courier.calculate_time_to_location(target) as usize;

                    for step in 0..steps {
                        assert_ne!(courier.location(), target, "{start} -> {target} @ {speed}");
                        let before = courier.location().distance(&target);
                        courier.move_towards(target).unwrap();
                        let after = courier.location().distance(&target);
                        // 每步恰好前进 min(speed, 剩余距离)
                        assert_eq!(before - after, speed.min(before), "step {step}");
                    }
                    assert_eq!(courier.location(), target, "{start} -> {target} @ {speed}");

                    courier.move_towards(target).unwrap();
                    assert_eq!(courier.location(), target);
                }
            }
        }
    }

    #[test]
    fn failed_assign_releases_reserved_place() {
        let mut courier = Courier::restore()
            .id(CourierId::nil())
            .name("Ghost")
            .speed(2)
            .location(Location::min())
            .storage_places(vec![StoragePlace::bag()])
            .build()
            .unwrap();
        let mut order = order_with_volume(5);

        let err = courier.take_order(&mut order).unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { field: "courier_id" }));
        assert_eq!(courier.occupied_places(), 0);
        assert!(courier.is_available());
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(order.courier_id().is_none());
    }

    #[test]
    fn restore_rebuilds_state() {
        let id = CourierId::generate();
        let courier = Courier::restore()
            .id(id)
            .version(Version::from_value(3))
            .name("Restored")
            .speed(4)
            .location(location(2, 2))
            .storage_places(vec![StoragePlace::bag()])
            .build()
            .unwrap();

        assert_eq!(courier.id(), &id);
        assert_eq!(courier.version().value(), 3);
        assert_eq!(courier.speed(), 4);
    }

    #[test]
    fn restore_rejects_broken_state() {
        let too_slow = Courier::restore()
            .id(CourierId::generate())
            .name("Stuck")
            .speed(0)
            .location(Location::min())
            .storage_places(vec![StoragePlace::bag()])
            .build();
        assert!(matches!(
            too_slow,
            Err(DomainError::ValueOutOfRange { field: "speed", .. })
        ));

        let no_places = Courier::restore()
            .id(CourierId::generate())
            .name("Empty")
            .speed(2)
            .location(Location::min())
            .storage_places(Vec::new())
            .build();
        assert!(matches!(
            no_places,
            Err(DomainError::ValueRequired {
                field: "storage_places"
            })
        ));
    }
}
