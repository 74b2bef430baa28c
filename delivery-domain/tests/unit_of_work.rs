use anyhow::Result as AnyResult;
use delivery_domain::entity::Entity;
use delivery_domain::error::DomainError;
use delivery_domain::kernel::{Location, Volume};
use delivery_domain::model::courier::Courier;
use delivery_domain::model::order::{Order, OrderId, OrderStatus};
use delivery_domain::persist::{InMemoryStore, UnitOfWork, UnitOfWorkFactory};

fn order_at(x: u8, y: u8) -> Order {
    Order::new(
        OrderId::generate(),
        Location::new(x, y).unwrap(),
        Volume::new(5).unwrap(),
    )
    .unwrap()
}

async fn seed(store: &InMemoryStore, couriers: &[Courier], orders: &[Order]) -> AnyResult<()> {
    let mut uow = store.create().await?;
    uow.begin().await?;
    for c in couriers {
        uow.couriers().add(c).await?;
    }
    for o in orders {
        uow.orders().add(o).await?;
    }
    uow.commit().await?;
    Ok(())
}

#[tokio::test]
async fn writes_are_invisible_until_commit() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let courier = Courier::new("alice", 2, Location::min())?;

    let mut writer = store.create().await?;
    writer.begin().await?;
    writer.couriers().add(&courier).await?;

    // 本单元可以读到自己的写入
    assert!(writer.couriers().get(courier.id()).await?.is_some());

    let mut reader = store.create().await?;
    assert!(reader.couriers().get(courier.id()).await?.is_none());

    writer.commit().await?;
    let stored = reader.couriers().get(courier.id()).await?.unwrap();
    assert_eq!(stored.version().value(), 1);
    Ok(())
}

#[tokio::test]
async fn dropped_unit_of_work_rolls_back() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let order = order_at(3, 3);

    {
        let mut uow = store.create().await?;
        uow.begin().await?;
        uow.orders().add(&order).await?;
        // 未提交即离开作用域
    }

    let mut uow = store.create().await?;
    assert!(uow.orders().get(order.id()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn rollback_after_commit_is_a_noop() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let order = order_at(3, 3);

    let mut uow = store.create().await?;
    uow.begin().await?;
    uow.orders().add(&order).await?;
    uow.commit().await?;
    uow.rollback_unless_committed().await;

    let mut check = store.create().await?;
    assert!(check.orders().get(order.id()).await?.is_some());

    // 已提交的单元不能再写入
    let err = uow.orders().add(&order_at(1, 1)).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState { .. }));
    Ok(())
}

#[tokio::test]
async fn explicit_rollback_discards_staged_writes() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let order = order_at(3, 3);

    let mut uow = store.create().await?;
    uow.begin().await?;
    uow.orders().add(&order).await?;
    uow.rollback_unless_committed().await;
    uow.commit().await?;

    let mut check = store.create().await?;
    assert!(check.orders().get(order.id()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn concurrent_update_of_same_courier_conflicts() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let courier = Courier::new("alice", 2, Location::min())?;
    seed(&store, std::slice::from_ref(&courier), &[]).await?;

    let mut first = store.create().await?;
    let mut second = store.create().await?;
    first.begin().await?;
    second.begin().await?;

    let mut a = first.couriers().get(courier.id()).await?.unwrap();
    let mut b = second.couriers().get(courier.id()).await?.unwrap();
    a.move_towards(Location::max())?;
    b.add_storage_place("trunk", 20)?;

    first.couriers().update(&a).await?;
    second.couriers().update(&b).await?;

    first.commit().await?;
    let err = second.commit().await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::VersionConflict {
            aggregate: "courier",
            expected: 1,
            actual: 2,
            ..
        }
    ));

    // 失败的提交不会写入任何内容
    let mut check = store.create().await?;
    let stored = check.couriers().get(courier.id()).await?.unwrap();
    assert_eq!(stored.storage_places().len(), 1);
    assert_eq!(stored.location(), a.location());
    Ok(())
}

#[tokio::test]
async fn conflicting_commit_applies_nothing() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let courier = Courier::new("alice", 2, Location::min())?;
    let order = order_at(5, 5);
    seed(&store, std::slice::from_ref(&courier), std::slice::from_ref(&order)).await?;

    let mut racer = store.create().await?;
    let mut c = racer.couriers().get(courier.id()).await?.unwrap();
    c.move_towards(Location::max())?;
    racer.couriers().update(&c).await?;

    let mut batch = store.create().await?;
    let mut o = batch.orders().get(order.id()).await?.unwrap();
    let mut c2 = batch.couriers().get(courier.id()).await?.unwrap();
    c2.take_order(&mut o)?;
    batch.orders().update(&o).await?;
    batch.couriers().update(&c2).await?;

    racer.commit().await?;
    assert!(batch.commit().await.is_err());

    let mut check = store.create().await?;
    let stored = check.orders().get(order.id()).await?.unwrap();
    assert_eq!(stored.status(), OrderStatus::Created);
    Ok(())
}

#[tokio::test]
async fn duplicate_add_is_rejected() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let order = order_at(2, 2);
    seed(&store, &[], std::slice::from_ref(&order)).await?;

    let mut uow = store.create().await?;
    let err = uow.orders().add(&order).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyExists { aggregate: "order", .. }));
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_aggregate_is_not_found() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let mut uow = store.create().await?;
    let err = uow.orders().update(&order_at(2, 2)).await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn first_created_order_is_the_oldest() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let first = order_at(1, 1);
    let second = order_at(2, 2);
    let third = order_at(3, 3);
    seed(&store, &[], &[first.clone(), second.clone(), third.clone()]).await?;

    let mut uow = store.create().await?;
    let oldest = uow.orders().get_first_in_created_status().await?.unwrap();
    assert_eq!(oldest.id(), first.id());

    let mut assigned = oldest;
    assigned.assign(delivery_domain::model::courier::CourierId::generate())?;
    uow.orders().update(&assigned).await?;

    // 读到自己的暂存写入：第一个已不是 Created
    let next = uow.orders().get_first_in_created_status().await?.unwrap();
    assert_eq!(next.id(), second.id());

    let assigned_orders = uow.orders().get_all_in_assigned_status().await?;
    assert_eq!(assigned_orders.len(), 1);
    assert_eq!(uow.orders().get_all_incomplete().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn available_couriers_keep_insertion_order() -> AnyResult<()> {
    let store = InMemoryStore::new();
    let names = ["one", "two", "three", "four"];
    let couriers: Vec<Courier> = names
        .iter()
        .map(|n| Courier::new(*n, 1, Location::min()).unwrap())
        .collect();
    seed(&store, &couriers, &[]).await?;

    let mut uow = store.create().await?;
    let mut busy = uow.couriers().get(couriers[1].id()).await?.unwrap();
    let mut order = order_at(4, 4);
    busy.take_order(&mut order)?;
    uow.couriers().update(&busy).await?;

    let available: Vec<String> = uow
        .couriers()
        .get_all_available()
        .await?
        .into_iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(available, vec!["one", "three", "four"]);

    let all = uow.couriers().get_all().await?;
    assert_eq!(all.len(), 4);
    Ok(())
}
