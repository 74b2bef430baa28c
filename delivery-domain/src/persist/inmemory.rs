//! 内存实现：`InMemoryStore` + `InMemoryUnitOfWork`
//!
//! 写入先暂存在工作单元内，`commit` 时一次性校验版本并落入共享存储；
//! 校验失败则整批拒绝，存储保持不变。
//!
use super::{CourierRepository, OrderRepository, UnitOfWork, UnitOfWorkFactory};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::model::courier::{AvailableCourier, Courier, CourierId};
use crate::model::order::{Order, OrderId, OrderInStatus, OrderStatus};
use crate::specification::Specification;
use crate::value_object::Version;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// 可由存储侧推进版本号的聚合
trait Versioned: Entity + Clone {
    fn set_version(&mut self, version: Version);
}

impl Versioned for Courier {
    fn set_version(&mut self, version: Version) {
        Courier::set_version(self, version);
    }
}

impl Versioned for Order {
    fn set_version(&mut self, version: Version) {
        Order::set_version(self, version);
    }
}

#[derive(Debug, Clone)]
struct Row<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Insert,
    Update,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    op: Op,
    seq: u64,
    value: T,
}

type Table<T> = HashMap<<T as Entity>::Id, Row<T>>;
type Staging<T> = HashMap<<T as Entity>::Id, Pending<T>>;

#[derive(Default)]
struct StoreState {
    couriers: Table<Courier>,
    orders: Table<Order>,
    next_seq: u64,
}

/// 进程内共享存储，克隆后指向同一份数据
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork {
            store: self.clone(),
            couriers: HashMap::new(),
            orders: HashMap::new(),
            next_pending: 0,
            state: TxState::Idle,
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, StoreState>> {
        self.inner.lock().map_err(|e| DomainError::Repository {
            reason: format!("in-memory store poisoned: {e}"),
        })
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryStore {
    type Uow = InMemoryUnitOfWork;

    async fn create(&self) -> DomainResult<Self::Uow> {
        Ok(self.unit_of_work())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxState {
    Idle,
    Active,
    Committed,
}

/// 内存工作单元
///
/// 自身同时实现两个仓储接口；读操作优先看到本单元暂存的写入。
/// 在 `begin` 之前的写入同样会被暂存。丢弃未提交的单元即丢弃全部暂存。
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    couriers: Staging<Courier>,
    orders: Staging<Order>,
    next_pending: u64,
    state: TxState,
}

impl InMemoryUnitOfWork {
    fn ensure_open(&self) -> DomainResult<()> {
        if self.state == TxState::Committed {
            return Err(DomainError::InvalidState {
                reason: "unit of work already committed".to_string(),
            });
        }
        Ok(())
    }

    fn next_pending(&mut self) -> u64 {
        let seq = self.next_pending;
        self.next_pending += 1;
        seq
    }

    fn discard(&mut self) {
        self.couriers.clear();
        self.orders.clear();
        self.next_pending = 0;
    }

    fn all_couriers(&self) -> DomainResult<Vec<Courier>> {
        let state = self.store.lock()?;
        Ok(merged(&state.couriers, &self.couriers))
    }

    fn all_orders(&self) -> DomainResult<Vec<Order>> {
        let state = self.store.lock()?;
        Ok(merged(&state.orders, &self.orders))
    }
}

/// 已提交数据叠加本单元暂存后的视图，按写入顺序排列
fn merged<T>(table: &Table<T>, staging: &Staging<T>) -> Vec<T>
where
    T: Entity + Clone,
    T::Id: Eq + Hash,
{
    let mut rows: Vec<((u8, u64), T)> = table
        .iter()
        .map(|(id, row)| {
            let value = staging
                .get(id)
                .map(|p| p.value.clone())
                .unwrap_or_else(|| row.value.clone());
            ((0, row.seq), value)
        })
        .collect();

    rows.extend(
        staging
            .iter()
            .filter(|(id, p)| p.op == Op::Insert && !table.contains_key(*id))
            .map(|(_, p)| ((1, p.seq), p.value.clone())),
    );

    rows.sort_by_key(|(key, _)| *key);
    rows.into_iter().map(|(_, value)| value).collect()
}

fn get_one<T>(table: &Table<T>, staging: &Staging<T>, id: &T::Id) -> Option<T>
where
    T: Entity + Clone,
{
    staging
        .get(id)
        .map(|p| p.value.clone())
        .or_else(|| table.get(id).map(|row| row.value.clone()))
}

fn stage_insert<T>(
    table: &Table<T>,
    staging: &mut Staging<T>,
    value: &T,
    seq: u64,
) -> DomainResult<()>
where
    T: Entity + Clone,
{
    let id = value.id();
    if table.contains_key(id) || staging.contains_key(id) {
        return Err(DomainError::AlreadyExists {
            aggregate: T::TYPE,
            id: id.to_string(),
        });
    }
    staging.insert(
        id.clone(),
        Pending {
            op: Op::Insert,
            seq,
            value: value.clone(),
        },
    );
    Ok(())
}

fn stage_update<T>(
    table: &Table<T>,
    staging: &mut Staging<T>,
    value: &T,
    seq: u64,
) -> DomainResult<()>
where
    T: Entity + Clone,
{
    let id = value.id();
    if let Some(pending) = staging.get_mut(id) {
        pending.value = value.clone();
        return Ok(());
    }
    if !table.contains_key(id) {
        return Err(DomainError::not_found(T::TYPE, id));
    }
    staging.insert(
        id.clone(),
        Pending {
            op: Op::Update,
            seq,
            value: value.clone(),
        },
    );
    Ok(())
}

fn verify<T>(table: &Table<T>, staging: &Staging<T>) -> DomainResult<()>
where
    T: Entity,
{
    for (id, pending) in staging {
        match (pending.op, table.get(id)) {
            (Op::Insert, Some(_)) => {
                return Err(DomainError::AlreadyExists {
                    aggregate: T::TYPE,
                    id: id.to_string(),
                });
            }
            (Op::Update, None) => return Err(DomainError::not_found(T::TYPE, id)),
            (Op::Update, Some(row)) if row.value.version() != pending.value.version() => {
                return Err(DomainError::VersionConflict {
                    aggregate: T::TYPE,
                    id: id.to_string(),
                    expected: pending.value.version().value(),
                    actual: row.value.version().value(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn apply<T>(table: &mut Table<T>, staging: Staging<T>, next_seq: &mut u64)
where
    T: Versioned,
{
    let mut pending: Vec<_> = staging.into_iter().collect();
    pending.sort_by_key(|(_, p)| p.seq);

    for (id, p) in pending {
        let mut value = p.value;
        value.set_version(value.version().next());
        match table.get_mut(&id) {
            Some(row) => row.value = value,
            None => {
                let seq = *next_seq;
                *next_seq += 1;
                table.insert(id, Row { seq, value });
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn begin(&mut self) -> DomainResult<()> {
        self.ensure_open()?;
        self.state = TxState::Active;
        Ok(())
    }

    async fn commit(&mut self) -> DomainResult<()> {
        self.ensure_open()?;
        let couriers = std::mem::take(&mut self.couriers);
        let orders = std::mem::take(&mut self.orders);

        let mut state = self.store.lock()?;
        verify(&state.couriers, &couriers)?;
        verify(&state.orders, &orders)?;

        let StoreState {
            couriers: courier_table,
            orders: order_table,
            next_seq,
        } = &mut *state;
        apply(courier_table, couriers, next_seq);
        apply(order_table, orders, next_seq);

        self.state = TxState::Committed;
        Ok(())
    }

    async fn rollback_unless_committed(&mut self) {
        if self.state != TxState::Committed {
            self.discard();
            self.state = TxState::Idle;
        }
    }

    fn couriers(&mut self) -> &mut dyn CourierRepository {
        self
    }

    fn orders(&mut self) -> &mut dyn OrderRepository {
        self
    }
}

#[async_trait]
impl CourierRepository for InMemoryUnitOfWork {
    async fn get(&self, id: &CourierId) -> DomainResult<Option<Courier>> {
        let state = self.store.lock()?;
        Ok(get_one(&state.couriers, &self.couriers, id))
    }

    async fn get_all(&self) -> DomainResult<Vec<Courier>> {
        self.all_couriers()
    }

    async fn get_all_available(&self) -> DomainResult<Vec<Courier>> {
        Ok(self
            .all_couriers()?
            .into_iter()
            .filter(|c| AvailableCourier.is_satisfied_by(c))
            .collect())
    }

    async fn add(&mut self, courier: &Courier) -> DomainResult<()> {
        self.ensure_open()?;
        let seq = self.next_pending();
        let state = self.store.lock()?;
        stage_insert(&state.couriers, &mut self.couriers, courier, seq)
    }

    async fn update(&mut self, courier: &Courier) -> DomainResult<()> {
        self.ensure_open()?;
        let seq = self.next_pending();
        let state = self.store.lock()?;
        stage_update(&state.couriers, &mut self.couriers, courier, seq)
    }
}

#[async_trait]
impl OrderRepository for InMemoryUnitOfWork {
    async fn get(&self, id: &OrderId) -> DomainResult<Option<Order>> {
        let state = self.store.lock()?;
        Ok(get_one(&state.orders, &self.orders, id))
    }

    async fn get_first_in_created_status(&self) -> DomainResult<Option<Order>> {
        let created = OrderInStatus(OrderStatus::Created);
        Ok(self
            .all_orders()?
            .into_iter()
            .filter(|o| created.is_satisfied_by(o))
            .min_by_key(|o| o.created_at()))
    }

    async fn get_all_in_assigned_status(&self) -> DomainResult<Vec<Order>> {
        let assigned = OrderInStatus(OrderStatus::Assigned);
        Ok(self
            .all_orders()?
            .into_iter()
            .filter(|o| assigned.is_satisfied_by(o))
            .collect())
    }

    async fn get_all_incomplete(&self) -> DomainResult<Vec<Order>> {
        let incomplete =
            OrderInStatus(OrderStatus::Created).or(OrderInStatus(OrderStatus::Assigned));
        Ok(self
            .all_orders()?
            .into_iter()
            .filter(|o| incomplete.is_satisfied_by(o))
            .collect())
    }

    async fn add(&mut self, order: &Order) -> DomainResult<()> {
        self.ensure_open()?;
        let seq = self.next_pending();
        let state = self.store.lock()?;
        stage_insert(&state.orders, &mut self.orders, order, seq)
    }

    async fn update(&mut self, order: &Order) -> DomainResult<()> {
        self.ensure_open()?;
        let seq = self.next_pending();
        let state = self.store.lock()?;
        stage_update(&state.orders, &mut self.orders, order, seq)
    }
}
