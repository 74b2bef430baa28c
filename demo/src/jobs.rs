//! 演示用的周期任务：生成随机订单、分派订单、推进快递员
//!
use crate::config::DemoConfig;
use anyhow::Result;
use delivery_application::command_bus::CommandBus;
use delivery_application::commands::{
    AddStoragePlaceCommand, AssignOrdersCommand, CreateCourierCommand, CreateOrderCommand,
    MoveCouriersCommand,
};
use delivery_application::context::AppContext;
use delivery_application::error::AppResult;
use delivery_application::queries::{GetAllCouriersQuery, GetIncompleteOrdersQuery};
use delivery_application::query_bus::QueryBus;
use delivery_application::{InMemoryCommandBus, InMemoryQueryBus};
use delivery_domain::model::order::OrderId;
use rand::Rng;
use tokio::time::{MissedTickBehavior, interval};

const STREETS: [&str; 5] = ["Tverskaya", "Arbat", "Nevsky", "Lenina", "Mira"];

pub struct Delivery {
    pub commands: InMemoryCommandBus,
    pub queries: InMemoryQueryBus,
}

fn context(job: &str, n: u64) -> AppContext {
    AppContext::builder()
        .correlation_id(format!("{job}-{n}"))
        .build()
}

/// 招募配置中的快递员并补充额外存储位
pub async fn seed_couriers(app: &Delivery, config: &DemoConfig) -> Result<()> {
    let ctx = context("seed", 0);
    for courier in &config.couriers {
        let cmd = CreateCourierCommand::new(courier.name.as_str(), courier.speed)?;
        app.commands.dispatch(&ctx, cmd).await?;
    }

    // 存储是新建的，查询结果与配置按写入顺序一一对应
    let fleet = app.queries.dispatch(&ctx, GetAllCouriersQuery).await?;
    for (dto, courier) in fleet.couriers.iter().zip(&config.couriers) {
        for place in &courier.storage_places {
            let cmd = AddStoragePlaceCommand::new(dto.id, place.name.as_str(), place.volume)?;
            app.commands.dispatch(&ctx, cmd).await?;
        }
    }

    tracing::info!(couriers = fleet.couriers.len(), "fleet ready");
    Ok(())
}

/// 总线错误（未注册处理器等）不会被处理器记录，这里补记；领域错误已在处理器内记录
fn report(job: &'static str, result: AppResult<()>) {
    match result {
        Err(err) if err.kind().is_none() => tracing::error!(job, error = %err, "job failed"),
        _ => {}
    }
}

async fn create_random_order(app: &Delivery, n: u64) -> AppResult<()> {
    let (street, volume) = {
        let mut rng = rand::rng();
        let street = STREETS[rng.random_range(0..STREETS.len())];
        (format!("{street} {}", rng.random_range(1..100)), rng.random_range(1..=10))
    };
    let cmd = CreateOrderCommand::new(OrderId::generate(), street, volume)?;
    app.commands.dispatch(&context("order", n), cmd).await
}

async fn log_fleet(app: &Delivery, ctx: &AppContext) -> AppResult<()> {
    let fleet = app.queries.dispatch(ctx, GetAllCouriersQuery).await?;
    for courier in &fleet.couriers {
        tracing::info!(
            id = %courier.id,
            name = courier.name.as_str(),
            x = courier.location.x,
            y = courier.location.y,
            "courier"
        );
    }
    let pending = app.queries.dispatch(ctx, GetIncompleteOrdersQuery).await?;
    tracing::info!(incomplete = pending.orders.len(), "orders in flight");
    Ok(())
}

/// 运行三个周期任务，直到完成 `ticks` 个移动周期或收到 Ctrl-C
pub async fn run(app: &Delivery, config: &DemoConfig) -> Result<()> {
    let mut orders = interval(config.order_interval());
    let mut assign = interval(config.assign_interval());
    let mut moves = interval(config.move_interval());
    for timer in [&mut orders, &mut assign, &mut moves] {
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let (mut created, mut assigned, mut ticks) = (0u64, 0u64, 0u64);
    loop {
        tokio::select! {
            _ = orders.tick() => {
                created += 1;
                report("order", create_random_order(app, created).await);
            }
            _ = assign.tick() => {
                assigned += 1;
                let ctx = context("assign", assigned);
                report("assign", app.commands.dispatch(&ctx, AssignOrdersCommand).await);
            }
            _ = moves.tick() => {
                ticks += 1;
                let ctx = context("move", ticks);
                report("move", app.commands.dispatch(&ctx, MoveCouriersCommand).await);
                report("fleet", log_fleet(app, &ctx).await);

                if config.ticks != 0 && ticks >= config.ticks {
                    tracing::info!(ticks, "tick limit reached");
                    break;
                }
            }
            res = &mut shutdown => {
                res?;
                tracing::info!("ctrl-c received, shutting down");
                break;
            }
        }
    }
    Ok(())
}
