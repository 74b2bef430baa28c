mod config;
mod jobs;

use config::DemoConfig;
use delivery_application::commands::{
    AddStoragePlaceCommand, AddStoragePlaceHandler, AssignOrdersCommand, AssignOrdersHandler,
    CreateCourierCommand, CreateCourierHandler, CreateOrderCommand, CreateOrderHandler,
    MoveCouriersCommand, MoveCouriersHandler,
};
use delivery_application::error::AppResult;
use delivery_application::ports::RandomGeoClient;
use delivery_application::queries::{
    GetAllCouriersHandler, GetAllCouriersQuery, GetIncompleteOrdersHandler,
    GetIncompleteOrdersQuery,
};
use delivery_application::{InMemoryCommandBus, InMemoryQueryBus};
use delivery_domain::persist::InMemoryStore;
use jobs::Delivery;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn wire(store: InMemoryStore) -> AppResult<Delivery> {
    let commands = InMemoryCommandBus::new();
    commands.register::<CreateOrderCommand, _>(Arc::new(CreateOrderHandler::new(
        store.clone(),
        RandomGeoClient,
    )))?;
    commands.register::<CreateCourierCommand, _>(Arc::new(CreateCourierHandler::new(
        store.clone(),
    )))?;
    commands.register::<AddStoragePlaceCommand, _>(Arc::new(AddStoragePlaceHandler::new(
        store.clone(),
    )))?;
    commands.register::<AssignOrdersCommand, _>(Arc::new(AssignOrdersHandler::new(
        store.clone(),
    )))?;
    commands.register::<MoveCouriersCommand, _>(Arc::new(MoveCouriersHandler::new(
        store.clone(),
    )))?;

    let queries = InMemoryQueryBus::new();
    queries.register::<GetAllCouriersQuery, _>(Arc::new(GetAllCouriersHandler::new(
        store.clone(),
    )))?;
    queries.register::<GetIncompleteOrdersQuery, _>(Arc::new(GetIncompleteOrdersHandler::new(
        store,
    )))?;

    Ok(Delivery { commands, queries })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG 可覆盖默认过滤，例如 RUST_LOG=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,delivery_application=debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_PATH.to_string());
    let config = DemoConfig::load(&path)?;
    tracing::info!(
        config = path.as_str(),
        couriers = config.couriers.len(),
        ticks = config.ticks,
        "starting delivery demo"
    );

    let app = wire(InMemoryStore::new())?;
    jobs::seed_couriers(&app, &config).await?;
    jobs::run(&app, &config).await?;

    tracing::info!("demo finished");
    Ok(())
}
