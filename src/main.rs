use std::sync::Arc;

use cafe_lavender::{
    AppState,
    config::{BackendKind, Config},
    domain::FactRepository,
    repositories::{DynamoDbFactRepository, InMemoryFactRepository},
    routes::create_router,
    startup,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cafe_lavender=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let repo: Arc<dyn FactRepository> = match config.backend {
        BackendKind::DynamoDb => {
            tracing::info!("Initializing DynamoDB backend...");
            let sdk_config = startup::create_sdk_config(&config).await;
            let client = startup::create_dynamodb_client(&sdk_config);
            startup::ensure_facts_table(&client, &config.facts_table).await?;
            Arc::new(DynamoDbFactRepository::new(client, config.facts_table.clone()))
        }
        BackendKind::Memory => {
            tracing::info!("Using in-memory backend; facts will not survive a restart.");
            Arc::new(InMemoryFactRepository::new())
        }
    };

    let state = Arc::new(AppState { repo });
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
