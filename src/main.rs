use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use worklink_backend::{
    config::{get_config, init_config, StorageBackend},
    database::pool::create_pool,
    middleware, routes,
    storage::{memory::MemStorage, postgres::PgStorage, Storage},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let storage: Arc<dyn Storage> = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool().await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Using postgres storage");
            Arc::new(PgStorage::new(pool))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Arc::new(MemStorage::new())
        }
    };

    let app_state = AppState::new(storage);

    let api = routes::api_router().layer(axum::middleware::from_fn_with_state(
        middleware::rate_limit::new_rps_state(config.api_rps),
        middleware::rate_limit::rps_middleware,
    ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(middleware::cors::cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
