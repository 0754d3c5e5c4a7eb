//! HTTP layer - axum router, shared state and server lifecycle.
//!
//! Every route lives under `/api`. CORS is open to any origin, method and
//! header, and every request gets a tracing span from `tower-http`.

/// Error to response mapping and rejection-aware extractors
pub mod error;
/// Request handlers grouped by resource
pub mod handlers;

use crate::{
    config::{AppConfig, database},
    errors::Result,
};
use axum::{
    Router,
    routing::{get, put},
};
use handlers::{health, ingredients, links, recipes, sources};
use sea_orm::DatabaseConnection;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    /// Wraps an open database connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Builds the application router with every endpoint mounted under `/api`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/recipes/:id/ingredients",
            get(links::list_recipe_ingredients)
                .post(links::add_recipe_ingredient)
                .put(links::sync_recipe_ingredients),
        )
        .route(
            "/recipes/:id/ingredients/:ingredient_id",
            put(links::update_recipe_ingredient).delete(links::remove_recipe_ingredient),
        )
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/ingredients/:id",
            get(ingredients::get_ingredient)
                .put(ingredients::update_ingredient)
                .delete(ingredients::delete_ingredient),
        )
        .route(
            "/ingredients/:id/sources",
            get(sources::list_sources).post(sources::add_source),
        )
        .route(
            "/ingredients/:id/sources/:source_id",
            put(sources::update_source).delete(sources::delete_source),
        );

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Opens the database, binds the listener and serves until Ctrl-C or SIGTERM.
///
/// # Errors
/// Returns an error if the database cannot be opened or the address cannot be bound.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let db = database::init_db(&config.database.url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let app = create_router(AppState::new(db));

    let address = config.server.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
