//! # SalonBook API
//!
//! HTTP surface for the SalonBook scheduling core. Handlers are thin: they
//! decode the request, call the scheduling or catalog service, and map the
//! result onto a status code.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths, grouped by resource
//! - **Handlers**: request decoding and response mapping
//! - **Middleware**: error to HTTP response mapping
//! - **Config**: environment driven settings
//!
//! Storage is injected as an [`EntityStore`], so the same router serves the
//! PostgreSQL adapter in production and the in-memory adapter in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by every handler
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{BoxError, Router};
use eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use salonbook_core::services::{CatalogService, SchedulingService};
use salonbook_core::store::EntityStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub scheduling: SchedulingService,
    pub catalog: CatalogService,
}

impl ApiState {
    pub fn new(store: Arc<dyn EntityStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scheduling: SchedulingService::new(store.clone(), clock),
            catalog: CatalogService::new(store),
        }
    }
}

/// Every route of the API with `state` attached, without transport layers.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::appointment::routes())
        .merge(routes::catalog::routes())
        .with_state(state)
}

/// Adds request tracing, the optional CORS policy and the request timeout.
///
/// # Errors
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn apply_layers(app: Router, config: &config::ApiConfig) -> Result<Router> {
    let app = app.layer(TraceLayer::new_for_http());

    let app = match &config.cors_origins {
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
                })
                .collect::<Result<Vec<_>>>()?;

            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(origins);

            app.layer(cors)
        }
        None => app,
    };

    Ok(app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    ))
}

/// Starts the API server over `store`.
///
/// Installs the global tracing subscriber at the configured level, builds
/// the router, and serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use salonbook_api::{config::ApiConfig, start_server};
/// # use salonbook_db::InMemoryStore;
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(InMemoryStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn EntityStore>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store, Arc::new(DefaultClock)));
    let app = apply_layers(build_router(state), &config)?;

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
