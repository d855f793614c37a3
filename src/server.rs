//! # Server Configuration
//!
//! Router assembly, OpenAPI document and the serve loop for the Roster API.

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, companies, users};
use crate::telemetry;

/// Shared state handed to every handler.
///
/// The connection is built once at startup; cloning only clones the pool
/// handle.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Build the application router with every route, the trace middleware and
/// the Swagger UI.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route("/users", post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/companies", post(companies::create_company))
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(telemetry::trace_middleware))
}

/// Serve the API until Ctrl-C is received.
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let app = create_app(AppState { db });

    let addr = config
        .bind_addr()
        .with_context(|| format!("invalid server address '{}'", config.api_bind_addr))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, profile = %config.profile, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        // Without a signal handler the server simply runs until killed.
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal, draining connections");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::readyz,
        crate::handlers::users::create_user,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::companies::create_company,
        crate::handlers::companies::get_company,
        crate::handlers::companies::update_company,
        crate::handlers::companies::delete_company,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::UserFields,
            crate::models::UserPatch,
            crate::models::CompanyFields,
            crate::models::CompanyPatch,
            crate::handlers::types::MessageResponse,
            crate::handlers::types::HealthResponse,
            crate::error::ApiError,
        )
    ),
    tags(
        (name = "users", description = "User records"),
        (name = "companies", description = "Company records"),
        (name = "operations", description = "Health and readiness probes"),
    ),
    info(
        title = "Roster API",
        description = "CRUD API for users and companies with soft deletion",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
