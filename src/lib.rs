pub mod backend;
pub mod config;
pub mod docs;
mod routes;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::get,
    Router, ServiceExt,
};
use axum_embed::ServeEmbed;
use docs::ApiDoc;
use routes::relay::relay_routes;
use rust_embed::RustEmbed;
use state::AppState;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower::{Layer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tower_http::{normalize_path::NormalizePathLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

#[derive(RustEmbed, Clone)]
#[folder = "web/static/"]
struct StaticAssets;

/// All routes of the relay, without the path normalization `run` adds on top.
pub fn build_router(app_state: AppState) -> Router {
    let config = app_state.config().clone();

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api", relay_routes())
        .route("/health_check", get(routes::health_check))
        .nest_service("/static", ServeEmbed::<StaticAssets>::new())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_headers(Any)
                        .allow_origin(Any)
                        .allow_methods(Any),
                )
                .into_inner(),
        )
        .with_state(Arc::new(app_state))
}

pub async fn run(app_state: AppState) -> anyhow::Result<()> {
    let config = app_state.config().clone();

    tracing::info!("relaying to backend at {}", config.backend_url);

    let app = NormalizePathLayer::trim_trailing_slash().layer(build_router(app_state));

    let addr = SocketAddr::from_str(format!("{}:{}", &config.host, &config.port).as_str())?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(signal_shutdown())
        .await?;

    Ok(())
}

async fn signal_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("signal shutdown");
}
