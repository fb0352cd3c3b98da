use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Extension, Router};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::handler::{get_episodes, get_feed, ApiDoc};
use crate::config::Config;

pub fn router(database_connection: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .route(&config.feed_path, get(get_feed))
        .route("/api/episodes", get(get_episodes))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .layer(Extension(database_connection))
        .layer(Extension(config))
        .layer(TraceLayer::new_for_http())
}

pub async fn http_server(database_connection: Arc<DatabaseConnection>, config: Arc<Config>) -> Result<()> {
    let bind_address = config.bind_address.clone();
    let app = router(database_connection, config.clone());
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("bind address failed")?;
    info!("feed 服务已启动: http://{}{}", bind_address, config.feed_path);
    Ok(axum::serve(listener, app).await?)
}
