use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:id", get(handlers::get_article))
        .route("/api/search", get(handlers::search_articles))
        .route("/api/fetch", post(handlers::fetch_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> dw_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use dw_core::{ArticleRecord, Error, Result};
}
