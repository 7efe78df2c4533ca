mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

use crate::place::GeoFinder;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::categories))
        .route("/api/search", get(handlers::search))
        .route("/api/export", get(handlers::export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(finder: GeoFinder, host: &str, port: u16) -> anyhow::Result<()> {
    if !finder.has_credential() {
        tracing::warn!("GEOAPIFY_KEY is not set; searches will answer 503");
    }
    let app = build_router(AppState::new(finder));
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind to {}: {}", addr, e))?;

    eprintln!("  GeoFinder server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;
    Ok(())
}
