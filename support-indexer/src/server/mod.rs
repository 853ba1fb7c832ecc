// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::IndexingError;
pub use self::state::AppState;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/update_status", post(handlers::update_status))
        .route("/search", get(handlers::search))
        .layer(create_cors_layer())
        .with_state(state)
}

/// Cross-origin requests are allowed from any origin on every route
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Serve `app` on an already bound listener until `shutdown` resolves
pub async fn run_server<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), IndexingError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| IndexingError::server(format!("Failed to read bound address: {}", e)))?;

    info!("Server listening on {}", addr);
    info!("- Health endpoint: http://{}/health", addr);
    info!("- Status endpoint: http://{}/update_status", addr);
    info!("- Search endpoint: http://{}/search", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| IndexingError::server(e.to_string()))
}
