//! hookcord-server - HTTP endpoint for the GitHub to Discord relay.
//!
//! # Example
//!
//! ```ignore
//! use hookcord_server::{create_server, AppConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let state = AppState::from_config(&config)?;
//!     let app = create_server(state, config.server.max_body_bytes);
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, max_body_bytes: usize) -> Router {
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
