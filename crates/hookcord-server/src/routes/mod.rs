//! Route definitions.

mod health;
mod webhook;

use axum::{
    routing::{any, get},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // GitHub deliveries; other methods are answered by the dispatcher
        .route("/", any(webhook::receive_webhook))
        .route("/webhook", any(webhook::receive_webhook))
        .with_state(state)
}

pub use health::*;
pub use webhook::*;
