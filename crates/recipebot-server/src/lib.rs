//! HTTP surface for RecipeBot.
//!
//! - `GET /` serves the chat page
//! - `POST /chat` accepts `{"query": ...}` and answers `{"response": ...}`

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Builds the application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
