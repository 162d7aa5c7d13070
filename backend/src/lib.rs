//! Satire API
//!
//! A single `POST /api/generate` endpoint that turns a word into a short
//! satirical line and a category tag, backed by a chat-completion API with
//! a local template fallback.

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

rust_i18n::i18n!("locales", fallback = "ja");

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use services::SatireService;

/// Shared application state
pub struct AppState {
    pub satire_service: SatireService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self { satire_service: SatireService::from_config(&config.llm) }
    }
}

/// Build the HTTP router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(handlers::generate::generate).fallback(handlers::generate::only_post),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
