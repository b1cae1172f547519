use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use mn_core::Result;
use tower_http::trace::TraceLayer;

pub mod cors;
pub mod error;
pub mod handlers;
pub mod state;

pub use cors::CorsConfig;
pub use state::AppState;

pub const PROCESS_NOTE_PATH: &str = "/api/process-note";

pub fn create_app(state: AppState, cors: &CorsConfig) -> Result<Router> {
    let cors = cors::cors_layer(cors)?;

    Ok(Router::new()
        .route(
            PROCESS_NOTE_PATH,
            post(handlers::process_note).fallback(handlers::method_not_allowed),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

pub mod prelude {
    pub use crate::{create_app, AppState, CorsConfig};
    pub use mn_core::{Error, Result};
}
