//! sheetmerge-api - REST API for tabular uploads
//!
//! Exposes the upload directory over HTTP: store a file, fetch every stored
//! file merged into one JSON dataset, or clear the directory.
//!
//! # Usage
//!
//! ```ignore
//! use sheetmerge_api::{create_router, AppState};
//! use sheetmerge_core::UploadStore;
//!
//! let state = AppState::new(UploadStore::new("uploads"));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, DEFAULT_MAX_UPLOAD_BYTES};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route(
            "/upload",
            post(handlers::uploads::upload_file)
                .layer(DefaultBodyLimit::max(state.max_upload_bytes())),
        )
        .route("/all-data", get(handlers::data::all_data))
        .route("/clear-uploads", post(handlers::uploads::clear_uploads))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
