//! HTTP router: the JSON API plus the static files the front-ends load.
//!
//! - `/api/...` catalog, search and assistant endpoints
//! - `/data/...` the raw data files (the public browser reads them directly)
//! - `/uploads/...` uploaded images and videos referenced by `MediaItem.url`
//! - everything else falls through to the static front-end in `public_dir`

use crate::catalog::handlers::*;
use crate::catalog::state::CatalogState;
use crate::config::Config;
use crate::search::handlers::{handle_assistant, handle_search};
use axum::{
    Router,
    extract::Extension,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub fn router(state: Arc<CatalogState>, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(handle_login))
        .route("/api/modules", get(handle_list_modules).post(handle_create_module))
        .route(
            "/api/modules/:id",
            put(handle_update_module).delete(handle_delete_module),
        )
        .route(
            "/api/instructions",
            get(handle_list_instructions).post(handle_create_instruction),
        )
        .route(
            "/api/instructions/:id",
            get(handle_get_instruction)
                .put(handle_update_instruction)
                .delete(handle_delete_instruction),
        )
        .route("/api/search", get(handle_search))
        .route("/api/assistant", post(handle_assistant))
        .route("/api/admin/reload", post(handle_reload))
        .nest_service("/data", ServeDir::new(&config.data_dir))
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(Extension(state))
        .layer(cors)
}
