//! Catalog Service Module
//!
//! The data source behind the search index: SAP modules and the instructions
//! filed under them, persisted as JSON arrays on disk and exposed through a
//! small REST API for the public browser and the admin panel.
//!
//! ## Submodules
//! - **`handlers`**: Axum handlers for login and module/instruction CRUD.
//! - **`media`**: Image/video detection for attached media URLs.
//! - **`state`**: The live record set and its search index behind one lock.
//! - **`store`**: JSON-file-backed collections.
//! - **`types`**: Persisted records and API request/response bodies.

pub mod handlers;
pub mod media;
pub mod state;
pub mod store;
pub mod types;
