//! SAP Knowledge Base Library
//!
//! Backend for an internal catalog of SAP transaction how-tos ("instructions")
//! grouped by module. It serves the catalog for the public browser and the
//! admin panel and answers ranked free-text queries.
//!
//! ## Architecture Modules
//! - **`catalog`**: The data source. JSON-file-backed modules and instructions,
//!   the shared live state, and the CRUD/login HTTP handlers.
//! - **`config`**: Runtime configuration from command-line flags and environment.
//! - **`server`**: The HTTP router: API routes, static front-end, data files,
//!   uploads and CORS.
//! - **`search`**: The lexical search core (normalization, strict substring pass,
//!   scored fallback) plus the assistant suggestion list and search endpoints.

pub mod catalog;
pub mod config;
pub mod search;
pub mod server;
