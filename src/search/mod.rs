//! Search Service Module
//!
//! Lexical search over the instruction catalog, used for search-as-you-type
//! in the browser and for the assistant's suggestion list.
//!
//! ## Overview
//! The index is a plain value owned by the caller. It is rebuilt wholesale
//! whenever the record set changes and queried synchronously; it holds no
//! hidden global state and performs no I/O.
//!
//! ## Submodules
//! - **`assistant`**: Short suggestion replies for the chat-style panel.
//! - **`engine`**: `SearchIndex`, the strict pass and the scored fallback.
//! - **`handlers`**: HTTP handlers for the Axum web server.
//! - **`tokenizer`**: Unicode-aware normalization and tokenization.
//! - **`types`**: The `SearchableRecord` contract and response DTOs.

pub mod assistant;
pub mod engine;
pub mod handlers;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
