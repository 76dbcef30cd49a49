//! Search Data Types
//!
//! The record contract consumed by the index, the index's private per-record
//! representation, and the DTOs returned by the HTTP layer.

use crate::catalog::types::Instruction;
use serde::{Deserialize, Serialize};

/// A catalog entry that can be indexed.
///
/// Absent text fields are reported as `None` and indexed as empty strings.
pub trait SearchableRecord {
    /// Opaque identifier used to resolve search hits back to the record.
    fn id(&self) -> &str;
    /// Optional grouping key (module/category) used for scoped search.
    fn group_id(&self) -> Option<&str>;
    fn title(&self) -> Option<&str>;
    /// Transaction or reference code, e.g. `ZMM01`.
    fn code(&self) -> Option<&str>;
    fn steps(&self) -> &[String];
    fn notes(&self) -> Option<&str>;

    /// All searchable fields joined with line breaks, before normalization.
    fn searchable_text(&self) -> String {
        let steps = self.steps().join(" ");
        [
            self.title().unwrap_or_default(),
            self.code().unwrap_or_default(),
            steps.as_str(),
            self.notes().unwrap_or_default(),
        ]
        .join("\n")
    }
}

/// Normalized form of one record, owned by the `SearchIndex`.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRecord {
    pub(crate) id: String,
    pub(crate) group_id: Option<String>,
    /// Lowercased text with punctuation collapsed; used for substring matching.
    pub(crate) normalized_text: String,
    /// Whitespace-delimited words of `normalized_text`, duplicates kept.
    pub(crate) tokens: Vec<String>,
}

/// Response body for `GET /api/search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub scope: Option<String>,
    pub count: usize,
    pub results: Vec<Instruction>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

/// One short suggestion shown in the assistant panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSuggestion {
    pub id: String,
    pub title: String,
    pub transaction_code: String,
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    pub suggestions: Vec<AssistantSuggestion>,
}
