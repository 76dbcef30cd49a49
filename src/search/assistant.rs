//! Suggestion panel backed by the search index.
//!
//! Takes a free-form message, runs an unscoped search capped at
//! `ASSISTANT_LIMIT` and wraps the hits in a short reply.

use super::engine::SearchIndex;
use super::types::{AssistantReply, AssistantSuggestion, SearchableRecord};

pub const ASSISTANT_LIMIT: usize = 5;

pub const FOUND_MESSAGE: &str = "Вот что может подойти:";
pub const NOT_FOUND_MESSAGE: &str =
    "Пока не нашёл подходящих инструкций 🤔\nПопробуй переформулировать запрос.";

/// Returns `None` for a blank message, otherwise a reply with up to
/// `ASSISTANT_LIMIT` suggestions.
pub fn suggest<R: SearchableRecord>(
    index: &SearchIndex,
    records: &[R],
    message: &str,
) -> Option<AssistantReply> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }

    let suggestions: Vec<AssistantSuggestion> = index
        .search(records, message, None, ASSISTANT_LIMIT)
        .into_iter()
        .map(|record| AssistantSuggestion {
            id: record.id().to_string(),
            title: record.title().unwrap_or_default().to_string(),
            transaction_code: record.code().unwrap_or_default().to_string(),
            module_id: record.group_id().map(str::to_string),
        })
        .collect();

    let reply = if suggestions.is_empty() {
        NOT_FOUND_MESSAGE
    } else {
        FOUND_MESSAGE
    };

    Some(AssistantReply {
        message: reply.to_string(),
        suggestions,
    })
}
