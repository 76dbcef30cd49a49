//! Ranked lexical search over an in-memory record set.
//!
//! A query runs in two passes. The strict pass keeps records whose normalized
//! text contains every query token as a substring, in index order. Only when
//! it finds nothing does the fallback pass score each record token-by-token
//! and return the best-scoring records.

use super::tokenizer::{normalize, split_tokens, tokenize};
use super::types::{IndexedRecord, SearchableRecord};

/// Result count used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 20;
/// Queries shorter than this (in characters, after trimming) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;
/// Fallback candidates scoring below this are dropped.
pub const MIN_FALLBACK_SCORE: u32 = 2;

const EXACT_SCORE: u32 = 4;
const PREFIX_SCORE: u32 = 2;
const CONTAINS_SCORE: u32 = 1;

impl IndexedRecord {
    fn from_record<R: SearchableRecord>(record: &R) -> Self {
        let normalized_text = normalize(&record.searchable_text());
        let tokens = split_tokens(&normalized_text);

        Self {
            id: record.id().to_string(),
            group_id: record.group_id().map(str::to_string),
            normalized_text,
            tokens,
        }
    }

    fn in_scope(&self, scope: Option<&str>) -> bool {
        match scope {
            Some(scope) => self.group_id.as_deref() == Some(scope),
            None => true,
        }
    }
}

/// Searchable snapshot of a record set.
///
/// The index never hands out its normalized data: `search` resolves every hit
/// against the live record slice passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexedRecord>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor equivalent to `new` followed by `build_index`.
    pub fn build<R: SearchableRecord>(records: &[R]) -> Self {
        let mut index = Self::new();
        index.build_index(records);
        index
    }

    /// Replaces the whole index with a fresh snapshot of `records`.
    pub fn build_index<R: SearchableRecord>(&mut self, records: &[R]) {
        self.entries = records.iter().map(IndexedRecord::from_record).collect();
        tracing::debug!("Search index rebuilt with {} records", self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answers `query` against the index, restricted to `scope` when it is
    /// given and non-empty, returning at most `limit` records from `records`.
    ///
    /// Never fails: short, blank or punctuation-only queries and queries with
    /// no match all yield an empty vector. Hits whose id is no longer present
    /// in `records` are skipped before `limit` applies; with duplicate ids the
    /// first record wins. A strict pass whose hits are all stale counts as
    /// empty and falls through to the scored pass.
    pub fn search<'a, R: SearchableRecord>(
        &self,
        records: &'a [R],
        query: &str,
        scope: Option<&str>,
        limit: usize,
    ) -> Vec<&'a R> {
        if limit == 0 || query.trim().chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let scope = scope.filter(|scope| !scope.is_empty());

        let strict = resolve(records, self.strict_matches(&query_tokens, scope), limit);
        if !strict.is_empty() {
            return strict;
        }

        let scored = self.scored_matches(&query_tokens, scope);
        tracing::debug!(
            "Strict pass empty for {:?}, fallback found {} candidates",
            query,
            scored.len()
        );

        resolve(records, scored, limit)
    }

    /// Ids of every in-scope entry containing all query tokens, in index order.
    fn strict_matches(&self, query_tokens: &[String], scope: Option<&str>) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.in_scope(scope))
            .filter(|entry| {
                query_tokens
                    .iter()
                    .all(|token| entry.normalized_text.contains(token.as_str()))
            })
            .map(|entry| entry.id.as_str())
            .collect()
    }

    /// Ids of every in-scope entry scoring at least `MIN_FALLBACK_SCORE`,
    /// best first.
    fn scored_matches(&self, query_tokens: &[String], scope: Option<&str>) -> Vec<&str> {
        let mut scored: Vec<(&str, u32)> = self
            .entries
            .iter()
            .filter(|entry| entry.in_scope(scope))
            .map(|entry| (entry.id.as_str(), score_tokens(query_tokens, &entry.tokens)))
            .filter(|(_, score)| *score >= MIN_FALLBACK_SCORE)
            .collect();

        // Stable: equal scores keep index order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored.into_iter().map(|(id, _)| id).collect()
    }
}

/// Looks hit ids up in the live records and keeps the first `limit` found.
fn resolve<'a, R: SearchableRecord>(
    records: &'a [R],
    ids: Vec<&str>,
    limit: usize,
) -> Vec<&'a R> {
    ids.into_iter()
        .filter_map(|id| {
            let found = records.iter().find(|record| record.id() == id);
            if found.is_none() {
                tracing::debug!("Search hit {} is not in the live record set", id);
            }
            found
        })
        .take(limit)
        .collect()
}

/// Points one (query token, record token) pair contributes.
/// Exact equality beats prefix, prefix beats plain containment.
pub fn pair_score(query_token: &str, record_token: &str) -> u32 {
    if record_token == query_token {
        EXACT_SCORE
    } else if record_token.starts_with(query_token) {
        PREFIX_SCORE
    } else if record_token.contains(query_token) {
        CONTAINS_SCORE
    } else {
        0
    }
}

/// Sum of `pair_score` over every query/record token pair.
pub fn score_tokens(query_tokens: &[String], record_tokens: &[String]) -> u32 {
    query_tokens
        .iter()
        .flat_map(|q| record_tokens.iter().map(move |t| pair_score(q, t)))
        .sum()
}
