//! Search Module Tests
//!
//! Validates the search pipeline: text normalization, the strict substring
//! pass, the scored fallback and resolution back to live records.
//!
//! ## Test Scopes
//! - **Tokenizer**: Unicode-aware lowercasing, punctuation collapsing, splitting.
//! - **Index**: Rebuild semantics and record count invariant.
//! - **Strict pass**: AND-substring matching in index order, scoping, limits.
//! - **Fallback**: Pair scoring precedence, threshold and stable ordering.
//! - **Assistant**: Suggestion replies.

#[cfg(test)]
mod tests {
    use crate::catalog::types::Instruction;
    use crate::search::assistant::{self, ASSISTANT_LIMIT, FOUND_MESSAGE, NOT_FOUND_MESSAGE};
    use crate::search::engine::{DEFAULT_LIMIT, SearchIndex, pair_score, score_tokens};
    use crate::search::tokenizer::{normalize, split_tokens, tokenize};
    use crate::search::types::SearchableRecord;

    fn instruction(id: &str, module: Option<&str>, title: &str, code: &str) -> Instruction {
        Instruction {
            id: id.to_string(),
            title: title.to_string(),
            module_id: module.map(str::to_string),
            transaction_code: code.to_string(),
            ..Default::default()
        }
    }

    /// The two-record catalog used throughout the scenario tests.
    fn zmm_catalog() -> Vec<Instruction> {
        vec![
            Instruction {
                steps: vec![
                    "Открыть транзакцию ZMM01".to_string(),
                    "Ввести данные".to_string(),
                ],
                ..instruction("1", None, "Создание заявки", "ZMM01")
            },
            Instruction {
                notes: "см. также ZMM01".to_string(),
                ..instruction("2", None, "Отмена заявки", "ZMM02")
            },
        ]
    }

    fn ids<R: SearchableRecord>(results: &[&R]) -> Vec<String> {
        results.iter().map(|r| r.id().to_string()).collect()
    }

    /// Record with every optional field absent.
    struct BareRecord {
        id: String,
        title: Option<String>,
        steps: Vec<String>,
    }

    impl SearchableRecord for BareRecord {
        fn id(&self) -> &str {
            &self.id
        }
        fn group_id(&self) -> Option<&str> {
            None
        }
        fn title(&self) -> Option<&str> {
            self.title.as_deref()
        }
        fn code(&self) -> Option<&str> {
            None
        }
        fn steps(&self) -> &[String] {
            &self.steps
        }
        fn notes(&self) -> Option<&str> {
            None
        }
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_normalize_lowercases_and_collapses_punctuation() {
        assert_eq!(normalize("  Hello,   World!! "), "hello world");
        assert_eq!(normalize("ME21N/ME22N"), "me21n me22n");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters_and_digits() {
        assert_eq!(normalize("Создание-заявки (ZMM01)"), "создание заявки zmm01");
        assert_eq!(normalize("Książka №5"), "książka 5");
    }

    #[test]
    fn test_normalize_turns_line_breaks_into_single_spaces() {
        assert_eq!(normalize("title\n\n\tcode\r\nnotes"), "title code notes");
    }

    #[test]
    fn test_tokenize_keeps_duplicates_and_order() {
        assert_eq!(tokenize("zmm01, ZMM01; zmm02"), vec!["zmm01", "zmm01", "zmm02"]);
    }

    #[test]
    fn test_tokenize_punctuation_only_is_empty() {
        assert!(tokenize("?!... ---").is_empty());
        assert!(tokenize("").is_empty());
        assert!(split_tokens("").is_empty());
    }

    // ============================================================
    // INDEX TESTS
    // ============================================================

    #[test]
    fn test_build_index_counts_every_record() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        assert_eq!(index.len(), records.len());
        assert!(!index.is_empty());
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let mut index = SearchIndex::build(&zmm_catalog());

        let replacement = vec![instruction("9", None, "Проводка документа", "FB01")];
        index.build_index(&replacement);

        assert_eq!(index.len(), 1);
        // Old records are gone even if the caller still passes them in.
        let old = zmm_catalog();
        assert!(index.search(&old, "заявки", None, DEFAULT_LIMIT).is_empty());
        assert_eq!(
            ids(&index.search(&replacement, "fb01", None, DEFAULT_LIMIT)),
            vec!["9"]
        );
    }

    #[test]
    fn test_rebuild_with_same_records_is_idempotent() {
        let records = zmm_catalog();
        let mut index = SearchIndex::build(&records);
        let first = ids(&index.search(&records, "заявки", None, DEFAULT_LIMIT));

        index.build_index(&records);
        let second = ids(&index.search(&records, "заявки", None, DEFAULT_LIMIT));

        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_fields_are_indexed_as_empty() {
        let records = vec![
            BareRecord {
                id: "a".to_string(),
                title: None,
                steps: Vec::new(),
            },
            BareRecord {
                id: "b".to_string(),
                title: Some("Stock overview MMBE".to_string()),
                steps: Vec::new(),
            },
        ];
        let index = SearchIndex::build(&records);

        assert_eq!(index.len(), 2);
        assert_eq!(ids(&index.search(&records, "mmbe", None, 10)), vec!["b"]);
    }

    // ============================================================
    // QUERY PRECONDITIONS
    // ============================================================

    #[test]
    fn test_short_queries_return_nothing() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        for query in ["", " ", "z", "  z  ", "я"] {
            assert!(
                index.search(&records, query, None, DEFAULT_LIMIT).is_empty(),
                "query {:?} should be rejected",
                query
            );
        }
    }

    #[test]
    fn test_two_character_unicode_query_is_accepted() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        // Two characters but four bytes.
        assert_eq!(ids(&index.search(&records, "за", None, DEFAULT_LIMIT)), vec!["1", "2"]);
    }

    #[test]
    fn test_punctuation_only_query_returns_nothing() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        assert!(index.search(&records, "?!?!", None, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_zero_limit_returns_nothing() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        assert!(index.search(&records, "zmm01", None, 0).is_empty());
    }

    // ============================================================
    // STRICT PASS
    // ============================================================

    #[test]
    fn test_code_query_matches_both_records_in_index_order() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let results = index.search(&records, "ZMM01", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["1", "2"]);
    }

    #[test]
    fn test_two_token_query_narrows_to_single_record() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let results = index.search(&records, "заявка отмена", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["2"]);
    }

    #[test]
    fn test_unrelated_query_returns_nothing() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        assert!(index.search(&records, "zz", None, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_strict_pass_requires_every_token() {
        let records = vec![
            instruction("1", None, "Create purchase order", "ME21N"),
            instruction("2", None, "Change purchase order", "ME22N"),
            instruction("3", None, "Display purchase requisition", "ME53N"),
        ];
        let index = SearchIndex::build(&records);

        let results = index.search(&records, "purchase order", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["1", "2"]);
        for record in results {
            let text = normalize(&record.searchable_text());
            assert!(text.contains("purchase") && text.contains("order"));
        }
    }

    #[test]
    fn test_strict_pass_matches_substrings_not_whole_words() {
        let records = vec![instruction("1", None, "Goods receipt", "MIGO")];
        let index = SearchIndex::build(&records);

        assert_eq!(ids(&index.search(&records, "ceip", None, DEFAULT_LIMIT)), vec!["1"]);
    }

    #[test]
    fn test_strict_pass_does_not_reorder_by_relevance() {
        let records = vec![
            instruction("weak", None, "Invoice list", "VF05"),
            instruction("strong", None, "Invoice invoice invoice", "VF01"),
        ];
        let index = SearchIndex::build(&records);

        assert_eq!(
            ids(&index.search(&records, "invoice", None, DEFAULT_LIMIT)),
            vec!["weak", "strong"]
        );
    }

    #[test]
    fn test_scope_restricts_results() {
        let records = vec![
            instruction("1", Some("mm"), "Create material", "MM01"),
            instruction("2", Some("sd"), "Create sales order", "VA01"),
            instruction("3", None, "Create vendor", "XK01"),
        ];
        let index = SearchIndex::build(&records);

        assert_eq!(ids(&index.search(&records, "create", Some("sd"), 10)), vec!["2"]);
        assert_eq!(ids(&index.search(&records, "create", None, 10)), vec!["1", "2", "3"]);
        // Empty scope means no scoping.
        assert_eq!(ids(&index.search(&records, "create", Some(""), 10)), vec!["1", "2", "3"]);
        assert!(index.search(&records, "create", Some("fi"), 10).is_empty());
    }

    #[test]
    fn test_result_length_never_exceeds_limit() {
        let records: Vec<Instruction> = (0..30)
            .map(|i| instruction(&i.to_string(), None, "Report", &format!("ZR{:02}", i)))
            .collect();
        let index = SearchIndex::build(&records);

        for limit in [1, 5, 20, 50] {
            let results = index.search(&records, "report", None, limit);
            assert_eq!(results.len(), limit.min(30));
        }
        // Limit keeps the first records in index order.
        assert_eq!(ids(&index.search(&records, "report", None, 3)), vec!["0", "1", "2"]);
    }

    // ============================================================
    // FALLBACK SCORING
    // ============================================================

    #[test]
    fn test_pair_score_precedence() {
        assert_eq!(pair_score("ab", "ab"), 4);
        assert_eq!(pair_score("ab", "abc"), 2);
        assert_eq!(pair_score("ab", "xaby"), 1);
        assert_eq!(pair_score("ab", "ba"), 0);
    }

    #[test]
    fn test_score_tokens_sums_every_pair() {
        let query = tokenize("ab cd");
        let record = tokenize("ab abc xcd cd");

        // ab: 4 + 2 + 0 + 0, cd: 0 + 0 + 1 + 4
        assert_eq!(score_tokens(&query, &record), 11);
    }

    #[test]
    fn test_fallback_ranks_exact_over_prefix_and_drops_contains_only() {
        let records = vec![
            instruction("contains", None, "xaby", ""),
            instruction("prefix", None, "abc", ""),
            instruction("exact", None, "ab", ""),
        ];
        let index = SearchIndex::build(&records);

        // "qq" appears nowhere, so the strict pass is empty.
        let results = index.search(&records, "ab qq", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["exact", "prefix"]);
    }

    #[test]
    fn test_fallback_ties_keep_index_order() {
        let records = vec![
            instruction("first", None, "posting", ""),
            instruction("second", None, "postal", ""),
            instruction("third", None, "posting", ""),
        ];
        let index = SearchIndex::build(&records);

        // "posting" scores 4 on first/third; "post" prefix scores 2 each.
        let results = index.search(&records, "posting post xyz", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["first", "third", "second"]);
    }

    #[test]
    fn test_fallback_catches_inflected_forms() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        // "заявк" is a prefix of "заявки" in both, but "созд" only in record 1;
        // "удалить" matches nothing so the strict pass fails.
        let results = index.search(&records, "созд заявк удалить", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["1", "2"]);
    }

    #[test]
    fn test_fallback_scope_results_are_subset_of_unscoped() {
        let records = vec![
            instruction("1", Some("mm"), "material master", "MM01"),
            instruction("2", Some("sd"), "material pricing", "VK11"),
            instruction("3", Some("mm"), "materials list", "MM60"),
        ];
        let index = SearchIndex::build(&records);
        let query = "material nothing";

        let unscoped = ids(&index.search(&records, query, None, DEFAULT_LIMIT));
        let scoped = ids(&index.search(&records, query, Some("mm"), DEFAULT_LIMIT));

        assert!(!scoped.is_empty());
        assert!(scoped.iter().all(|id| unscoped.contains(id)));
        assert_eq!(scoped, vec!["1", "3"]);
    }

    #[test]
    fn test_fallback_respects_limit() {
        let records: Vec<Instruction> = (0..10)
            .map(|i| instruction(&i.to_string(), None, "delivery", ""))
            .collect();
        let index = SearchIndex::build(&records);

        assert_eq!(index.search(&records, "deliv zzz", None, 4).len(), 4);
    }

    // ============================================================
    // RESOLUTION
    // ============================================================

    #[test]
    fn test_results_are_the_live_records() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let results = index.search(&records, "отмена", None, DEFAULT_LIMIT);

        assert_eq!(results.len(), 1);
        assert!(std::ptr::eq(results[0], &records[1]));
        // Original casing and punctuation are untouched.
        assert_eq!(results[0].notes, "см. также ZMM01");
    }

    #[test]
    fn test_hits_missing_from_live_set_are_skipped() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let live = vec![records[1].clone()];
        let results = index.search(&live, "zmm01", None, DEFAULT_LIMIT);

        assert_eq!(ids(&results), vec!["2"]);
    }

    #[test]
    fn test_limit_applies_after_stale_hits_are_skipped() {
        let records = vec![
            instruction("gone", None, "alpha", ""),
            instruction("kept", None, "alpha", ""),
        ];
        let index = SearchIndex::build(&records);

        let live = vec![records[1].clone()];
        let results = index.search(&live, "alpha", None, 1);

        assert_eq!(ids(&results), vec!["kept"]);
    }

    #[test]
    fn test_all_stale_strict_hits_fall_through_to_scoring() {
        let records = vec![
            instruction("gone", None, "alpha beta", ""),
            instruction("kept", None, "alpha", ""),
        ];
        let index = SearchIndex::build(&records);

        // Only "gone" contains both tokens, and it is no longer live.
        let live = vec![records[1].clone()];
        let results = index.search(&live, "alpha beta", None, 1);

        assert_eq!(ids(&results), vec!["kept"]);
    }

    #[test]
    fn test_live_record_edits_are_visible_without_rebuild() {
        let mut records = zmm_catalog();
        let index = SearchIndex::build(&records);

        records[0].title = "Renamed".to_string();
        let results = index.search(&records, "создание", None, DEFAULT_LIMIT);

        // Matching uses the indexed text, the returned data is live.
        assert_eq!(results[0].title, "Renamed");
    }

    // ============================================================
    // ASSISTANT
    // ============================================================

    #[test]
    fn test_assistant_blank_message_has_no_reply() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        assert!(assistant::suggest(&index, &records, "   ").is_none());
    }

    #[test]
    fn test_assistant_returns_suggestions() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let reply = assistant::suggest(&index, &records, "ZMM01").unwrap();

        assert_eq!(reply.message, FOUND_MESSAGE);
        assert_eq!(reply.suggestions.len(), 2);
        assert_eq!(reply.suggestions[0].id, "1");
        assert_eq!(reply.suggestions[0].title, "Создание заявки");
        assert_eq!(reply.suggestions[0].transaction_code, "ZMM01");
    }

    #[test]
    fn test_assistant_caps_suggestions() {
        let records: Vec<Instruction> = (0..12)
            .map(|i| instruction(&i.to_string(), None, "Billing document", "VF01"))
            .collect();
        let index = SearchIndex::build(&records);

        let reply = assistant::suggest(&index, &records, "billing").unwrap();

        assert_eq!(reply.suggestions.len(), ASSISTANT_LIMIT);
    }

    #[test]
    fn test_assistant_no_match_message() {
        let records = zmm_catalog();
        let index = SearchIndex::build(&records);

        let reply = assistant::suggest(&index, &records, "zz").unwrap();

        assert_eq!(reply.message, NOT_FOUND_MESSAGE);
        assert!(reply.suggestions.is_empty());
    }
}
