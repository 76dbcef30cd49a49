use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("static pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Lowercases `text`, turns every character that is not a letter, digit or
/// whitespace into a space, collapses whitespace runs and trims the ends.
///
/// Works on any script: `"Создание-заявки (ZMM01)"` becomes
/// `"создание заявки zmm01"`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&spaced, " ").trim().to_string()
}

/// Splits already-normalized text into tokens. Duplicates are kept.
pub fn split_tokens(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn tokenize(text: &str) -> Vec<String> {
    split_tokens(&normalize(text))
}
