use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters that additionally split a word into pieces.
const SPLIT_CHARS: [char; 3] = ['-', '_', '.'];

fn word_pattern() -> &'static Regex {
    static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();
    WORD_PATTERN.get_or_init(|| Regex::new(r"[\w']+").expect("word pattern is valid"))
}

/// Fold a word for comparison: upper-case unless matching is case-sensitive.
pub fn fold_word(word: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        word.to_string()
    } else {
        word.to_uppercase()
    }
}

/// Turn raw search terms into the requirement word list.
///
/// Each term may hold several words ("basic search java"); the result is a
/// flat, deduplicated list of folded words in first-seen order. Words are not
/// expanded here. `None` stays `None` so callers can tell "no requirement"
/// apart from an empty one.
pub fn prepare_words_from_terms(terms: Option<&[String]>, case_sensitive: bool) -> Option<Vec<String>> {
    let terms = terms?;
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for term in terms {
        let folded = fold_word(term, case_sensitive);
        for m in word_pattern().find_iter(&folded) {
            let word = m.as_str();
            if seen.insert(word.to_string()) {
                words.push(word.to_string());
            }
        }
    }

    Some(words)
}

/// Extract the expanded word set of `text`.
///
/// Every `[\w']+` run is inserted as a whole, then (optionally) split at
/// camel-case boundaries, then split on `-`, `_` and `.`. All pieces are folded.
pub fn extract_words(text: &str, case_sensitive: bool, case_word_split: bool) -> HashSet<String> {
    let mut result = HashSet::new();

    for m in word_pattern().find_iter(text) {
        let word = m.as_str();
        result.insert(fold_word(word, case_sensitive));

        if case_word_split {
            for piece in split_case(word) {
                result.insert(fold_word(piece, case_sensitive));
            }
        }

        for piece in word.split(SPLIT_CHARS).filter(|p| !p.is_empty()) {
            result.insert(fold_word(piece, case_sensitive));
        }
    }

    result
}

/// Split before every upper-case letter: "volutpatVel" -> ["volutpat", "Vel"].
fn split_case(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, ch) in word.char_indices() {
        if idx > start && ch.is_uppercase() {
            pieces.push(&word[start..idx]);
            start = idx;
        }
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }

    pieces
}

/// True if every (already folded) word occurs in the expanded word set of `text`.
pub fn matches_all_words(text: &str, words: &[String], case_sensitive: bool, case_word_split: bool) -> bool {
    if words.is_empty() {
        return true;
    }
    let text_words = extract_words(text, case_sensitive, case_word_split);
    words.iter().all(|w| text_words.contains(w))
}

/// Words from `words` that do not occur in `text`, in their original order.
pub fn strip_matching_words(
    words: &[String],
    text: &str,
    case_sensitive: bool,
    case_word_split: bool,
) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }
    let text_words = extract_words(text, case_sensitive, case_word_split);
    words
        .iter()
        .filter(|w| !text_words.contains(*w))
        .cloned()
        .collect()
}
