//! Two-document TF-IDF vectorization with cosine similarity.
//!
//! The corpus is always exactly {resume, job description}, so document
//! frequency is 1 or 2 and the smoothed IDF is `ln((1+2)/(1+df)) + 1`.
//! Vocabulary is capped at the 1000 highest-frequency terms, ties broken
//! lexicographically so the result is deterministic for fixed inputs.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Vocabulary cap over the two-document corpus.
pub const MAX_FEATURES: usize = 1000;

/// Minimum token length. Single characters carry no signal here.
const MIN_TOKEN_LEN: usize = 2;

const STOP_WORD_LIST: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
    "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORD_LIST.iter().copied().collect());

/// Splits normalized text into scoring tokens: whitespace-separated words of
/// at least two characters, stop words removed.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .filter(|t| !STOP_WORDS.contains(t))
        .collect()
}

fn term_counts<'a>(tokens: &[&'a str]) -> HashMap<&'a str, f64> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(*token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Picks the vocabulary: the union of both documents' terms, truncated to the
/// `MAX_FEATURES` highest by total corpus frequency.
fn select_vocabulary<'a>(
    tf_a: &HashMap<&'a str, f64>,
    tf_b: &HashMap<&'a str, f64>,
) -> Vec<&'a str> {
    let mut totals: HashMap<&'a str, f64> = HashMap::new();
    for (term, count) in tf_a.iter().chain(tf_b.iter()) {
        *totals.entry(*term).or_insert(0.0) += *count;
    }

    let mut terms: Vec<(&str, f64)> = totals.into_iter().collect();
    terms.sort_by(|(ta, ca), (tb, cb)| cb.total_cmp(ca).then(ta.cmp(tb)));
    terms.truncate(MAX_FEATURES);
    terms.into_iter().map(|(term, _)| term).collect()
}

/// Cosine similarity of the TF-IDF vectors of two normalized texts.
/// Returns `None` when either document vectorizes to nothing, which callers
/// treat as a 0.0 score.
pub fn cosine_similarity(doc_a: &str, doc_b: &str) -> Option<f64> {
    let tokens_a = tokenize(doc_a);
    let tokens_b = tokenize(doc_b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return None;
    }

    let tf_a = term_counts(&tokens_a);
    let tf_b = term_counts(&tokens_b);
    let vocabulary = select_vocabulary(&tf_a, &tf_b);

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for term in vocabulary {
        let in_a = tf_a.contains_key(term);
        let in_b = tf_b.contains_key(term);
        let df = (in_a as u32 + in_b as u32) as f64;
        let idf = ((1.0 + 2.0) / (1.0 + df)).ln() + 1.0;

        let weight_a = tf_a.get(term).copied().unwrap_or(0.0) * idf;
        let weight_b = tf_b.get(term).copied().unwrap_or(0.0) * idf;

        dot += weight_a * weight_b;
        norm_a += weight_a * weight_a;
        norm_b += weight_b * weight_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("the quick brown fox is a python engineer");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "python", "engineer"]);
    }

    #[test]
    fn test_identical_documents_have_similarity_one() {
        let doc = "python django postgres docker kubernetes";
        let sim = cosine_similarity(doc, doc).unwrap();
        assert!((sim - 1.0).abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_disjoint_documents_have_similarity_zero() {
        let sim = cosine_similarity("python django flask", "gardening compost seedlings").unwrap();
        assert!(sim.abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_empty_after_filtering_returns_none() {
        assert!(cosine_similarity("the of and", "python django").is_none());
        assert!(cosine_similarity("", "python").is_none());
    }

    #[test]
    fn test_partial_overlap_lies_strictly_between() {
        let sim = cosine_similarity("python docker aws", "python gardening compost").unwrap();
        assert!(sim > 0.0 && sim < 1.0, "similarity was {sim}");
    }

    #[test]
    fn test_vocabulary_is_capped_and_deterministic() {
        let doc_a: String = (0..800).map(|i| format!("alpha{i:04} ")).collect();
        let doc_b: String = (0..800).map(|i| format!("beta{i:04} ")).collect();

        let tf_a = term_counts(&tokenize(&doc_a));
        let tf_b = term_counts(&tokenize(&doc_b));
        let vocab = select_vocabulary(&tf_a, &tf_b);
        assert_eq!(vocab.len(), MAX_FEATURES);

        let again = select_vocabulary(&tf_a, &tf_b);
        assert_eq!(vocab, again);

        // Equal frequencies everywhere, so the lexicographic tiebreak keeps
        // every alpha term ahead of any beta term.
        assert!(vocab.iter().filter(|t| t.starts_with("alpha")).count() == 800);
    }

    #[test]
    fn test_repeated_terms_weigh_more_than_single_occurrences() {
        let sim_repeated = cosine_similarity(
            "python python python rust",
            "python python python gardening",
        )
        .unwrap();
        let sim_single = cosine_similarity("python rust", "python gardening").unwrap();
        assert!(sim_repeated > sim_single);
    }
}
