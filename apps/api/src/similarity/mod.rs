//! Similarity Scorer — resume vs job description, 0–100.
//!
//! Both texts are normalized, vectorized with TF-IDF over the two-document
//! corpus, and compared by cosine similarity. Scoring never raises outward:
//! a degenerate vectorization (all stop words, no shared vocabulary mass)
//! falls back to 0.0.

pub mod tfidf;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalizes text for comparison: lowercase, strip punctuation to spaces,
/// collapse whitespace runs.
pub fn preprocess(text: &str) -> String {
    let text = text.to_lowercase();
    let text = NON_WORD.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Scores how closely a resume matches a job description, as a percentage.
/// Empty or whitespace-only input on either side short-circuits to 0.0.
pub fn score(resume_text: &str, job_description: &str) -> f64 {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return 0.0;
    }

    let resume = preprocess(resume_text);
    let jd = preprocess(job_description);

    match tfidf::cosine_similarity(&resume, &jd) {
        Some(similarity) => (similarity * 100.0).min(100.0),
        None => 0.0,
    }
}
