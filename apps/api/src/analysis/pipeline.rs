//! Analysis Orchestrator — the per-request pipeline.
//!
//! A linear sequence of fallible steps with explicit early exit: validate →
//! store the upload → extract text → extract skills → score → persist →
//! housekeeping → summary. No state survives between requests. A failed
//! request persists nothing.

use std::path::Path;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::analysis::housekeeping::{cleanup_stale_uploads, STALE_AFTER};
use crate::config::allowed_file;
use crate::errors::AppError;
use crate::extract;
use crate::models::analysis::{AnalysisResult, AnalysisSummary};
use crate::similarity;
use crate::skills::extractor::{extract_skills, missing_skills};
use crate::state::AppState;

/// Extracted-text preview length in the returned summary.
const PREVIEW_CHARS: usize = 500;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("filename pattern is valid"));

pub async fn run_analysis(
    state: &AppState,
    original_filename: &str,
    data: &[u8],
    job_description: &str,
) -> Result<AnalysisSummary, AppError> {
    // 1. Validate before any side effects.
    if original_filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if !allowed_file(original_filename) {
        return Err(AppError::Validation(
            "Please upload a PDF or DOCX file only".to_string(),
        ));
    }
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    // 2. Store the upload under a sanitized name.
    let filename = sanitize_filename(original_filename);
    if filename.is_empty() {
        return Err(AppError::Validation("Invalid filename".to_string()));
    }
    let path = state.config.upload_dir.join(&filename);
    tokio::fs::write(&path, data).await.map_err(|e| {
        warn!("Could not store upload {}: {e}", path.display());
        AppError::Processing(format!("Could not store upload {filename}"))
    })?;
    info!("File uploaded: {filename}");

    // 3. Extract text; an unreadable or empty document ends the request here.
    let resume_text = extract::extract_text(&path, &extension)?;
    if resume_text.trim().is_empty() {
        warn!("No text extracted from: {filename}");
        return Err(AppError::EmptyDocument);
    }

    // 4. Skills.
    let tagger = state.tagger.as_deref();
    let skills = extract_skills(&resume_text, tagger);
    info!("Extracted {} skills from resume", skills.len());

    // 5. Similarity, only when a job description was supplied.
    let match_percentage = if job_description.trim().is_empty() {
        0.0
    } else {
        let pct = similarity::score(&resume_text, job_description);
        info!("Match percentage calculated: {pct:.2}%");
        pct
    };
    let missing = missing_skills(&skills, job_description, tagger);

    // 6. Persist exactly one row per successful request.
    let result = AnalysisResult {
        filename: filename.clone(),
        skills: skills.clone(),
        match_percentage,
        job_description: job_description.to_string(),
        analysis_date: Utc::now(),
    };
    state.store.append(&result).await.map_err(|e| {
        warn!("Failed to persist analysis for {filename}: {e:?}");
        AppError::Processing("Could not record the analysis result".to_string())
    })?;

    // 7. Housekeeping, detached from the response.
    let upload_dir = state.config.upload_dir.clone();
    tokio::task::spawn_blocking(move || cleanup_stale_uploads(&upload_dir, STALE_AFTER));

    // 8. Summary.
    Ok(AnalysisSummary {
        skills,
        match_percentage: round2(match_percentage),
        missing_skills: missing,
        resume_text_preview: preview(&resume_text),
        filename,
    })
}

/// Strips path components and replaces unsafe characters so the stored name
/// is a plain file in the working directory.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::db::memory_pool;
    use crate::extract::test_fixtures::docx_bytes;
    use crate::skills::tagger::{EntityTagger, HeuristicTagger};
    use crate::store::{ResultStore, SqliteResultStore};

    async fn test_state(tagger: Option<Arc<dyn EntityTagger>>) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: dir.path().to_path_buf(),
            max_upload_bytes: 16 * 1024 * 1024,
            entity_tagger: "off".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let state = AppState {
            store: Arc::new(SqliteResultStore::new(memory_pool().await)),
            tagger,
            config,
        };
        (state, dir)
    }

    #[tokio::test]
    async fn test_docx_without_jd_extracts_skills_and_scores_zero() {
        let (state, _dir) = test_state(None).await;
        let data = docx_bytes(&["Experienced in Python, AWS, and Docker."]);

        let summary = run_analysis(&state, "resume.docx", &data, "").await.unwrap();

        assert_eq!(summary.skills, vec!["Aws", "Docker", "Python"]);
        assert_eq!(summary.match_percentage, 0.0);
        assert!(summary.missing_skills.is_empty());
        assert_eq!(summary.filename, "resume.docx");

        let entries = state.store.recent(10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "resume.docx");
    }

    #[tokio::test]
    async fn test_heuristic_tagger_does_not_disturb_baseline_skills() {
        let (state, _dir) = test_state(Some(Arc::new(HeuristicTagger))).await;
        let data = docx_bytes(&["Experienced in Python, AWS, and Docker."]);

        let summary = run_analysis(&state, "resume.docx", &data, "").await.unwrap();
        assert_eq!(summary.skills, vec!["Aws", "Docker", "Python"]);
    }

    #[tokio::test]
    async fn test_empty_document_fails_and_persists_nothing() {
        let (state, _dir) = test_state(None).await;
        let data = docx_bytes(&["", "   "]);

        let err = run_analysis(&state, "scan.docx", &data, "").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyDocument));
        assert!(state.store.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disallowed_extension_fails_before_any_side_effect() {
        let (state, dir) = test_state(None).await;

        let err = run_analysis(&state, "resume.txt", b"plain text", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(state.store.recent(10).await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_filename_is_a_validation_error() {
        let (state, _dir) = test_state(None).await;
        let err = run_analysis(&state, "  ", b"bytes", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_identical_requests_produce_identical_scores() {
        let (state, _dir) = test_state(None).await;
        let data = docx_bytes(&["Python engineer with Django and PostgreSQL experience."]);
        let jd = "Seeking a Python engineer familiar with Django.";

        let first = run_analysis(&state, "resume.docx", &data, jd).await.unwrap();
        let second = run_analysis(&state, "resume.docx", &data, jd).await.unwrap();

        assert!((first.match_percentage - second.match_percentage).abs() < 1e-9);
        assert!(first.match_percentage > 0.0);
        assert_eq!(state.store.recent(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_skills_surface_in_summary() {
        let (state, _dir) = test_state(None).await;
        let data = docx_bytes(&["Seasoned Python developer."]);
        let jd = "Must know Python, Kubernetes and Docker.";

        let summary = run_analysis(&state, "resume.docx", &data, jd).await.unwrap();
        assert_eq!(summary.missing_skills, vec!["Docker", "Kubernetes"]);
    }

    #[tokio::test]
    async fn test_long_documents_are_previewed_with_marker() {
        let (state, _dir) = test_state(None).await;
        let long_line = "word ".repeat(200);
        let data = docx_bytes(&[&long_line]);

        let summary = run_analysis(&state, "resume.docx", &data, "").await.unwrap();
        assert!(summary.resume_text_preview.ends_with("..."));
        assert_eq!(summary.resume_text_preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[tokio::test]
    async fn test_short_documents_are_previewed_verbatim() {
        let (state, _dir) = test_state(None).await;
        let data = docx_bytes(&["Short resume."]);

        let summary = run_analysis(&state, "resume.docx", &data, "").await.unwrap();
        assert_eq!(summary.resume_text_preview, "Short resume.");
    }

    #[tokio::test]
    async fn test_path_components_are_stripped_from_stored_filename() {
        let (state, dir) = test_state(None).await;
        let data = docx_bytes(&["Python here."]);

        let summary = run_analysis(&state, "../../tmp/evil resume.docx", &data, "")
            .await
            .unwrap();
        assert_eq!(summary.filename, "evil_resume.docx");
        assert!(dir.path().join("evil_resume.docx").exists());
    }

    #[test]
    fn test_sanitize_filename_edge_cases() {
        assert_eq!(sanitize_filename("resume.docx"), "resume.docx");
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume_final_.pdf");
        assert_eq!(sanitize_filename("..\\..\\share\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }
}
