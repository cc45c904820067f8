use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One completed analysis, as produced by the pipeline. Immutable once built;
/// written to the result store exactly once per successful request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    /// Sorted, title-cased, deduplicated under case-insensitive comparison.
    pub skills: Vec<String>,
    /// Always within [0, 100].
    pub match_percentage: f64,
    /// Empty string when no job description was supplied.
    pub job_description: String,
    pub analysis_date: DateTime<Utc>,
}

/// A persisted analysis read back from storage. `skills` is the comma-joined
/// text column verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub skills: String,
    pub job_description: String,
    pub match_percentage: f64,
    pub analysis_date: DateTime<Utc>,
}

/// Summary returned to the caller after a successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub skills: Vec<String>,
    /// Rounded to two decimal places for presentation.
    pub match_percentage: f64,
    /// Skills the job description asks for that the resume lacks. Empty when
    /// no job description was supplied.
    pub missing_skills: Vec<String>,
    /// First 500 characters of the extracted text, with a truncation marker.
    pub resume_text_preview: String,
    /// The sanitized filename the upload was stored under.
    pub filename: String,
}
