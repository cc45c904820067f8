use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;

use crate::analysis::pipeline::run_analysis;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisSummary, HistoryEntry};
use crate::state::AppState;

/// Maximum number of entries returned by the history endpoint.
const HISTORY_LIMIT: i64 = 50;

/// POST /api/v1/analyses
///
/// Multipart form: `resume` file field (PDF or DOCX) plus an optional
/// `job_description` text field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisSummary>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                upload = Some((filename, data));
            }
            "job_description" => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file selected".to_string()))?;

    let summary = run_analysis(&state, &filename, &data, &job_description).await?;
    Ok(Json(summary))
}

/// GET /api/v1/analyses/history
///
/// Up to the 50 most recent analyses, newest first.
pub async fn handle_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = state
        .store
        .recent(HISTORY_LIMIT)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(entries))
}
