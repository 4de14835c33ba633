use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::faculty::handlers::fetch_faculty;
use crate::matching::scoring::MatchReport;
use crate::models::resume::{ParsedResume, ResumeRow};
use crate::state::AppState;

async fn caller_resume(state: &AppState, auth: &AuthUser) -> Result<ParsedResume, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?;
    row.map(|r| r.parsed.0)
        .ok_or_else(|| AppError::NotFound("Upload a resume before requesting matches".to_string()))
}

/// GET /api/v1/match/faculty/:id
/// Scores the caller's parsed resume against one faculty profile.
pub async fn handle_match_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchReport>, AppError> {
    let resume = caller_resume(&state, &auth).await?;
    let faculty = fetch_faculty(&state, id).await?;
    let report = state.scorer.score(&resume, &faculty).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct MatchAllParams {
    pub limit: Option<usize>,
}

const DEFAULT_MATCH_LIMIT: usize = 10;

/// GET /api/v1/match
/// Scores against every faculty profile and returns the best matches,
/// highest score first.
pub async fn handle_match_all(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MatchAllParams>,
) -> Result<Json<Vec<MatchReport>>, AppError> {
    let resume = caller_resume(&state, &auth).await?;
    let limit = params.limit.unwrap_or(DEFAULT_MATCH_LIMIT).clamp(1, 100);

    let faculty: Vec<crate::models::faculty::FacultyRow> =
        sqlx::query_as("SELECT * FROM faculty ORDER BY name")
            .fetch_all(&state.db)
            .await?;

    let mut reports = Vec::with_capacity(faculty.len());
    for profile in &faculty {
        reports.push(state.scorer.score(&resume, profile).await?);
    }
    reports.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
    reports.truncate(limit);

    Ok(Json(reports))
}
