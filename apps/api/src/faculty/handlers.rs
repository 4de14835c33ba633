use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::faculty::search::{search_faculty, FacultySearchParams};
use crate::models::faculty::{Degree, FacultyRow, Publication};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FacultyPayload {
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub research_interests: Vec<String>,
    #[serde(default)]
    pub education: Vec<Degree>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub bio: String,
    #[serde(default = "default_accepting")]
    pub accepting_students: bool,
}

fn default_accepting() -> bool {
    true
}

fn validate_payload(payload: &FacultyPayload) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if payload.department.trim().is_empty() {
        return Err(AppError::Validation(
            "department must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/v1/faculty
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<FacultySearchParams>,
) -> Result<Json<Vec<FacultyRow>>, AppError> {
    let rows = search_faculty(&state.db, &params).await?;
    Ok(Json(rows))
}

/// GET /api/v1/faculty/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FacultyRow>, AppError> {
    fetch_faculty(&state, id).await.map(Json)
}

pub async fn fetch_faculty(state: &AppState, id: Uuid) -> Result<FacultyRow, AppError> {
    let row: Option<FacultyRow> = sqlx::query_as("SELECT * FROM faculty WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Faculty {id} not found")))
}

/// POST /api/v1/faculty — admin only.
pub async fn handle_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<FacultyPayload>,
) -> Result<(StatusCode, Json<FacultyRow>), AppError> {
    auth.require_admin()?;
    validate_payload(&payload)?;

    let row: FacultyRow = sqlx::query_as(
        r#"
        INSERT INTO faculty
            (id, name, department, title, research_interests, education,
             publications, bio, accepting_students)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.name.trim())
    .bind(payload.department.trim())
    .bind(&payload.title)
    .bind(&payload.research_interests)
    .bind(SqlJson(&payload.education))
    .bind(SqlJson(&payload.publications))
    .bind(&payload.bio)
    .bind(payload.accepting_students)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/faculty/:id — admin only, full replacement.
pub async fn handle_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FacultyPayload>,
) -> Result<Json<FacultyRow>, AppError> {
    auth.require_admin()?;
    validate_payload(&payload)?;

    let row: Option<FacultyRow> = sqlx::query_as(
        r#"
        UPDATE faculty SET
            name = $1,
            department = $2,
            title = $3,
            research_interests = $4,
            education = $5,
            publications = $6,
            bio = $7,
            accepting_students = $8,
            updated_at = now()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.department.trim())
    .bind(&payload.title)
    .bind(&payload.research_interests)
    .bind(SqlJson(&payload.education))
    .bind(SqlJson(&payload.publications))
    .bind(&payload.bio)
    .bind(payload.accepting_students)
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Faculty {id} not found")))
}

/// DELETE /api/v1/faculty/:id — admin only.
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let result = sqlx::query("DELETE FROM faculty WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Faculty {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, department: &str) -> FacultyPayload {
        FacultyPayload {
            name: name.to_string(),
            department: department.to_string(),
            title: String::new(),
            research_interests: vec![],
            education: vec![],
            publications: vec![],
            bio: String::new(),
            accepting_students: true,
        }
    }

    #[test]
    fn test_payload_with_name_and_department_is_valid() {
        assert!(validate_payload(&payload("Dr. Ada Chen", "Computer Science")).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(validate_payload(&payload("  ", "Computer Science")).is_err());
    }

    #[test]
    fn test_blank_department_rejected() {
        assert!(validate_payload(&payload("Dr. Ada Chen", "")).is_err());
    }

    #[test]
    fn test_accepting_students_defaults_true() {
        let payload: FacultyPayload =
            serde_json::from_str(r#"{"name": "Dr. X", "department": "Physics"}"#).unwrap();
        assert!(payload.accepting_students);
        assert!(payload.research_interests.is_empty());
    }
}
