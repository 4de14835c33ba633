use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use sqlx::types::Json as SqlJson;
use tracing::info;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::extract::extract_text;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

/// POST /api/v1/resumes
/// Multipart upload (`file` part). Re-uploading replaces the caller's
/// previous resume — one live resume per student.
pub async fn handle_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(format!("failed to read upload: {e}")))?;
        upload = Some((filename, content_type, data.to_vec()));
        break;
    }

    let (filename, content_type, data) =
        upload.ok_or_else(|| AppError::Upload("missing 'file' part".to_string()))?;

    let raw_text = extract_text(&filename, &content_type, &data)?;
    let parsed = parse_resume(&raw_text);
    info!(
        user_id = %auth.id,
        interests = parsed.research_interests.len(),
        publications = parsed.publications.len(),
        "Parsed uploaded resume"
    );

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, filename, content_type, raw_text, parsed)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE SET
            filename = EXCLUDED.filename,
            content_type = EXCLUDED.content_type,
            raw_text = EXCLUDED.raw_text,
            parsed = EXCLUDED.parsed,
            uploaded_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth.id)
    .bind(&filename)
    .bind(&content_type)
    .bind(&raw_text)
    .bind(SqlJson(&parsed))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes/me
pub async fn handle_my_resume(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeRow>, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?;
    row.map(Json)
        .ok_or_else(|| AppError::NotFound("No resume uploaded yet".to_string()))
}
