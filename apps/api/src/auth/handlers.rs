use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::issue_token;
use crate::auth::middleware::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{Role, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// POST /api/v1/auth/token
/// The only credentialed entry point; exempt from bearer auth.
pub async fn handle_issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(
        user.id,
        &user.email,
        user.role(),
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: state.config.token_ttl_minutes * 60,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// POST /api/v1/auth/register
/// Self-service signup, always as a student. Admin accounts come from seeding.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    validate_registration(&req)?;

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "An account for {} already exists",
            req.email
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.full_name)
    .bind(Role::Student.as_str())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/auth/me
pub async fn handle_me(auth: AuthUser) -> Json<AuthUser> {
    Json(auth)
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if !req.email.contains('@') {
        return Err(AppError::Validation("email must be an address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if req.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name must not be empty".to_string()));
    }
    Ok(())
}
