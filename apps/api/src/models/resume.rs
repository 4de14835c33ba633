use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::faculty::Degree;

/// Structured output of the resume parser. Stored as jsonb alongside the
/// extracted raw text and consumed by the compatibility scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    pub research_interests: Vec<String>,
    pub education: Vec<Degree>,
    pub publications: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub raw_text: String,
    pub parsed: Json<ParsedResume>,
    pub uploaded_at: DateTime<Utc>,
}
