use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A degree held by a faculty member (or listed on a resume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year: Option<i32>,
}

/// A publication on a faculty profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub venue: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FacultyRow {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub title: String,
    pub research_interests: Vec<String>,
    pub education: Json<Vec<Degree>>,
    pub publications: Json<Vec<Publication>>,
    pub bio: String,
    pub accepting_students: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
