//! Faculty directory search: free-text keyword plus structured filters,
//! paged and ordered by name.

use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::faculty::FacultyRow;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct FacultySearchParams {
    /// Keyword matched against name, department, bio and research interests.
    pub q: Option<String>,
    /// Exact department, case-insensitive.
    pub department: Option<String>,
    /// Single research interest, substring match.
    pub interest: Option<String>,
    pub accepting_students: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub fn clamp_paging(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

pub async fn search_faculty(
    pool: &PgPool,
    params: &FacultySearchParams,
) -> Result<Vec<FacultyRow>, AppError> {
    let (limit, offset) = clamp_paging(params.limit, params.offset);
    let q_pattern = params
        .q
        .as_deref()
        .map(|q| format!("%{}%", q.trim()))
        .filter(|p| p != "%%");
    let interest_pattern = params
        .interest
        .as_deref()
        .map(|i| format!("%{}%", i.trim()))
        .filter(|p| p != "%%");

    let rows: Vec<FacultyRow> = sqlx::query_as(
        r#"
        SELECT * FROM faculty
        WHERE ($1::text IS NULL
               OR name ILIKE $1
               OR department ILIKE $1
               OR bio ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(research_interests) AS i WHERE i ILIKE $1))
          AND ($2::text IS NULL OR department ILIKE $2)
          AND ($3::text IS NULL
               OR EXISTS (SELECT 1 FROM unnest(research_interests) AS i WHERE i ILIKE $3))
          AND ($4::boolean IS NULL OR accepting_students = $4)
        ORDER BY name
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(q_pattern)
    .bind(params.department.as_deref().map(str::trim))
    .bind(interest_pattern)
    .bind(params.accepting_students)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paging() {
        assert_eq!(clamp_paging(None, None), (20, 0));
    }

    #[test]
    fn test_limit_capped_at_100() {
        assert_eq!(clamp_paging(Some(5000), None), (100, 0));
    }

    #[test]
    fn test_nonpositive_limit_raised_to_one() {
        assert_eq!(clamp_paging(Some(0), None), (1, 0));
        assert_eq!(clamp_paging(Some(-3), None), (1, 0));
    }

    #[test]
    fn test_negative_offset_floored() {
        assert_eq!(clamp_paging(None, Some(-10)), (20, 0));
    }
}
