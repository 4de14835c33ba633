//! Compatibility scoring — pluggable, trait-based scorer measuring a parsed
//! student resume against a faculty profile.
//!
//! Default: `KeywordScorer` (pure-Rust, fast, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn CompatibilityScorer>`, so a semantic backend
//! can be swapped in without touching the endpoints.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::faculty::FacultyRow;
use crate::models::resume::ParsedResume;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// One scored dimension with the terms that matched on both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: String,
    pub weight: f32,
    pub score: f32, // 0.0 – 1.0
    pub matched_terms: Vec<String>,
}

/// Full compatibility report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub faculty_id: Uuid,
    pub faculty_name: String,
    pub department: String,
    pub accepting_students: bool,
    pub overall_score: u32, // 0 – 100
    pub dimensions: Vec<DimensionScore>,
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CompatibilityScorer: Send + Sync {
    async fn score(
        &self,
        resume: &ParsedResume,
        faculty: &FacultyRow,
    ) -> Result<MatchReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-overlap scorer. Weighted dimensions:
/// research interests 0.5, publications 0.2, skills-vs-interests 0.2,
/// education affinity 0.1. Dimensions the faculty profile cannot support
/// (no listed publications, say) are dropped and the weights renormalized.
/// A professor not accepting students halves the overall score.
pub struct KeywordScorer;

#[async_trait]
impl CompatibilityScorer for KeywordScorer {
    async fn score(
        &self,
        resume: &ParsedResume,
        faculty: &FacultyRow,
    ) -> Result<MatchReport, AppError> {
        Ok(compute_keyword_match(resume, faculty))
    }
}

const WEIGHT_INTERESTS: f32 = 0.5;
const WEIGHT_PUBLICATIONS: f32 = 0.2;
const WEIGHT_SKILLS: f32 = 0.2;
const WEIGHT_EDUCATION: f32 = 0.1;

pub fn compute_keyword_match(resume: &ParsedResume, faculty: &FacultyRow) -> MatchReport {
    let faculty_interest_terms = tokenize_all(&faculty.research_interests);
    let faculty_publication_terms = tokenize_all(
        &faculty
            .publications
            .0
            .iter()
            .map(|p| p.title.clone())
            .collect::<Vec<_>>(),
    );

    let resume_interest_terms = tokenize_all(&resume.research_interests);
    let resume_publication_terms = tokenize_all(&resume.publications);
    let resume_skill_terms = tokenize_all(&resume.skills);

    let mut dimensions = Vec::new();

    if !faculty_interest_terms.is_empty() {
        let (score, matched) = coverage(&resume_interest_terms, &faculty_interest_terms);
        dimensions.push(DimensionScore {
            dimension: "research_interests".to_string(),
            weight: WEIGHT_INTERESTS,
            score,
            matched_terms: matched,
        });
    }

    if !faculty_publication_terms.is_empty() {
        let (score, matched) = coverage(&resume_publication_terms, &faculty_publication_terms);
        dimensions.push(DimensionScore {
            dimension: "publications".to_string(),
            weight: WEIGHT_PUBLICATIONS,
            score,
            matched_terms: matched,
        });
    }

    if !faculty_interest_terms.is_empty() {
        let (score, matched) = coverage(&resume_skill_terms, &faculty_interest_terms);
        dimensions.push(DimensionScore {
            dimension: "skills".to_string(),
            weight: WEIGHT_SKILLS,
            score,
            matched_terms: matched,
        });
    }

    {
        let (score, matched) = education_affinity(resume, faculty);
        dimensions.push(DimensionScore {
            dimension: "education".to_string(),
            weight: WEIGHT_EDUCATION,
            score,
            matched_terms: matched,
        });
    }

    let total_weight: f32 = dimensions.iter().map(|d| d.weight).sum();
    let weighted: f32 = dimensions.iter().map(|d| d.weight * d.score).sum();
    let mut overall = if total_weight > 0.0 {
        (weighted / total_weight * 100.0).round() as u32
    } else {
        0
    };
    if !faculty.accepting_students {
        overall /= 2;
    }
    let overall_score = overall.min(100);

    let recommendation = build_recommendation(overall_score, faculty, &dimensions);

    MatchReport {
        faculty_id: faculty.id,
        faculty_name: faculty.name.clone(),
        department: faculty.department.clone(),
        accepting_students: faculty.accepting_students,
        overall_score,
        dimensions,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// Fraction of the faculty-side vocabulary the resume covers, with the
/// matched terms (sorted for deterministic output).
fn coverage(resume_terms: &BTreeSet<String>, faculty_terms: &BTreeSet<String>) -> (f32, Vec<String>) {
    if faculty_terms.is_empty() {
        return (0.0, vec![]);
    }
    let matched: Vec<String> = faculty_terms
        .intersection(resume_terms)
        .cloned()
        .collect();
    let score = matched.len() as f32 / faculty_terms.len() as f32;
    (score.clamp(0.0, 1.0), matched)
}

/// Degree-based affinity: a resume degree in the professor's department (or a
/// field sharing vocabulary with it) scores 1.0; any graduate degree 0.5; any
/// degree at all 0.2; no parsed education 0.0.
fn education_affinity(resume: &ParsedResume, faculty: &FacultyRow) -> (f32, Vec<String>) {
    if resume.education.is_empty() {
        return (0.0, vec![]);
    }

    let department_terms = tokenize(&faculty.department);
    let field_terms = tokenize_all(
        &resume
            .education
            .iter()
            .map(|d| d.field.clone())
            .collect::<Vec<_>>(),
    );
    let matched: Vec<String> = department_terms
        .intersection(&field_terms)
        .cloned()
        .collect();
    if !matched.is_empty() {
        return (1.0, matched);
    }

    let has_graduate_degree = resume
        .education
        .iter()
        .any(|d| matches!(d.degree.as_str(), "PhD" | "MS" | "MA"));
    if has_graduate_degree {
        (0.5, vec![])
    } else {
        (0.2, vec![])
    }
}

const STOPWORDS: &[&str] = &[
    "and", "the", "for", "with", "via", "from", "into", "using", "toward", "towards", "of",
    "in", "on", "a", "an", "to",
];

/// Lowercased alphanumeric tokens, at least three characters, stopwords out.
fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3 && !STOPWORDS.contains(t))
        .map(String::from)
        .collect()
}

fn tokenize_all(texts: &[String]) -> BTreeSet<String> {
    texts.iter().flat_map(|t| tokenize(t)).collect()
}

/// Builds a human-readable recommendation from the score and weakest dimensions.
fn build_recommendation(score: u32, faculty: &FacultyRow, dimensions: &[DimensionScore]) -> String {
    let mut weakest: Vec<&DimensionScore> =
        dimensions.iter().filter(|d| d.score < 0.4).collect();
    weakest.sort_by(|a, b| a.score.total_cmp(&b.score));
    let weak_names: Vec<&str> = weakest.iter().take(2).map(|d| d.dimension.as_str()).collect();

    let mut text = if score >= 80 {
        format!(
            "Strong match with {}: your background lines up with their research profile.",
            faculty.name
        )
    } else if score >= 60 {
        format!(
            "Moderate match ({score}/100) with {}. Weakest areas: {}.",
            faculty.name,
            weak_names.join(", ")
        )
    } else {
        format!(
            "Low match ({score}/100) with {}. Little overlap in: {}.",
            faculty.name,
            weak_names.join(", ")
        )
    };
    if !faculty.accepting_students {
        text.push_str(" Note: this professor is not currently accepting students.");
    }
    text
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
