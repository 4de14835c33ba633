//! Resume parser — splits extracted text into sections and pulls out the
//! structured fields the compatibility scorer consumes.
//!
//! Heuristic by design: resumes are free-form, so the parser looks for short
//! header lines (Education, Publications, Research Interests, Skills) and
//! interprets the lines beneath each one. Unrecognized content is ignored.

use std::collections::BTreeSet;

use crate::models::faculty::Degree;
use crate::models::resume::ParsedResume;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Education,
    Publications,
    Interests,
    Skills,
    /// A recognized header we do not extract from (experience, references...).
    /// Still ends the previous section.
    Other,
}

/// A header line is short, not a sentence, and names a known section.
fn detect_section(line: &str) -> Option<Section> {
    let trimmed = line.trim().trim_end_matches(':');
    if trimmed.is_empty() || trimmed.len() > 48 || trimmed.ends_with('.') {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.contains("education") {
        Some(Section::Education)
    } else if lower.contains("publication") {
        Some(Section::Publications)
    } else if lower.contains("interest") {
        Some(Section::Interests)
    } else if lower.contains("skill") {
        Some(Section::Skills)
    } else if lower.contains("experience")
        || lower.contains("employment")
        || lower.contains("reference")
        || lower.contains("award")
    {
        Some(Section::Other)
    } else {
        None
    }
}

pub fn parse_resume(text: &str) -> ParsedResume {
    let mut current: Option<Section> = None;
    let mut education_lines = Vec::new();
    let mut publication_lines = Vec::new();
    let mut interest_lines = Vec::new();
    let mut skill_lines = Vec::new();

    for line in text.lines() {
        if let Some(section) = detect_section(line) {
            current = Some(section);
            continue;
        }
        let content = strip_bullet(line);
        if content.is_empty() {
            continue;
        }
        match current {
            Some(Section::Education) => education_lines.push(content),
            Some(Section::Publications) => publication_lines.push(content),
            Some(Section::Interests) => interest_lines.push(content),
            Some(Section::Skills) => skill_lines.push(content),
            _ => {}
        }
    }

    ParsedResume {
        research_interests: split_terms(&interest_lines),
        education: education_lines.iter().filter_map(|l| parse_degree(l)).collect(),
        publications: publication_lines,
        skills: split_terms(&skill_lines),
    }
}

fn strip_bullet(line: &str) -> String {
    line.trim()
        .trim_start_matches(['-', '*', '•', '·'])
        .trim()
        .to_string()
}

/// Comma/semicolon-separated term lists, lowercased and deduplicated across
/// all lines. First occurrence wins, so document order is preserved.
fn split_terms(lines: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    lines
        .iter()
        .flat_map(|l| l.split([',', ';', '|']))
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

const DEGREE_FORMS: &[(&str, &str)] = &[
    ("ph.d", "PhD"),
    ("phd", "PhD"),
    ("doctor of philosophy", "PhD"),
    ("m.s", "MS"),
    ("master of science", "MS"),
    ("m.a", "MA"),
    ("master of arts", "MA"),
    ("b.s", "BS"),
    ("bachelor of science", "BS"),
    ("b.a", "BA"),
    ("bachelor of arts", "BA"),
    ("master", "MS"),
    ("bachelor", "BS"),
];

/// Extracts a degree from one education line, e.g.
/// "M.S. in Computer Science, State University, 2023".
fn parse_degree(line: &str) -> Option<Degree> {
    let lower = line.to_lowercase();
    let degree = DEGREE_FORMS
        .iter()
        .find(|(form, _)| lower.contains(form))
        .map(|(_, canonical)| canonical.to_string())?;

    let field = lower
        .split_once(" in ")
        .map(|(_, rest)| {
            rest.split([',', ';'])
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .filter(|f| !f.is_empty())
        .unwrap_or_default();

    let institution = line
        .split([',', ';'])
        .map(str::trim)
        .find(|seg| {
            let s = seg.to_lowercase();
            s.contains("university") || s.contains("college") || s.contains("institute")
        })
        .unwrap_or("")
        .to_string();

    Some(Degree {
        degree,
        field,
        institution,
        year: find_year(line),
    })
}

/// First plausible 4-digit year (1900–2099) in the line.
fn find_year(line: &str) -> Option<i32> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start == 4 {
                if let Ok(year) = line[start..i].parse::<i32>() {
                    if (1900..2100).contains(&year) {
                        return Some(year);
                    }
                }
            }
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
Jordan Rivera
jordan.rivera@university.edu

Education
- M.S. in Computer Science, State University, 2023
- B.S. in Mathematics, City College, 2021

Research Interests
machine learning, distributed systems; natural language processing

Publications
- Rivera J. et al. Sharded Training of Large Models. SysML 2023.
- Rivera J. A Survey of Consensus Protocols. 2022.

Skills
Rust, Python, Kubernetes

Experience
Research assistant, Systems Lab, 2021-2023
"#;

    #[test]
    fn test_sections_are_detected() {
        assert_eq!(detect_section("Education"), Some(Section::Education));
        assert_eq!(detect_section("EDUCATION:"), Some(Section::Education));
        assert_eq!(detect_section("Research Interests"), Some(Section::Interests));
        assert_eq!(detect_section("Selected Publications"), Some(Section::Publications));
        assert_eq!(detect_section("Technical Skills"), Some(Section::Skills));
    }

    #[test]
    fn test_prose_mentioning_a_header_word_is_not_a_header() {
        let sentence = "I completed my education at a small school before moving on to research.";
        assert_eq!(detect_section(sentence), None);
    }

    #[test]
    fn test_fixture_interests_extracted() {
        let parsed = parse_resume(FIXTURE);
        assert_eq!(
            parsed.research_interests,
            vec![
                "machine learning",
                "distributed systems",
                "natural language processing"
            ]
        );
    }

    #[test]
    fn test_fixture_degrees_extracted() {
        let parsed = parse_resume(FIXTURE);
        assert_eq!(parsed.education.len(), 2);
        assert_eq!(parsed.education[0].degree, "MS");
        assert_eq!(parsed.education[0].field, "computer science");
        assert_eq!(parsed.education[0].institution, "State University");
        assert_eq!(parsed.education[0].year, Some(2023));
        assert_eq!(parsed.education[1].degree, "BS");
    }

    #[test]
    fn test_fixture_publications_extracted() {
        let parsed = parse_resume(FIXTURE);
        assert_eq!(parsed.publications.len(), 2);
        assert!(parsed.publications[0].contains("Sharded Training"));
    }

    #[test]
    fn test_fixture_skills_extracted() {
        let parsed = parse_resume(FIXTURE);
        assert_eq!(parsed.skills, vec!["rust", "python", "kubernetes"]);
    }

    #[test]
    fn test_experience_section_is_ignored() {
        let parsed = parse_resume(FIXTURE);
        let all = format!(
            "{:?}{:?}",
            parsed.skills, parsed.research_interests
        );
        assert!(!all.contains("Systems Lab"));
    }

    #[test]
    fn test_terms_deduplicated_across_lines() {
        let lines = vec![
            "machine learning, robotics".to_string(),
            "robotics; machine learning".to_string(),
        ];
        assert_eq!(split_terms(&lines), vec!["machine learning", "robotics"]);
    }

    #[test]
    fn test_unstructured_text_parses_to_empty() {
        let parsed = parse_resume("Just a paragraph about myself with no headers at all.");
        assert!(parsed.research_interests.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.publications.is_empty());
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn test_phd_variants_normalize() {
        for line in [
            "Ph.D. in Biology, Some University, 2019",
            "PhD in Biology, Some University, 2019",
            "Doctor of Philosophy in Biology, Some University, 2019",
        ] {
            let degree = parse_degree(line).unwrap();
            assert_eq!(degree.degree, "PhD");
            assert_eq!(degree.field, "biology");
        }
    }

    #[test]
    fn test_line_without_degree_is_skipped() {
        assert!(parse_degree("Graduated with honors, 2020").is_none());
    }

    #[test]
    fn test_find_year_ignores_non_year_numbers() {
        assert_eq!(find_year("Room 12345, built 2021"), Some(2021));
        assert_eq!(find_year("no year here"), None);
    }
}
