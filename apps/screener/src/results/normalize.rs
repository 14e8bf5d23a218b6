//! One-step default substitution for analysis results.
//!
//! Every view reads `CandidateRecord`, never the raw wire record, so the defaults
//! (score 0, empty sequences, `"—"` for absent scalars) live here and nowhere else.

use std::fmt;

use uuid::Uuid;

use crate::models::{
    AnalysisResult, CertificationEntry, ContactInfo, EducationEntry, ProjectEntry, SkillCategory,
};

/// Rendered in place of an absent scalar or an empty collection.
pub const PLACEHOLDER: &str = "—";

/// Stable identifier of a stored result, assigned when its batch is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(Uuid);

impl ResultId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ResultId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An analysis result with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub id: ResultId,
    pub filename: String,
    pub match_score: f64,
    pub rank: Option<u32>,
    pub strength_level: Option<String>,
    pub comparison_note: Option<String>,
    pub skills: Vec<SkillCategory>,
    pub key_highlights: Vec<String>,
    pub recommendations: Vec<String>,
    pub contact: ContactInfo,
    pub education: Vec<EducationEntry>,
    pub total_years: Option<f64>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
}

impl CandidateRecord {
    pub fn from_result(result: AnalysisResult) -> Self {
        Self {
            id: ResultId::new(),
            filename: result.filename,
            match_score: result.match_score.unwrap_or(0.0),
            rank: result.rank,
            strength_level: result.strength_level,
            comparison_note: result.comparison_note,
            skills: result
                .skills
                .map(|s| s.into_categories())
                .unwrap_or_default(),
            key_highlights: result.key_highlights.unwrap_or_default(),
            recommendations: result.recommendations.unwrap_or_default(),
            contact: result.contact_info.unwrap_or_default(),
            education: result.education.unwrap_or_default(),
            total_years: result.experience.and_then(|e| e.total_years),
            projects: result.projects.unwrap_or_default(),
            certifications: result.certifications.unwrap_or_default(),
        }
    }

    /// All skills, categories in response order.
    pub fn flattened_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
    }

    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|c| c.skills.len()).sum()
    }
}

/// `value` or the placeholder.
pub fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

/// Renders a list, or a single placeholder line when there is nothing to show.
pub fn lines_or_placeholder(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        lines
    }
}

/// `name (year)` when a year is known.
pub fn with_year(name: Option<&str>, year: Option<&str>) -> String {
    let name = or_placeholder(name);
    match year {
        Some(year) => format!("{name} ({year})"),
        None => name.to_string(),
    }
}
