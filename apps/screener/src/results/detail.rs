//! Full detail view of one selected result, plus the 5-axis profile fed to the chart.

use crate::results::normalize::{
    lines_or_placeholder, or_placeholder, with_year, CandidateRecord, ResultId, PLACEHOLDER,
};
use crate::results::summary::SEPARATOR;

pub const AXIS_OVERALL: &str = "Overall Match";
pub const AXIS_TECHNICAL: &str = "Technical Skills";
pub const AXIS_EXPERIENCE: &str = "Experience";
pub const AXIS_PROJECTS: &str = "Projects";
pub const AXIS_EDUCATION: &str = "Education";

const AXIS_MAX: f64 = 100.0;
const POINTS_PER_SKILL: f64 = 10.0;
const POINTS_PER_YEAR: f64 = 20.0;
const POINTS_PER_PROJECT: f64 = 25.0;
const POINTS_PER_DEGREE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileAxis {
    pub label: &'static str,
    pub value: f64,
}

/// Five labeled values in 0–100, in fixed order. The chart consumes nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub axes: [ProfileAxis; 5],
}

impl Profile {
    pub fn from_record(record: &CandidateRecord) -> Self {
        let axis = |label: &'static str, value: f64| ProfileAxis {
            label,
            value: value.clamp(0.0, AXIS_MAX),
        };
        Self {
            axes: [
                axis(AXIS_OVERALL, record.match_score),
                axis(AXIS_TECHNICAL, record.skill_count() as f64 * POINTS_PER_SKILL),
                axis(
                    AXIS_EXPERIENCE,
                    record.total_years.unwrap_or(0.0) * POINTS_PER_YEAR,
                ),
                axis(AXIS_PROJECTS, record.projects.len() as f64 * POINTS_PER_PROJECT),
                axis(AXIS_EDUCATION, record.education.len() as f64 * POINTS_PER_DEGREE),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: ResultId,
    pub filename: String,
    pub headline: String,
    pub contact: String,
    pub education: Vec<String>,
    pub experience: String,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub highlights: Vec<String>,
    pub recommendations: Vec<String>,
    pub profile: Profile,
}

pub fn compose(record: &CandidateRecord) -> DetailView {
    let rank = record.rank.map(|r| r.to_string());
    let headline = [
        format!("{}%", record.match_score),
        or_placeholder(record.strength_level.as_deref()).to_string(),
        format!("Rank #{}", or_placeholder(rank.as_deref())),
    ]
    .join(SEPARATOR);

    let contact = [
        record.contact.email.as_deref(),
        record.contact.phone.as_deref(),
        record.contact.linkedin.as_deref(),
    ]
    .into_iter()
    .map(or_placeholder)
    .collect::<Vec<_>>()
    .join(SEPARATOR);

    let experience = match record.total_years {
        Some(years) => format!("Total years: {years}"),
        None => format!("Total years: {PLACEHOLDER}"),
    };

    DetailView {
        id: record.id,
        filename: record.filename.clone(),
        headline,
        contact,
        education: lines_or_placeholder(
            record
                .education
                .iter()
                .map(|e| with_year(e.degree.as_deref(), e.year.as_deref()))
                .collect(),
        ),
        experience,
        skills: lines_or_placeholder(record.flattened_skills().map(str::to_string).collect()),
        projects: lines_or_placeholder(
            record
                .projects
                .iter()
                .map(|p| or_placeholder(p.description.as_deref()).to_string())
                .collect(),
        ),
        certifications: lines_or_placeholder(
            record
                .certifications
                .iter()
                .map(|c| with_year(c.name.as_deref(), c.year.as_deref()))
                .collect(),
        ),
        highlights: lines_or_placeholder(record.key_highlights.clone()),
        recommendations: lines_or_placeholder(record.recommendations.clone()),
        profile: Profile::from_record(record),
    }
}
