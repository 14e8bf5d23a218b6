//! Wire model for one analysed candidate, as returned by the analysis service.
//!
//! Every field except `filename` is optional. Defaults are applied once, when a batch
//! is stored (see `results::normalize`), never by individual views.

use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use serde_json::Value;

use crate::models::lenient::{self, element_as_text};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    #[serde(rename = "matchScore", default, deserialize_with = "lenient::number")]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub strength_level: Option<String>,
    #[serde(rename = "comparison", default, deserialize_with = "lenient::text")]
    pub comparison_note: Option<String>,
    #[serde(default, deserialize_with = "skills")]
    pub skills: Option<SkillMap>,
    #[serde(rename = "keyHighlights", default, deserialize_with = "lenient::strings")]
    pub key_highlights: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub experience: Option<Experience>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub projects: Option<Vec<ProjectEntry>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub certifications: Option<Vec<CertificationEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_years: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CertificationEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Skill categories in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillMap(Vec<SkillCategory>);

impl SkillMap {
    #[cfg(test)]
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        Self(categories)
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[SkillCategory] {
        &self.0
    }

    pub fn into_categories(self) -> Vec<SkillCategory> {
        self.0
    }
}

impl<'de> Deserialize<'de> for SkillMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SkillMapVisitor;

        impl<'de> Visitor<'de> for SkillMapVisitor {
            type Value = SkillMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill category to skill names")
            }

            fn visit_map<A>(self, mut map: A) -> Result<SkillMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories: Vec<SkillCategory> = Vec::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    let skills: Vec<String> = match value {
                        Value::Array(items) => items.into_iter().filter_map(element_as_text).collect(),
                        other => element_as_text(other).into_iter().collect(),
                    };
                    // A repeated key keeps its first position and its last value.
                    match categories.iter_mut().find(|c| c.name == name) {
                        Some(existing) => existing.skills = skills,
                        None => categories.push(SkillCategory { name, skills }),
                    }
                }
                Ok(SkillMap(categories))
            }
        }

        deserializer.deserialize_map(SkillMapVisitor)
    }
}

/// Ordered skill map; any non-object value decodes as absent.
fn skills<'de, D>(deserializer: D) -> Result<Option<SkillMap>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Map(SkillMap),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Map(map)) => Some(map),
        Some(Raw::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_result_deserializes() {
        let json = r#"{
            "filename": "jane_doe.pdf",
            "matchScore": 82,
            "rank": 1,
            "strength_level": "Strong",
            "comparison": "Top of batch",
            "skills": {
                "programming": ["Rust", "Go"],
                "cloud": ["AWS"]
            },
            "keyHighlights": ["Led platform team", "Shipped v2"],
            "recommendations": ["Interview"],
            "contact_info": {"email": "jane@example.com", "phone": "555-0100"},
            "education": [{"degree": "BSc Computer Science", "year": 2015}],
            "experience": {"total_years": 7},
            "projects": [{"description": "Distributed cache"}],
            "certifications": [{"name": "CKA", "year": "2021"}]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.filename, "jane_doe.pdf");
        assert_eq!(result.match_score, Some(82.0));
        assert_eq!(result.rank, Some(1));
        assert_eq!(result.comparison_note.as_deref(), Some("Top of batch"));
        let contact = result.contact_info.unwrap();
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
        assert!(contact.linkedin.is_none());
        assert_eq!(result.education.unwrap()[0].year.as_deref(), Some("2015"));
        assert_eq!(result.experience.unwrap().total_years, Some(7.0));
        assert_eq!(result.certifications.unwrap()[0].name.as_deref(), Some("CKA"));
    }

    #[test]
    fn test_minimal_result_only_needs_filename() {
        let result: AnalysisResult = serde_json::from_str(r#"{"filename": "a.pdf"}"#).unwrap();
        assert!(result.match_score.is_none());
        assert!(result.skills.is_none());
        assert!(result.education.is_none());
    }

    #[test]
    fn test_missing_filename_is_rejected() {
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"matchScore": 50}"#).is_err());
    }

    #[test]
    fn test_skill_categories_keep_response_order() {
        // Deliberately not alphabetical.
        let json = r#"{"filename": "a.pdf", "skills": {
            "zeta": ["z1"], "alpha": ["a1", "a2"], "mid": ["m1"]
        }}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = result
            .skills
            .as_ref()
            .unwrap()
            .categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_malformed_nested_fields_are_absent() {
        let json = r#"{
            "filename": "a.pdf",
            "skills": ["not", "a", "map"],
            "contact_info": "jane@example.com",
            "education": {"degree": "BSc"},
            "experience": "seven years",
            "projects": [{"description": "ok"}, 42]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.skills.is_none());
        assert!(result.contact_info.is_none());
        assert!(result.education.is_none());
        assert!(result.experience.is_none());
        assert_eq!(result.projects.unwrap().len(), 1);
    }

    #[test]
    fn test_repeated_skill_category_keeps_first_position() {
        let json = r#"{"a": ["x"], "b": ["y"], "a": ["z"]}"#;
        let map: SkillMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.categories().len(), 2);
        assert_eq!(map.categories()[0].name, "a");
        assert_eq!(map.categories()[0].skills, vec!["z".to_string()]);
    }
}
