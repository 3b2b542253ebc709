//! Structured résumé data backing the assistant.
//!
//! Loaded once at startup from the bundled JSON document and never mutated
//! afterwards; every component reads it through a shared `Arc`.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

const BUNDLED_RESUME: &str = include_str!("../../data/resume.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFacts {
    pub personal_info: PersonalInfo,
    pub education: Education,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    /// Skill categories in authored order (order is part of the prompt output).
    pub skills: Vec<SkillCategory>,
    pub achievements: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub period: String,
    pub location: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub period: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

impl ResumeFacts {
    /// Parses the résumé document bundled into the binary.
    /// The data is authored, so a parse failure is a build defect.
    pub fn bundled() -> Result<Arc<Self>> {
        let facts: ResumeFacts =
            serde_json::from_str(BUNDLED_RESUME).context("bundled resume data is malformed")?;
        Ok(Arc::new(facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_resume_parses() {
        let facts = ResumeFacts::bundled().unwrap();
        assert!(!facts.personal_info.name.is_empty());
        assert!(!facts.experience.is_empty());
        assert!(!facts.projects.is_empty());
        assert!(!facts.skills.is_empty());
    }

    #[test]
    fn test_skill_categories_are_nonempty() {
        let facts = ResumeFacts::bundled().unwrap();
        for group in &facts.skills {
            assert!(!group.category.is_empty());
            assert!(!group.items.is_empty(), "empty skill list for {}", group.category);
        }
    }
}
