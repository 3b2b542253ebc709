//! Keyword-matched context extraction.
//!
//! A deliberate substring heuristic, not semantic retrieval: the message is
//! lower-cased and tested against three independent keyword sets, and each
//! match contributes one section assembled from the résumé. No ranking, no
//! scoring, no embeddings.

use crate::models::resume::ResumeFacts;

const SKILL_KEYWORDS: &[&str] = &["skill", "technolog"];
const PROJECT_KEYWORDS: &[&str] = &["project"];
const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work"];

/// Project descriptions are previewed, not quoted in full.
const PROJECT_PREVIEW_CHARS: usize = 100;

/// Assembles a short excerpt of résumé facts relevant to the message.
///
/// Sections are concatenated in fixed order (skills, projects, experience),
/// each prefixed with its label on its own line. Returns an empty string when
/// no keyword matches. Deterministic and side-effect free.
pub fn extract_relevant_context(resume: &ResumeFacts, message: &str) -> String {
    let lower = message.to_lowercase();
    let mut sections: Vec<String> = Vec::new();

    if contains_any(&lower, SKILL_KEYWORDS) {
        let mut block = String::from("Skills:");
        for group in &resume.skills {
            block.push('\n');
            block.push_str(&group.category);
            block.push_str(": ");
            block.push_str(&group.items.join(", "));
        }
        sections.push(block);
    }

    if contains_any(&lower, PROJECT_KEYWORDS) {
        let mut block = String::from("Projects:");
        for project in &resume.projects {
            block.push('\n');
            block.push_str(&format!(
                "{}: {}...",
                project.title,
                description_preview(&project.description)
            ));
        }
        sections.push(block);
    }

    if contains_any(&lower, EXPERIENCE_KEYWORDS) {
        let mut block = String::from("Experience:");
        for entry in &resume.experience {
            block.push('\n');
            block.push_str(&format!(
                "{} at {} ({})",
                entry.position, entry.company, entry.period
            ));
        }
        sections.push(block);
    }

    sections.join("\n")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First `PROJECT_PREVIEW_CHARS` characters of the description, cut on a
/// char boundary.
fn description_preview(description: &str) -> &str {
    match description.char_indices().nth(PROJECT_PREVIEW_CHARS) {
        Some((index, _)) => &description[..index],
        None => description,
    }
}
