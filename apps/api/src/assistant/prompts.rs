//! System-prompt composition.
//!
//! The base instructions interpolate every résumé section verbatim. They are
//! a pure function of `ResumeFacts`, composed once at startup and reused for
//! every request; the per-request relevance excerpt is appended separately by
//! the generator.

use crate::models::resume::ResumeFacts;

/// Delimiter inserted between the base instructions and the per-request
/// relevance excerpt.
pub const CONTEXT_SECTION_HEADER: &str = "\n\nRelevant Information for this query:\n";

/// Builds the fixed system instructions from the résumé data.
pub fn compose_system_prompt(resume: &ResumeFacts) -> String {
    let name = &resume.personal_info.name;
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(&format!(
        "You are a helpful AI assistant for {name}'s portfolio website.\n\
         Your purpose is to help visitors learn more about {name}, their skills, experience, and projects.\n\n\
         You have access to the following information about {name}:\n"
    ));

    prompt.push_str(&format!(
        "\n1. Personal Information:\n\
         - Name: {}\n\
         - Title: {}\n\
         - Email: {}\n\
         - Phone: {}\n",
        resume.personal_info.name,
        resume.personal_info.title,
        resume.personal_info.email,
        resume.personal_info.phone,
    ));

    prompt.push_str(&format!(
        "\n2. Education:\n\
         - Institution: {}\n\
         - Degree: {}\n\
         - Period: {}\n\
         - Location: {}\n\
         - GPA: {}\n",
        resume.education.institution,
        resume.education.degree,
        resume.education.period,
        resume.education.location,
        resume.education.gpa,
    ));

    prompt.push_str("\n3. Work Experience:\n");
    for entry in &resume.experience {
        prompt.push_str(&format!(
            "\n- Position: {}\n- Company: {}\n- Period: {}\n- Responsibilities:\n",
            entry.position, entry.company, entry.period
        ));
        for responsibility in &entry.responsibilities {
            prompt.push_str(&format!("  - {responsibility}\n"));
        }
    }

    prompt.push_str("\n4. Projects:\n");
    for project in &resume.projects {
        prompt.push_str(&format!(
            "\n- Title: {}\n- Description: {}\n- Technologies: {}\n",
            project.title,
            project.description,
            project.technologies.join(", ")
        ));
    }

    prompt.push_str("\n5. Technical Skills:\n");
    for group in &resume.skills {
        prompt.push_str(&format!("- {}: {}\n", group.category, group.items.join(", ")));
    }

    prompt.push_str("\n6. Achievements:\n");
    for achievement in &resume.achievements {
        prompt.push_str(&format!("- {achievement}\n"));
    }

    if !resume.interests.is_empty() {
        prompt.push_str(&format!("\n7. Interests: {}\n", resume.interests.join(", ")));
    }

    prompt.push_str(&format!(
        "\nWhen answering questions:\n\
         1. Be helpful, friendly, and conversational.\n\
         2. If you don't know something or if the information is not in the provided data, politely say so.\n\
         3. Provide specific examples from {name}'s experience where relevant.\n\
         4. Keep responses concise but informative.\n\
         5. Suggest relevant projects or experience when appropriate.\n\
         6. If asked about contacting {name}, provide the email: {email}.\n\n\
         Your main goal is to showcase {name}'s skills, experience, and projects in a professional manner.",
        name = name,
        email = resume.personal_info.email,
    ));

    prompt
}
