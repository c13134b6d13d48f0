//! Improvement hints for a draft
//!
//! The first four rules look at the form fields themselves, not at the
//! draft. Only the job-title rule inspects the draft text. Scoring checks
//! the draft for all five, so a field can be filled in yet still cost
//! points without producing a hint.

use crate::processing::fields::DraftFields;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "job_title", rename_all = "snake_case")]
pub enum Suggestion {
    AddContact,
    AddSummary,
    AddSkills,
    AddExperience,
    MentionJobTitle(String),
}

/// Marker every hint is printed with.
pub const HINT_PREFIX: &str = "⚡ ";

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HINT_PREFIX)?;
        match self {
            Suggestion::AddContact => write!(f, "Add contact information."),
            Suggestion::AddSummary => write!(f, "Add a professional summary."),
            Suggestion::AddSkills => write!(f, "Include a skills section with relevant keywords."),
            Suggestion::AddExperience => write!(f, "List work experience in bullet format."),
            Suggestion::MentionJobTitle(title) => {
                write!(f, "Mention your job title ({}) inside the resume text.", title)
            }
        }
    }
}

pub fn suggest(draft: &str, fields: &DraftFields) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if fields.contact.is_empty() {
        suggestions.push(Suggestion::AddContact);
    }
    if fields.summary.is_empty() {
        suggestions.push(Suggestion::AddSummary);
    }
    if fields.skills.is_empty() {
        suggestions.push(Suggestion::AddSkills);
    }
    if fields.experience.is_empty() {
        suggestions.push(Suggestion::AddExperience);
    }
    if !draft.contains(fields.job_title.as_str()) {
        suggestions.push(Suggestion::MentionJobTitle(fields.job_title.clone()));
    }

    suggestions
}
