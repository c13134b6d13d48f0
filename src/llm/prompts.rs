//! Resume generation prompt

use crate::processing::fields::DraftFields;
use log::debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub resume_generation: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            resume_generation: RESUME_GENERATION_TEMPLATE.to_string(),
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("Invalid placeholder regex"))
}

impl PromptTemplates {
    /// Fill the template from the form.
    ///
    /// Substitution is a single pass over the template, so braces typed
    /// into a field are emitted as-is. Unknown placeholders are left alone.
    pub fn render_resume_prompt(&self, fields: &DraftFields) -> String {
        let template = fields.template.to_string();

        let prompt = placeholder_regex()
            .replace_all(&self.resume_generation, |caps: &Captures| {
                match &caps[1] {
                    "template" => template.clone(),
                    "job_title" => fields.job_title.clone(),
                    "job_type" => fields.job_type.clone(),
                    "contact" => fields.contact.clone(),
                    "summary" => fields.summary.clone(),
                    "skills" => fields.skills.clone(),
                    "experience" => fields.experience.clone(),
                    "job_description" => fields.job_description.clone(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();

        debug!("Rendered generation prompt ({} chars)", prompt.len());
        prompt
    }
}

const RESUME_GENERATION_TEMPLATE: &str = "Create a {template} style resume for a {job_title} ({job_type} field).
Contact Information: {contact}
Professional Summary: {summary}
Skills: {skills}
Experience: {experience}
Target Job Description: {job_description}
Make the resume ATS-optimized, clean format, keyword-rich, professional.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::fields::Template;

    fn sample_fields() -> DraftFields {
        DraftFields {
            contact: "jane@example.com, 555-0100".to_string(),
            job_title: "Logistics Manager".to_string(),
            job_type: "Logistics".to_string(),
            job_description: "Run a regional warehouse network.".to_string(),
            summary: "Ten years in supply chain.".to_string(),
            skills: "WMS, forecasting".to_string(),
            experience: "Acme Freight 2015-2025".to_string(),
            template: Template::Corporate,
        }
    }

    #[test]
    fn test_render_full_prompt() {
        let prompt = PromptTemplates::default().render_resume_prompt(&sample_fields());

        let expected = "Create a Corporate style resume for a Logistics Manager (Logistics field).
Contact Information: jane@example.com, 555-0100
Professional Summary: Ten years in supply chain.
Skills: WMS, forecasting
Experience: Acme Freight 2015-2025
Target Job Description: Run a regional warehouse network.
Make the resume ATS-optimized, clean format, keyword-rich, professional.";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_empty_fields_render_blank() {
        let prompt = PromptTemplates::default().render_resume_prompt(&DraftFields::default());
        assert!(prompt.starts_with("Create a Modern style resume for a  ( field)."));
        assert!(prompt.contains("Skills: \n"));
    }

    #[test]
    fn test_braces_in_values_are_not_substituted() {
        let mut fields = sample_fields();
        fields.skills = "{summary} and {unknown}".to_string();

        let prompt = PromptTemplates::default().render_resume_prompt(&fields);
        assert!(prompt.contains("Skills: {summary} and {unknown}"));
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let templates = PromptTemplates {
            resume_generation: "{job_title} / {salary}".to_string(),
        };
        assert_eq!(
            templates.render_resume_prompt(&sample_fields()),
            "Logistics Manager / {salary}"
        );
    }
}
