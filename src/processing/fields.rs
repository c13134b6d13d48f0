//! Draft fields entered by the user

use crate::error::{Result, ResumeBuilderError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Job categories offered by the form. The tag itself is free text.
pub const JOB_CATEGORIES: [&str; 8] = [
    "Logistics",
    "Operations",
    "Sales",
    "Customer Service",
    "Engineering",
    "Healthcare",
    "Marketing",
    "Management",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Template {
    #[default]
    Modern,
    Corporate,
    Creative,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Modern => write!(f, "Modern"),
            Template::Corporate => write!(f, "Corporate"),
            Template::Creative => write!(f, "Creative"),
        }
    }
}

impl FromStr for Template {
    type Err = ResumeBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(Template::Modern),
            "corporate" => Ok(Template::Corporate),
            "creative" => Ok(Template::Creative),
            other => Err(ResumeBuilderError::InvalidInput(format!(
                "Unknown template: {}. Supported: Modern, Corporate, Creative",
                other
            ))),
        }
    }
}

/// Everything the user types into the form. No validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftFields {
    pub contact: String,
    pub job_title: String,
    pub job_type: String,
    pub job_description: String,
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub template: Template,
}

/// Addressable form field, used by session transitions and the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Contact,
    JobTitle,
    JobType,
    JobDescription,
    Summary,
    Skills,
    Experience,
    Template,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        FieldName::Contact,
        FieldName::JobTitle,
        FieldName::JobType,
        FieldName::JobDescription,
        FieldName::Summary,
        FieldName::Skills,
        FieldName::Experience,
        FieldName::Template,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Contact => "Contact Information",
            FieldName::JobTitle => "Job Title",
            FieldName::JobType => "Job Type",
            FieldName::JobDescription => "Job Description",
            FieldName::Summary => "Professional Summary",
            FieldName::Skills => "Skills",
            FieldName::Experience => "Experience",
            FieldName::Template => "Template",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldName {
    type Err = ResumeBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "contact" | "contact_info" => Ok(FieldName::Contact),
            "title" | "job_title" => Ok(FieldName::JobTitle),
            "type" | "job_type" | "category" | "tag" => Ok(FieldName::JobType),
            "description" | "job_description" | "jd" => Ok(FieldName::JobDescription),
            "summary" => Ok(FieldName::Summary),
            "skills" => Ok(FieldName::Skills),
            "experience" => Ok(FieldName::Experience),
            "template" => Ok(FieldName::Template),
            other => Err(ResumeBuilderError::InvalidInput(format!(
                "Unknown field: {}. Supported: contact, title, type, description, summary, skills, experience, template",
                other
            ))),
        }
    }
}

impl DraftFields {
    /// Returns the text value of a field. The template is rendered by name.
    pub fn get(&self, field: FieldName) -> String {
        match field {
            FieldName::Contact => self.contact.clone(),
            FieldName::JobTitle => self.job_title.clone(),
            FieldName::JobType => self.job_type.clone(),
            FieldName::JobDescription => self.job_description.clone(),
            FieldName::Summary => self.summary.clone(),
            FieldName::Skills => self.skills.clone(),
            FieldName::Experience => self.experience.clone(),
            FieldName::Template => self.template.to_string(),
        }
    }

    /// Sets a field. Only the template can be rejected, for an unknown name.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match field {
            FieldName::Contact => self.contact = value,
            FieldName::JobTitle => self.job_title = value,
            FieldName::JobType => self.job_type = value,
            FieldName::JobDescription => self.job_description = value,
            FieldName::Summary => self.summary = value,
            FieldName::Skills => self.skills = value,
            FieldName::Experience => self.experience = value,
            FieldName::Template => self.template = value.parse()?,
        }
        Ok(())
    }

    pub fn is_known_category(&self) -> bool {
        JOB_CATEGORIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(self.job_type.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_aliases() {
        assert_eq!("title".parse::<FieldName>().unwrap(), FieldName::JobTitle);
        assert_eq!("job-type".parse::<FieldName>().unwrap(), FieldName::JobType);
        assert_eq!("JD".parse::<FieldName>().unwrap(), FieldName::JobDescription);
        assert!("salary".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_set_and_get_roundtrip_per_field() {
        let mut fields = DraftFields::default();
        fields.set(FieldName::Skills, "Excel, SQL").unwrap();
        fields.set(FieldName::Template, "corporate").unwrap();

        assert_eq!(fields.get(FieldName::Skills), "Excel, SQL");
        assert_eq!(fields.template, Template::Corporate);
        assert_eq!(fields.get(FieldName::Template), "Corporate");
    }

    #[test]
    fn test_unknown_template_leaves_field_untouched() {
        let mut fields = DraftFields::default();
        assert!(fields.set(FieldName::Template, "Gothic").is_err());
        assert_eq!(fields.template, Template::Modern);
    }

    #[test]
    fn test_known_category_is_case_insensitive() {
        let fields = DraftFields {
            job_type: "customer service".to_string(),
            ..Default::default()
        };
        assert!(fields.is_known_category());

        let fields = DraftFields {
            job_type: "Astronautics".to_string(),
            ..Default::default()
        };
        assert!(!fields.is_known_category());
    }

    #[test]
    fn test_deserialize_partial_fields() {
        let fields: DraftFields =
            serde_json::from_str(r#"{"job_title": "Store Manager", "template": "Creative"}"#).unwrap();
        assert_eq!(fields.job_title, "Store Manager");
        assert_eq!(fields.template, Template::Creative);
        assert!(fields.contact.is_empty());
    }
}
