//! Rendering of ATS reports and library listings

use crate::config::OutputFormat;
use crate::error::{Result, ResumeBuilderError};
use crate::library::LibraryEntry;
use crate::processing::analyzer::ATSReport;
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_report(&self, report: &ATSReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const BAR_WIDTH: usize = 20;

fn score_color(score: u8) -> Color {
    match score {
        80..=100 => Color::Green,
        40..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// `[##########..........]` style progress bar for a 0-100 score.
    fn score_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * BAR_WIDTH) / 100;
        let bar = format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
        self.colorize(&bar, score_color(score))
    }

    pub fn format_library(&self, entries: &[&LibraryEntry], search_tag: &str) -> String {
        let mut output = String::new();
        output.push_str(&self.bold("📚 Resume Library"));
        if !search_tag.is_empty() {
            output.push_str(&format!(" (tag contains \"{}\")", search_tag));
        }
        output.push('\n');

        if entries.is_empty() {
            output.push_str("  (no saved resumes)\n");
            return output;
        }

        for (i, entry) in entries.iter().enumerate() {
            output.push_str(&format!(
                "  #{} {} {}\n",
                i + 1,
                self.colorize(&entry.id.short(), Color::BrightBlack),
                self.bold(&entry.title)
            ));
            output.push_str(&format!("     Field: {}\n", entry.tag));
            output.push_str(&format!("     Saved: {}\n", entry.timestamp));
            output.push_str(&format!(
                "     ATS Score: {}\n",
                self.colorize(&format!("{}%", entry.score), score_color(entry.score))
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ATSReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.bold(&format!("ATS Optimization Score: {}%", report.total())));
        output.push('\n');
        output.push_str(&self.score_bar(report.total()));
        output.push_str("\n\n");

        for hit in &report.score.breakdown {
            let mark = if hit.matched {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("✗", Color::Red)
            };
            output.push_str(&format!("  {} {}\n", mark, hit.field));
        }

        if !report.suggestions.is_empty() {
            output.push('\n');
            for suggestion in &report.suggestions {
                output.push_str(&self.colorize(&suggestion.to_string(), Color::Red));
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ATSReport) -> Result<String> {
        let to_error = |e: serde_json::Error| ResumeBuilderError::OutputFormatting(format!("JSON serialization failed: {}", e));

        // Each suggestion carries its printed message next to its kind
        let mut value = serde_json::to_value(report).map_err(to_error)?;
        if let Some(items) = value.get_mut("suggestions").and_then(serde_json::Value::as_array_mut) {
            for (item, suggestion) in items.iter_mut().zip(&report.suggestions) {
                if let Some(object) = item.as_object_mut() {
                    object.insert("message".to_string(), suggestion.to_string().into());
                }
            }
        }

        let json = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        json.map_err(to_error)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ATSReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# ATS Check\n\n");
        if !report.job_title.is_empty() {
            output.push_str(&format!("**Target role:** {}\n\n", report.job_title));
        }
        output.push_str(&format!("**Score:** {}%\n\n", report.total()));

        output.push_str("| Field | Found in draft |\n");
        output.push_str("|-------|----------------|\n");
        for hit in &report.score.breakdown {
            output.push_str(&format!(
                "| {} | {} |\n",
                hit.field,
                if hit.matched { "yes" } else { "no" }
            ));
        }

        output.push_str("\n## Suggestions\n\n");
        if report.suggestions.is_empty() {
            output.push_str("None, the draft covers every section.\n");
        } else {
            for suggestion in &report.suggestions {
                output.push_str(&format!("- {}\n", suggestion));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &ATSReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::fields::DraftFields;

    fn partial_report() -> ATSReport {
        let fields = DraftFields {
            contact: "a@b.com".to_string(),
            job_title: "Store Manager".to_string(),
            skills: "Excel".to_string(),
            ..Default::default()
        };
        AnalysisEngine::default().check("Contact: a@b.com", &fields)
    }

    #[test]
    fn test_console_report_plain() {
        let output = ConsoleFormatter::new(false).format_report(&partial_report()).unwrap();

        // contact, summary and experience (empty) match; skills and title do not
        assert!(output.contains("ATS Optimization Score: 60%"));
        assert!(output.contains("[############........]"));
        assert!(output.contains("✗ Job Title"));
        assert!(output.contains("⚡ Mention your job title (Store Manager) inside the resume text."));
    }

    #[test]
    fn test_json_report_parses() {
        let output = JsonFormatter::new(true).format_report(&partial_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["score"]["total"], 60);
        assert_eq!(value["policy"], "verbatim");
        assert_eq!(value["suggestions"][0]["kind"], "add_summary");
        assert_eq!(value["suggestions"][0]["message"], "⚡ Add a professional summary.");
    }

    #[test]
    fn test_markdown_report() {
        let output = MarkdownFormatter.format_report(&partial_report()).unwrap();
        assert!(output.starts_with("# ATS Check"));
        assert!(output.contains("| Skills | no |"));
        assert!(output.contains("- ⚡ Add a professional summary."));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false);
        let report = partial_report();
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, &format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_library_listing() {
        let mut library = Library::new();
        let fields = DraftFields {
            job_title: "Nurse".to_string(),
            job_type: "Healthcare".to_string(),
            ..Default::default()
        };
        library.save(&fields, "draft", 40);

        let formatter = ConsoleFormatter::new(false);
        let listing = formatter.format_library(&library.find(""), "");
        assert!(listing.contains("#1"));
        assert!(listing.contains("Field: Healthcare"));
        assert!(listing.contains("ATS Score: 40%"));

        let empty = formatter.format_library(&library.find("sales"), "sales");
        assert!(empty.contains("(no saved resumes)"));
    }
}
