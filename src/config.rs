//! Configuration management for the resume builder

use crate::error::{Result, ResumeBuilderError};
use crate::processing::ats_matcher::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub scoring: ScoringConfig,
    pub export: ExportConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Endpoint accepting `{"prompt": ...}` and answering `{"result": ...}`
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Retries after the first attempt, transient failures only
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Name of an environment variable holding a bearer token, if the endpoint needs one
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub policy: ScoringPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub text_file_name: String,
    pub pdf_file_name: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub text_width_mm: f32,
    pub font_size_pt: f32,
    pub line_height_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/chatgpt".to_string(),
            timeout_secs: 60,
            max_retries: 1,
            retry_backoff_ms: 500,
            api_key_env: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        // A4 with the jsPDF-style 10mm origin and 180mm wrap width
        Self {
            output_dir: PathBuf::from("."),
            text_file_name: "resume.txt".to_string(),
            pdf_file_name: "resume.pdf".to_string(),
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            text_width_mm: 180.0,
            font_size_pt: 16.0,
            line_height_factor: 1.15,
        }
    }
}

impl ExportConfig {
    /// Page geometry must be positive and finite; the margin may be zero.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("text_width_mm", self.text_width_mm),
            ("font_size_pt", self.font_size_pt),
            ("line_height_factor", self.line_height_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ResumeBuilderError::Configuration(format!(
                    "export.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(ResumeBuilderError::Configuration(format!(
                "export.margin_mm must not be negative, got {}",
                self.margin_mm
            )));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default config file is created with defaults; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ResumeBuilderError::Configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ResumeBuilderError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.export.validate()?;
        Ok(config)
    }

    /// Overwrite the config at `path` (or the default location) with
    /// defaults. The existing file is never parsed, so a broken one can be
    /// repaired this way.
    pub fn reset(path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::resolve_path(path);
        Self::default().save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeBuilderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The explicit path when given, the default location otherwise.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-builder")
            .join("config.toml")
    }

    /// Bearer token for the generation service, if one is configured and set.
    pub fn api_key(&self) -> Option<String> {
        self.generation
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_export_layout() {
        let config = Config::default();
        assert_eq!(config.export.text_file_name, "resume.txt");
        assert_eq!(config.export.pdf_file_name, "resume.pdf");
        assert_eq!(config.export.text_width_mm, 180.0);
        assert_eq!(config.generation.max_retries, 1);
        assert_eq!(config.scoring.policy, ScoringPolicy::Verbatim);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [generation]
            endpoint = "http://example.test/generate"

            [scoring]
            policy = "require_non_empty"
            "#,
        )
        .unwrap();

        assert_eq!(config.generation.endpoint, "http://example.test/generate");
        assert_eq!(config.generation.timeout_secs, 60);
        assert_eq!(config.scoring.policy, ScoringPolicy::RequireNonEmpty);
        assert_eq!(config.export.font_size_pt, 16.0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = Config::load(Some(Path::new("does/not/exist.toml")));
        assert!(matches!(result, Err(ResumeBuilderError::Configuration(_))));
    }

    #[test]
    fn test_zero_line_height_is_rejected() {
        let result = Config::from_toml("[export]\nline_height_factor = 0.0\n");
        assert!(matches!(result, Err(ResumeBuilderError::Configuration(msg)) if msg.contains("line_height_factor")));
    }

    #[test]
    fn test_bad_export_geometry_is_rejected() {
        for toml in [
            "[export]\nfont_size_pt = 0.0\n",
            "[export]\npage_height_mm = -297.0\n",
            "[export]\ntext_width_mm = nan\n",
            "[export]\nmargin_mm = -1.0\n",
        ] {
            assert!(
                matches!(Config::from_toml(toml), Err(ResumeBuilderError::Configuration(_))),
                "accepted: {}",
                toml
            );
        }
        assert!(Config::from_toml("[export]\nmargin_mm = 0.0\n").is_ok());
    }

    #[test]
    fn test_reset_repairs_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[export\nfont_size_pt = ").unwrap();
        assert!(Config::load(Some(&path)).is_err());

        let written = Config::reset(Some(&path)).unwrap();
        assert_eq!(written, path);
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.export.font_size_pt, 16.0);
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = Path::new("my.toml");
        assert_eq!(Config::resolve_path(Some(explicit)), PathBuf::from("my.toml"));
        assert_eq!(Config::resolve_path(None), Config::config_path());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = Config::from_toml("generation = 3");
        assert!(matches!(result, Err(ResumeBuilderError::Configuration(_))));
    }
}
