//! Input manager for draft and field files

use crate::error::{Result, ResumeBuilderError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::fields::DraftFields;
use log::info;
use std::path::Path;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a resume draft from a txt, md or pdf file.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        Self::ensure_exists(path)?;

        match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            _ => Err(ResumeBuilderError::UnsupportedFormat(format!(
                "Not a draft file (expected .txt, .md or .pdf): {}",
                path.display()
            ))),
        }
    }

    /// Read draft fields from a toml or json file. Missing keys default to empty.
    pub async fn load_fields(&self, path: &Path) -> Result<DraftFields> {
        Self::ensure_exists(path)?;

        let file_type = FileType::from_path(path);
        if !file_type.is_fields() {
            return Err(ResumeBuilderError::UnsupportedFormat(format!(
                "Not a fields file (expected .toml or .json): {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        info!("Loading draft fields from {}", path.display());

        match file_type {
            FileType::Json => Ok(serde_json::from_str(&content)?),
            _ => toml::from_str(&content).map_err(|e| {
                ResumeBuilderError::InvalidInput(format!("Invalid fields file {}: {}", path.display(), e))
            }),
        }
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ResumeBuilderError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
