//! Error handling for the resume builder

use crate::library::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Resume generation failed: {0}")]
    GenerationFailed(String),

    #[error("A generation request is already in progress")]
    GenerationInProgress,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// The referenced library entry no longer exists (deleted or never saved).
    #[error("Library entry not found: {0}")]
    UnknownEntry(EntryId),

    /// A `#N` reference pointed outside the currently filtered library view.
    #[error("No library entry at position {position} (showing {visible})")]
    InvalidIndex { position: usize, visible: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeBuilderError>;

impl From<reqwest::Error> for ResumeBuilderError {
    fn from(err: reqwest::Error) -> Self {
        ResumeBuilderError::GenerationFailed(err.to_string())
    }
}
