//! Draft export to plain text and PDF

use crate::config::ExportConfig;
use crate::error::{Result, ResumeBuilderError};
use crate::output::font_metrics::unencodable_chars;
use crate::output::layout::PageLayout;
use log::{debug, info, warn};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl FromStr for ExportFormat {
    type Err = ResumeBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ResumeBuilderError::InvalidInput(format!(
                "Invalid export format: {}. Supported: txt, pdf",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "txt"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn layout(&self) -> PageLayout {
        PageLayout {
            page_height_mm: self.config.page_height_mm,
            margin_mm: self.config.margin_mm,
            text_width_mm: self.config.text_width_mm,
            font_size_pt: self.config.font_size_pt,
            line_height_factor: self.config.line_height_factor,
        }
    }

    /// Write the draft into `dir` (or the configured output directory) and
    /// return the path written.
    pub fn export(&self, draft: &str, format: ExportFormat, dir: Option<&Path>) -> Result<PathBuf> {
        let dir = dir.unwrap_or(self.config.output_dir.as_path());
        match format {
            ExportFormat::Text => self.export_text(draft, dir),
            ExportFormat::Pdf => self.export_pdf(draft, dir),
        }
    }

    /// The draft, byte for byte.
    pub fn export_text(&self, draft: &str, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.config.text_file_name);
        write_file(&path, draft.as_bytes())?;
        info!("Exported text resume to {}", path.display());
        Ok(path)
    }

    pub fn export_pdf(&self, draft: &str, dir: &Path) -> Result<PathBuf> {
        let bytes = self.render_pdf(draft)?;
        let path = dir.join(&self.config.pdf_file_name);
        write_file(&path, &bytes)?;
        info!("Exported PDF resume to {}", path.display());
        Ok(path)
    }

    pub fn render_pdf(&self, draft: &str) -> Result<Vec<u8>> {
        let missing = unencodable_chars(draft);
        if !missing.is_empty() {
            let shown: String = missing.iter().take(20).collect();
            warn!(
                "{} character(s) cannot be drawn with Helvetica and will be missing from the PDF: {}",
                missing.len(),
                shown
            );
        }

        let layout = self.layout();
        let pages = layout.paginate(draft);
        let width = Mm(self.config.page_width_mm);
        let height = Mm(self.config.page_height_mm);
        let line_height = layout.line_height_mm();
        debug!("Rendering PDF: {} page(s), line height {:.2}mm", pages.len(), line_height);

        let (doc, first_page, first_layer) = PdfDocument::new("Resume", width, height, "Page 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ResumeBuilderError::ExportFailed(format!("Failed to load font: {}", e)))?;

        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, format!("Page {}", index + 1))
            };
            let layer = doc.get_page(page).get_layer(layer);

            // Baselines run down from the top margin
            let mut y = self.config.page_height_mm - self.config.margin_mm;
            for line in lines {
                if !line.is_empty() {
                    layer.use_text(line.as_str(), self.config.font_size_pt, Mm(self.config.margin_mm), Mm(y), &font);
                }
                y -= line_height;
            }
        }

        doc.save_to_bytes()
            .map_err(|e| ResumeBuilderError::ExportFailed(format!("Failed to render PDF: {}", e)))
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_context = |e: std::io::Error| {
        ResumeBuilderError::ExportFailed(format!("Failed to write {}: {}", path.display(), e))
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_context)?;
    }
    std::fs::write(path, bytes).map_err(io_context)
}
