//! CLI interface for the resume builder

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "AI-assisted resume drafting with ATS checks")]
#[command(long_about = "Draft a resume from your career details with a text-generation service, check it for ATS completeness, keep versions in a session library and export to text or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a resume draft from a fields file
    Generate {
        /// Path to draft fields (TOML or JSON)
        #[arg(short, long)]
        fields: PathBuf,

        /// Also export the generated draft: txt or pdf
        #[arg(short, long)]
        export: Option<String>,

        /// Directory for exported files
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the generation prompt without calling the service
    Prompt {
        /// Path to draft fields (TOML or JSON)
        #[arg(short, long)]
        fields: PathBuf,
    },

    /// Run the ATS check on an existing draft
    Check {
        /// Path to draft fields (TOML or JSON)
        #[arg(short, long)]
        fields: PathBuf,

        /// Path to the resume draft (TXT, MD, PDF)
        #[arg(short, long)]
        draft: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export a draft to resume.txt or resume.pdf
    Export {
        /// Path to the resume draft (TXT, MD, PDF)
        #[arg(short, long)]
        draft: PathBuf,

        /// Export format: txt or pdf
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Directory for exported files
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Start an interactive editing session
    Session {
        /// Pre-fill the form from a fields file (TOML or JSON)
        #[arg(short, long)]
        fields: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate report output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}
