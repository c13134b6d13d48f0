//! Resume builder: AI-assisted resume drafting with ATS checks

use clap::Parser;
use log::{error, info};
use resume_builder::cli::{self, Cli, Commands, ConfigAction};
use resume_builder::config::Config;
use resume_builder::error::{Result, ResumeBuilderError};
use resume_builder::input::InputManager;
use resume_builder::llm::{GenerationService, HttpGenerationClient, PromptTemplates};
use resume_builder::output::export::{ExportFormat, Exporter};
use resume_builder::output::formatter::ReportGenerator;
use resume_builder::processing::analyzer::AnalysisEngine;
use resume_builder::session::shell::Shell;
use resume_builder::session::Session;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // `config path` and `config reset` must work even when the file is broken
    let skip_load = matches!(
        cli.command,
        Commands::Config {
            action: Some(ConfigAction::Path | ConfigAction::Reset)
        }
    );
    let config = if skip_load {
        Config::default()
    } else {
        match Config::load(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                process::exit(1);
            }
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config.as_deref()).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<&Path>) -> Result<()> {
    let input_manager = InputManager::new();

    match command {
        Commands::Generate { fields, export, out } => {
            let export_format = export.as_deref().map(str::parse::<ExportFormat>).transpose()?;
            let fields = input_manager.load_fields(&fields).await?;
            let prompt = PromptTemplates::default().render_resume_prompt(&fields);

            let client = HttpGenerationClient::new(&config.generation, config.api_key())?;
            info!("Requesting draft from {}", client.endpoint());
            println!("🤖 Generating {} resume for {}...", fields.template, fields.job_title);

            let draft = client.generate(&prompt).await?;
            println!("\n{}\n", draft);

            let report = AnalysisEngine::new(config.scoring.policy).check(&draft, &fields);
            println!("📊 ATS Optimization Score: {}%", report.total());

            if let Some(format) = export_format {
                let path = Exporter::new(config.export.clone()).export(&draft, format, out.as_deref())?;
                println!("✅ Exported to {}", path.display());
            }
        }

        Commands::Prompt { fields } => {
            let fields = input_manager.load_fields(&fields).await?;
            println!("{}", PromptTemplates::default().render_resume_prompt(&fields));
        }

        Commands::Check { fields, draft, output } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeBuilderError::InvalidInput)?,
                None => config.output.format,
            };

            let fields = input_manager.load_fields(&fields).await?;
            let draft_text = input_manager.extract_text(&draft).await?;

            let report = AnalysisEngine::new(config.scoring.policy).check(&draft_text, &fields);
            let generator = ReportGenerator::new(config.output.color_output);
            println!("{}", generator.generate_report(&report, &output_format)?);
        }

        Commands::Export { draft, format, out } => {
            let format: ExportFormat = format.parse()?;
            let draft_text = input_manager.extract_text(&draft).await?;

            let path = Exporter::new(config.export.clone()).export(&draft_text, format, out.as_deref())?;
            println!("✅ Exported to {}", path.display());
        }

        Commands::Session { fields } => {
            let mut session = Session::new(config.scoring.policy);
            if let Some(path) = fields {
                session = session.with_fields(input_manager.load_fields(&path).await?);
            }

            let client = HttpGenerationClient::new(&config.generation, config.api_key())?;
            let mut shell = Shell::new(session, client, &config);
            shell.run(tokio::io::stdin()).await?;

            let saved = shell.session().library().len();
            if saved > 0 {
                println!("👋 Session ended, {} saved resume(s) discarded", saved);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Generation endpoint: {}", config.generation.endpoint);
                println!(
                    "Timeout: {}s, retries: {}",
                    config.generation.timeout_secs, config.generation.max_retries
                );
                println!("Scoring policy: {:?}", config.scoring.policy);
                println!("Export directory: {}", config.export.output_dir.display());
                println!(
                    "PDF layout: {}x{}mm, {}pt, text width {}mm",
                    config.export.page_width_mm,
                    config.export.page_height_mm,
                    config.export.font_size_pt,
                    config.export.text_width_mm
                );
                println!("Report format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::resolve_path(config_path).display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let path = Config::reset(config_path)?;
                println!("✅ Configuration reset successfully: {}", path.display());
            }
        },
    }

    Ok(())
}
