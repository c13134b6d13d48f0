//! Interactive terminal front end over [`Session`]

use crate::config::{Config, OutputFormat};
use crate::error::{Result, ResumeBuilderError};
use crate::llm::GenerationService;
use crate::output::export::{ExportFormat, Exporter};
use crate::output::formatter::ReportGenerator;
use crate::processing::fields::{FieldName, JOB_CATEGORIES};
use crate::session::{GenerationStatus, Session, Transition};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

pub const HELP: &str = "Commands:
  set <field> <value>   contact, title, type, description, summary, skills, experience, template
                        (everything after the space following the field name is kept as typed)
  show                  show the current fields and status
  prompt                show the prompt that generate would send
  generate              draft a resume from the fields
  edit                  replace the draft (finish with a line containing only '.')
  draft                 print the current draft
  check                 run the ATS check on the draft
  save                  save the draft to the library
  search [tag]          filter the library by tag (no tag clears the filter)
  list                  list library entries under the current filter
  view <ref>            show a saved resume (ref: #N from list, or id prefix)
  load <ref>            replace the draft with a saved resume
  delete <ref>          remove a saved resume
  export <txt|pdf>      write resume.txt or resume.pdf
  help                  show this help
  quit                  leave the session (the library is not kept)";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Set { field: FieldName, value: String },
    Show,
    Prompt,
    Generate,
    Edit,
    Draft,
    Check,
    Save,
    Search(String),
    List,
    View(String),
    Load(String),
    Delete(String),
    Export(ExportFormat),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let raw = line.trim_start().trim_end_matches(['\r', '\n']);
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> Result<String> {
            if rest.is_empty() {
                Err(ResumeBuilderError::InvalidInput(format!("'{}' needs {}", verb, what)))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb.to_lowercase().as_str() {
            "set" => {
                // Value is kept as typed after the separator following the field name
                let args = raw[verb.len()..].trim_start();
                let (field, value) = match args.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value),
                    None => (args.trim_end(), ""),
                };
                if field.is_empty() {
                    return Err(ResumeBuilderError::InvalidInput("'set' needs a field name".to_string()));
                }
                ShellCommand::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                }
            }
            "show" => ShellCommand::Show,
            "prompt" => ShellCommand::Prompt,
            "generate" | "gen" => ShellCommand::Generate,
            "edit" => ShellCommand::Edit,
            "draft" => ShellCommand::Draft,
            "check" | "ats" => ShellCommand::Check,
            "save" => ShellCommand::Save,
            "search" | "filter" => ShellCommand::Search(rest.to_string()),
            "list" | "ls" => ShellCommand::List,
            "view" => ShellCommand::View(require("an entry reference")?),
            "load" => ShellCommand::Load(require("an entry reference")?),
            "delete" | "rm" => ShellCommand::Delete(require("an entry reference")?),
            "export" => ShellCommand::Export(require("a format (txt or pdf)")?.parse()?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(ResumeBuilderError::InvalidInput(format!(
                    "Unknown command: {} (type 'help')",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

pub struct Shell<G> {
    session: Session,
    service: G,
    exporter: Exporter,
    reports: ReportGenerator,
    output_format: OutputFormat,
}

impl<G: GenerationService> Shell<G> {
    pub fn new(session: Session, service: G, config: &Config) -> Self {
        Self {
            session,
            service,
            exporter: Exporter::new(config.export.clone()),
            reports: ReportGenerator::new(config.output.color_output),
            output_format: config.output.format,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from `input` until `quit` or end of input.
    pub async fn run<R: AsyncRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = BufReader::new(input).lines();
        println!("📝 Resume builder session. Type 'help' for commands.");

        loop {
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("❌ {}", e);
                    continue;
                }
            };
            debug!("Shell command: {:?}", command);

            match self.handle(command, &mut lines).await {
                Ok(true) => {}
                Ok(false) => break,
                // Session errors are reported and the session carries on
                Err(e) => println!("❌ {}", e),
            }
        }
        Ok(())
    }

    /// Apply one command. Returns `false` when the session should end.
    pub async fn handle<R: AsyncRead + Unpin>(
        &mut self,
        command: ShellCommand,
        input: &mut Lines<BufReader<R>>,
    ) -> Result<bool> {
        match command {
            ShellCommand::Set { field, value } => {
                self.apply(|session| session.with_field(field, value))?;
                if field == FieldName::JobType && !self.session.fields().is_known_category() {
                    println!("💡 Common categories: {}", JOB_CATEGORIES.join(", "));
                }
                println!("✅ {} updated", field);
            }

            ShellCommand::Show => self.print_fields(),

            ShellCommand::Prompt => println!("{}", self.session.prompt()),

            ShellCommand::Generate => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message("Generating resume...");
                spinner.enable_steady_tick(Duration::from_millis(100));

                let result = std::mem::take(&mut self.session).generate(&self.service).await;
                spinner.finish_and_clear();
                self.restore(result)?;

                match self.session.status() {
                    GenerationStatus::Failed(reason) => {
                        println!("❌ {}", reason);
                        println!("💡 Run 'generate' again to retry.");
                    }
                    _ => {
                        println!("✅ Resume generated ({} characters)\n", self.session.draft().chars().count());
                        println!("{}", self.session.draft());
                    }
                }
            }

            ShellCommand::Edit => {
                println!("Enter the new draft. Finish with a line containing only '.'");
                let mut text = Vec::new();
                while let Some(line) = input.next_line().await? {
                    if line.trim_end() == "." {
                        break;
                    }
                    text.push(line);
                }
                self.session = std::mem::take(&mut self.session).edit_draft(text.join("\n"));
                println!("✅ Draft updated");
            }

            ShellCommand::Draft => {
                if self.session.draft().is_empty() {
                    println!("(no draft yet, run 'generate' or 'edit')");
                } else {
                    println!("{}", self.session.draft());
                }
            }

            ShellCommand::Check => {
                self.session = std::mem::take(&mut self.session).run_check();
                if let Some(report) = self.session.last_check() {
                    println!("{}", self.reports.generate_report(report, &self.output_format)?);
                }
            }

            ShellCommand::Save => {
                let (session, id) = std::mem::take(&mut self.session).save_to_library();
                self.session = session;
                let entry = self.session.library().get(id)?;
                println!("✅ Saved '{}' [{}] with ATS score {}%", entry.title, id.short(), entry.score);
            }

            ShellCommand::Search(query) => {
                self.session = std::mem::take(&mut self.session).with_search(query);
                self.print_library();
            }

            ShellCommand::List => self.print_library(),

            ShellCommand::View(reference) => {
                let id = self.session.resolve_entry(&reference)?;
                let entry = self.session.library().get(id)?;
                println!("📄 {}\n", entry.title);
                println!("{}", entry.content);
            }

            ShellCommand::Load(reference) => {
                let id = self.session.resolve_entry(&reference)?;
                self.apply(|session| session.load_entry(id))?;
                println!("✅ Loaded [{}] into the editor", id.short());
            }

            ShellCommand::Delete(reference) => {
                let id = self.session.resolve_entry(&reference)?;
                self.apply(|session| session.delete_entry(id))?;
                println!("🗑️  Deleted [{}]", id.short());
            }

            ShellCommand::Export(format) => {
                if self.session.draft().is_empty() {
                    println!("⚠️  The draft is empty");
                }
                let path = self.exporter.export(self.session.draft(), format, None)?;
                println!("✅ Exported to {}", path.display());
            }

            ShellCommand::Help => println!("{}", HELP),

            ShellCommand::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn apply(&mut self, transition: impl FnOnce(Session) -> Transition) -> Result<()> {
        let next = transition(std::mem::take(&mut self.session));
        self.restore(next)
    }

    /// Install the next session, or put the refused one back.
    fn restore(&mut self, next: Transition) -> Result<()> {
        match next {
            Ok(session) => {
                self.session = session;
                Ok(())
            }
            Err(rejected) => {
                let (session, error) = rejected.into_parts();
                self.session = session;
                Err(error)
            }
        }
    }

    fn print_fields(&self) {
        let fields = self.session.fields();
        for field in FieldName::ALL {
            let value = fields.get(field);
            let shown = if value.is_empty() { "(empty)".to_string() } else { value };
            println!("  {:<22} {}", format!("{}:", field), shown);
        }
        let status = match self.session.status() {
            GenerationStatus::Empty => "no draft".to_string(),
            GenerationStatus::Generating => "generating".to_string(),
            GenerationStatus::Ready => format!("draft ready ({} characters)", self.session.draft().chars().count()),
            GenerationStatus::Failed(reason) => format!("last generation failed: {}", reason),
        };
        println!("  {:<22} {}", "Status:", status);
        println!("  {:<22} {} saved", "Library:", self.session.library().len());
    }

    fn print_library(&self) {
        let entries = self.session.visible_entries();
        print!(
            "{}",
            self.reports.console().format_library(&entries, self.session.search_tag())
        );
    }
}
