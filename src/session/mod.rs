//! Session state for one editing session
//!
//! [`Session`] is a plain value. Every user action is a named transition
//! that consumes the current session and returns the next one, so the
//! front end never mutates fields directly. A transition that cannot apply
//! hands the untouched session back inside [`Rejected`].
//!
//! ```text
//! Empty -> Generating -> Ready <-> (save | load | edit)
//!              |
//!              +-> Failed -> Generating ...
//! ```

pub mod shell;

use crate::error::{Result, ResumeBuilderError};
use crate::library::{EntryId, Library, LibraryEntry};
use crate::llm::{GenerationService, PromptTemplates};
use crate::processing::analyzer::{ATSReport, AnalysisEngine};
use crate::processing::ats_matcher::ScoringPolicy;
use crate::processing::fields::{DraftFields, FieldName};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Nothing generated yet
    #[default]
    Empty,
    Generating,
    /// A draft is available for editing
    Ready,
    /// The last generation failed; any earlier draft is still in place
    Failed(String),
}

/// A refused transition: the session exactly as it was, plus the reason.
#[derive(Debug)]
pub struct Rejected {
    pub session: Session,
    pub error: ResumeBuilderError,
}

impl Rejected {
    fn new(session: Session, error: ResumeBuilderError) -> Self {
        Self { session, error }
    }

    pub fn into_parts(self) -> (Session, ResumeBuilderError) {
        (self.session, self.error)
    }
}

impl From<Rejected> for ResumeBuilderError {
    fn from(rejected: Rejected) -> Self {
        rejected.error
    }
}

pub type Transition<T = Session> = std::result::Result<T, Rejected>;

#[derive(Debug, Clone, Default)]
pub struct Session {
    fields: DraftFields,
    draft: String,
    status: GenerationStatus,
    library: Library,
    search_tag: String,
    last_check: Option<ATSReport>,
    policy: ScoringPolicy,
    prompts: PromptTemplates,
}

impl Session {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_fields(mut self, fields: DraftFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn search_tag(&self) -> &str {
        &self.search_tag
    }

    pub fn last_check(&self) -> Option<&ATSReport> {
        self.last_check.as_ref()
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Library entries under the current tag filter.
    pub fn visible_entries(&self) -> Vec<&LibraryEntry> {
        self.library.find(&self.search_tag)
    }

    pub fn prompt(&self) -> String {
        self.prompts.render_resume_prompt(&self.fields)
    }

    pub fn with_field(mut self, field: FieldName, value: impl Into<String>) -> Transition {
        match self.fields.set(field, value) {
            Ok(()) => Ok(self),
            Err(e) => Err(Rejected::new(self, e)),
        }
    }

    /// Enter `Generating` and return the prompt to send.
    pub fn begin_generation(mut self) -> Transition<(Self, String)> {
        if self.status == GenerationStatus::Generating {
            return Err(Rejected::new(self, ResumeBuilderError::GenerationInProgress));
        }
        let prompt = self.prompt();
        self.status = GenerationStatus::Generating;
        Ok((self, prompt))
    }

    pub fn complete_generation(mut self, outcome: Result<String>) -> Self {
        match outcome {
            Ok(text) => {
                self.draft = text;
                self.status = GenerationStatus::Ready;
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                self.status = GenerationStatus::Failed(e.to_string());
            }
        }
        self
    }

    /// Run a full generation round trip. Service failures end up in
    /// [`GenerationStatus::Failed`]; only a repeated request is an error.
    pub async fn generate<G: GenerationService>(self, service: &G) -> Transition {
        let (session, prompt) = self.begin_generation()?;
        let outcome = service.generate(&prompt).await;
        Ok(session.complete_generation(outcome))
    }

    pub fn edit_draft(mut self, text: impl Into<String>) -> Self {
        self.draft = text.into();
        self.status = GenerationStatus::Ready;
        self
    }

    pub fn run_check(mut self) -> Self {
        let report = AnalysisEngine::new(self.policy).check(&self.draft, &self.fields);
        self.last_check = Some(report);
        self
    }

    /// Snapshot the current fields and draft into the library. The score is
    /// computed now and frozen in the entry.
    pub fn save_to_library(mut self) -> (Self, EntryId) {
        let score = AnalysisEngine::new(self.policy).score(&self.draft, &self.fields);
        let id = self.library.save(&self.fields, &self.draft, score);
        (self, id)
    }

    /// Replace the live draft with a saved entry. Unsaved edits are lost.
    pub fn load_entry(mut self, id: EntryId) -> Transition {
        let content = match self.library.load(id) {
            Ok(content) => content,
            Err(e) => return Err(Rejected::new(self, e)),
        };
        info!("Loaded library entry {} into the editor", id.short());
        self.draft = content;
        self.status = GenerationStatus::Ready;
        Ok(self)
    }

    pub fn delete_entry(mut self, id: EntryId) -> Transition {
        match self.library.remove(id) {
            Ok(_) => Ok(self),
            Err(e) => Err(Rejected::new(self, e)),
        }
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_tag = query.into();
        self
    }

    /// Resolve a `#N` or id-prefix reference against the current filter.
    pub fn resolve_entry(&self, reference: &str) -> Result<EntryId> {
        self.library.resolve(reference, &self.search_tag)
    }
}
