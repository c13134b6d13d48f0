//! Resume builder library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod library;
pub mod llm;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{Result, ResumeBuilderError};
pub use library::{EntryId, Library, LibraryEntry};
pub use processing::ats_matcher::{score, ScoringPolicy};
pub use processing::fields::{DraftFields, FieldName, Template};
pub use processing::suggestions::{suggest, Suggestion};
pub use session::{GenerationStatus, Rejected, Session};
