//! Generation service integration

pub mod client;
pub mod prompts;

pub use client::{GenerationService, HttpGenerationClient};
pub use prompts::PromptTemplates;
