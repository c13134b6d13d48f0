//! In-memory resume library
//!
//! Entries live for the lifetime of the process. Every entry gets a stable
//! [`EntryId`] when it is saved, and all mutation goes through that id.
//! Positions in a filtered listing are resolved to ids first (see
//! [`Library::resolve`]), so a filter can never redirect a delete to the
//! wrong entry.

use crate::error::{Result, ResumeBuilderError};
use crate::processing::fields::DraftFields;
use chrono::{DateTime, Local, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to reference an entry in the shell.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved draft. Nothing about it changes after [`Library::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: EntryId,
    pub title: String,
    pub tag: String,
    pub content: String,
    /// Local time as shown to the user, e.g. `3/5/2026, 2:07:09 PM`
    pub timestamp: String,
    /// Frozen at save time
    pub score: u8,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

/// Render a local time the way the library displays it.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// Append a snapshot of the draft. `score` is stored as given.
    pub fn save(&mut self, fields: &DraftFields, draft: &str, score: u8) -> EntryId {
        self.save_at(fields, draft, score, Local::now())
    }

    pub fn save_at(
        &mut self,
        fields: &DraftFields,
        draft: &str,
        score: u8,
        now: DateTime<Local>,
    ) -> EntryId {
        let timestamp = format_timestamp(&now);
        let entry = LibraryEntry {
            id: EntryId::new(),
            title: format!("{} Resume ({})", fields.job_title, timestamp),
            tag: fields.job_type.clone(),
            content: draft.to_string(),
            timestamp,
            score,
            saved_at: now.with_timezone(&Utc),
        };
        let id = entry.id;

        info!("Saved '{}' to library ({}%)", entry.title, score);
        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: EntryId) -> Result<&LibraryEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(ResumeBuilderError::UnknownEntry(id))
    }

    /// Remove an entry. Unknown ids leave the library untouched.
    pub fn remove(&mut self, id: EntryId) -> Result<LibraryEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ResumeBuilderError::UnknownEntry(id))?;

        let removed = self.entries.remove(position);
        info!("Removed '{}' from library", removed.title);
        Ok(removed)
    }

    /// Entries whose tag contains `tag_query`, ignoring case. An empty
    /// query returns everything. Insertion order is kept.
    pub fn find(&self, tag_query: &str) -> Vec<&LibraryEntry> {
        if tag_query.is_empty() {
            return self.entries.iter().collect();
        }

        let needle = tag_query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.tag.to_lowercase().contains(&needle))
            .collect()
    }

    /// Content to install as the live draft.
    pub fn load(&self, id: EntryId) -> Result<String> {
        self.get(id).map(|e| e.content.clone())
    }

    /// Turn a user reference into an id.
    ///
    /// `#N` is the 1-based position within `find(tag_query)`; anything else
    /// is matched as a prefix of an entry id across the whole library.
    pub fn resolve(&self, reference: &str, tag_query: &str) -> Result<EntryId> {
        let reference = reference.trim();

        if let Some(position) = reference.strip_prefix('#') {
            let position: usize = position.parse().map_err(|_| {
                ResumeBuilderError::InvalidInput(format!("Invalid position: {}", reference))
            })?;
            let visible = self.find(tag_query);
            return position
                .checked_sub(1)
                .and_then(|i| visible.get(i))
                .map(|e| e.id)
                .ok_or(ResumeBuilderError::InvalidIndex {
                    position,
                    visible: visible.len(),
                });
        }

        let prefix = reference.replace('-', "").to_lowercase();
        if prefix.is_empty() {
            return Err(ResumeBuilderError::InvalidInput(
                "Expected an entry reference (#N or id prefix)".to_string(),
            ));
        }

        let matches: Vec<&LibraryEntry> = self
            .entries
            .iter()
            .filter(|e| e.id.0.simple().to_string().starts_with(&prefix))
            .collect();
        debug!("Reference '{}' matched {} entries", reference, matches.len());

        match matches.as_slice() {
            [entry] => Ok(entry.id),
            [] => Err(ResumeBuilderError::InvalidInput(format!(
                "No library entry matches '{}'",
                reference
            ))),
            _ => Err(ResumeBuilderError::InvalidInput(format!(
                "'{}' matches {} entries, use a longer prefix",
                reference,
                matches.len()
            ))),
        }
    }
}
