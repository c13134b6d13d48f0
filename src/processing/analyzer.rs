//! ATS check: score plus suggestions for one draft

use crate::processing::ats_matcher::{ATSMatcher, ATSScore, ScoringPolicy};
use crate::processing::fields::DraftFields;
use crate::processing::suggestions::{suggest, Suggestion};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ATSReport {
    pub score: ATSScore,
    pub suggestions: Vec<Suggestion>,
    pub policy: ScoringPolicy,
    pub job_title: String,
    pub draft_length: usize,
    pub checked_at: DateTime<Utc>,
}

impl ATSReport {
    pub fn total(&self) -> u8 {
        self.score.total
    }

    pub fn is_clean(&self) -> bool {
        self.suggestions.is_empty()
    }
}

pub struct AnalysisEngine {
    matcher: ATSMatcher,
}

impl AnalysisEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            matcher: ATSMatcher::with_policy(policy),
        }
    }

    pub fn score(&self, draft: &str, fields: &DraftFields) -> u8 {
        self.matcher.calculate_ats_score(draft, fields).total
    }

    pub fn check(&self, draft: &str, fields: &DraftFields) -> ATSReport {
        let score = self.matcher.calculate_ats_score(draft, fields);
        let suggestions = suggest(draft, fields);
        info!(
            "ATS check: score {}%, {} suggestion(s)",
            score.total,
            suggestions.len()
        );

        ATSReport {
            score,
            suggestions,
            policy: self.matcher.policy(),
            job_title: fields.job_title.clone(),
            draft_length: draft.chars().count(),
            checked_at: Utc::now(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}
