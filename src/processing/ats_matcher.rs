//! ATS (Applicant Tracking System) completeness scoring
//!
//! A draft earns [`POINTS_PER_FIELD`] for each of five form fields that
//! appears verbatim inside it. Matching is case- and whitespace-sensitive.
//!
//! Under [`ScoringPolicy::Verbatim`] an empty field is a substring of every
//! draft and therefore always scores. That matches the behavior users have
//! seen so far; [`ScoringPolicy::RequireNonEmpty`] changes observable scores
//! and must be opted into through configuration.

use crate::processing::fields::{DraftFields, FieldName};
use log::debug;
use serde::{Deserialize, Serialize};

pub const POINTS_PER_FIELD: u8 = 20;

/// Fields that contribute to the score, in evaluation order.
pub const SCORED_FIELDS: [FieldName; 5] = [
    FieldName::Contact,
    FieldName::Summary,
    FieldName::Skills,
    FieldName::Experience,
    FieldName::JobTitle,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Plain substring test; empty fields match vacuously.
    #[default]
    Verbatim,
    /// Empty fields never match.
    RequireNonEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHit {
    pub field: FieldName,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ATSScore {
    /// One of 0, 20, 40, 60, 80, 100
    pub total: u8,
    pub breakdown: Vec<FieldHit>,
}

impl ATSScore {
    pub fn missed_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.breakdown.iter().filter(|h| !h.matched).map(|h| h.field)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ATSMatcher {
    policy: ScoringPolicy,
}

impl ATSMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Score a draft against the form fields, with a per-field breakdown.
    pub fn calculate_ats_score(&self, draft: &str, fields: &DraftFields) -> ATSScore {
        let breakdown: Vec<FieldHit> = SCORED_FIELDS
            .iter()
            .map(|&field| FieldHit {
                field,
                matched: self.field_matches(draft, &fields.get(field)),
            })
            .collect();

        let total = breakdown.iter().filter(|h| h.matched).count() as u8 * POINTS_PER_FIELD;
        debug!("ATS score {} under {:?} policy", total, self.policy);

        ATSScore { total, breakdown }
    }

    fn field_matches(&self, draft: &str, value: &str) -> bool {
        match self.policy {
            ScoringPolicy::Verbatim => draft.contains(value),
            ScoringPolicy::RequireNonEmpty => !value.is_empty() && draft.contains(value),
        }
    }
}

/// Score under the default (verbatim) policy.
pub fn score(draft: &str, fields: &DraftFields) -> u8 {
    ATSMatcher::new().calculate_ats_score(draft, fields).total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_manager() -> DraftFields {
        DraftFields {
            contact: "a@b.com".to_string(),
            summary: "Experienced manager".to_string(),
            skills: "Excel, SQL".to_string(),
            experience: "5 yrs retail".to_string(),
            job_title: "Store Manager".to_string(),
            ..Default::default()
        }
    }

    const FULL_DRAFT: &str = "Store Manager\na@b.com\nExperienced manager\nSkills: Excel, SQL\n5 yrs retail";

    #[test]
    fn test_all_fields_present_scores_100() {
        assert_eq!(score(FULL_DRAFT, &store_manager()), 100);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let draft = FULL_DRAFT.replace("Store Manager", "store manager");
        let result = ATSMatcher::new().calculate_ats_score(&draft, &store_manager());
        assert_eq!(result.total, 80);
        assert_eq!(result.missed_fields().collect::<Vec<_>>(), vec![FieldName::JobTitle]);
    }

    #[test]
    fn test_matching_is_whitespace_sensitive() {
        let draft = FULL_DRAFT.replace("Excel, SQL", "Excel,  SQL");
        assert_eq!(score(&draft, &store_manager()), 80);
    }

    #[test]
    fn test_each_field_adds_exactly_twenty() {
        let fields = store_manager();
        let matcher = ATSMatcher::with_policy(ScoringPolicy::RequireNonEmpty);
        let mut draft = String::new();
        let mut previous = matcher.calculate_ats_score(&draft, &fields).total;
        assert_eq!(previous, 0);

        for field in SCORED_FIELDS {
            draft.push_str(&fields.get(field));
            draft.push('\n');
            let current = matcher.calculate_ats_score(&draft, &fields).total;
            assert_eq!(current, previous + POINTS_PER_FIELD);
            previous = current;
        }
    }

    #[test]
    fn test_score_is_multiple_of_twenty() {
        let fields = store_manager();
        let drafts = ["", "a@b.com", "Store Manager a@b.com", FULL_DRAFT, "unrelated"];
        for draft in drafts {
            let value = score(draft, &fields);
            assert!(value <= 100);
            assert_eq!(value % POINTS_PER_FIELD, 0);
        }
    }

    #[test]
    fn test_verbatim_policy_counts_empty_fields() {
        // Empty fields are substrings of any draft, including the empty one.
        let fields = DraftFields::default();
        assert_eq!(score("", &fields), 100);

        let mut partial = store_manager();
        partial.summary.clear();
        partial.skills.clear();
        assert_eq!(score("nothing relevant", &partial), 40);
    }

    #[test]
    fn test_require_non_empty_policy() {
        let matcher = ATSMatcher::with_policy(ScoringPolicy::RequireNonEmpty);
        assert_eq!(matcher.calculate_ats_score("", &DraftFields::default()).total, 0);
        assert_eq!(matcher.calculate_ats_score(FULL_DRAFT, &store_manager()).total, 100);
    }

    #[test]
    fn test_unscored_fields_are_ignored() {
        let mut fields = store_manager();
        fields.job_type = "Logistics".to_string();
        fields.job_description = "Not in the draft at all".to_string();
        assert_eq!(score(FULL_DRAFT, &fields), 100);
    }

    #[test]
    fn test_breakdown_order_is_stable() {
        let result = ATSMatcher::new().calculate_ats_score(FULL_DRAFT, &store_manager());
        let order: Vec<FieldName> = result.breakdown.iter().map(|h| h.field).collect();
        assert_eq!(order, SCORED_FIELDS.to_vec());
    }
}
