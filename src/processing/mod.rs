//! Draft fields, ATS scoring and suggestions

pub mod fields;
pub mod ats_matcher;
pub mod suggestions;
pub mod analyzer;
