//! Report rendering and draft export

pub mod font_metrics;
pub mod layout;
pub mod export;
pub mod formatter;
