//! Input processing module
//! Reads resume drafts and draft fields from disk

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
