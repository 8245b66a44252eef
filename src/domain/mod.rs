//! Content document model and registration rules.

pub mod content;
pub mod registration;
