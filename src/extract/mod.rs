//! Extraction pipeline: classification, content decoding, naming, orchestration.

pub mod classify;
pub mod content;
pub mod filename;
pub mod message;
