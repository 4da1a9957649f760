//! `emlpdf` — extract PDF attachments from `.eml` files.
//!
//! This crate provides the core library for parsing RFC 5322 messages,
//! walking their MIME structure, and writing PDF attachments to disk
//! under collision-free names.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod scan;
