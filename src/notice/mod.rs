//! Copyright notice extraction.
//!
//! - [`rules`] — ordered line-classification table (blank, suppressed, signal).
//! - [`normalize`] — canonical dedup key for a notice.
//! - [`extractor`] — per-file state machine that collects, cleans and
//!   deduplicates multi-line notices.

pub mod extractor;
pub mod normalize;
pub mod rules;
