//! Filesystem side of the scan.
//!
//! - [`classifier`] — text/binary sniffing from a leading byte sample.
//! - [`aggregator`] — walks one directory tree and merges per-file notices.
//! - [`batch`] — one report file per immediate subdirectory of a root.
//! - [`template`] — optional header prepended to batch reports.

pub mod aggregator;
pub mod batch;
pub mod classifier;
pub mod template;
