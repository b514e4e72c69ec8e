//! Terminal rendering of batch results.
//!
//! - [`terminal`] — colored summary table of scanned subdirectories.

pub mod terminal;
