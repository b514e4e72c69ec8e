use std::collections::HashSet;
use std::path::PathBuf;

use crate::notice::normalize::normalize;

/// Canonical, lossy form of a notice. Only ever compared, never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }
}

impl std::fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cleaned candidate copyright statement together with its dedup key.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    text: String,
    key: NormalizedKey,
}

impl Notice {
    /// Build a notice from already-cleaned text, computing its key.
    pub fn new(text: String) -> Self {
        let key = normalize(&text);
        Self { text, key }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> &NormalizedKey {
        &self.key
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Keys already emitted within one deduplication scope (a file or a tree).
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: HashSet<NormalizedKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns `true` when it was not seen before in this scope.
    pub fn insert(&mut self, key: &NormalizedKey) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.clone());
        true
    }
}

/// License file discovered at the root of a scanned directory.
#[derive(Debug, Clone)]
pub struct LicenseText {
    pub file_name: String,
    pub content: String,
}

/// Per-walk counters. Shown in the terminal summary, never written to reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
}

/// Deduplicated notices for one directory tree plus its optional license text.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    pub notices: Vec<Notice>,
    pub license: Option<LicenseText>,
    pub stats: ScanStats,
}

pub const LICENSE_SEPARATOR: &str = "----------------------------------------";

impl DirectoryReport {
    /// Render the report text: one notice per line, then the license section.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for notice in &self.notices {
            out.push_str(notice.text());
            out.push('\n');
        }

        if let Some(license) = self.license.as_ref().filter(|l| !l.content.is_empty()) {
            out.push_str("\nLicense Text:\n");
            out.push_str(LICENSE_SEPARATOR);
            out.push_str("\n\n");
            out.push_str(&license.content);
            if !license.content.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}

/// Result of scanning one immediate subdirectory in a batch.
#[derive(Debug)]
pub struct SubdirectoryOutcome {
    pub name: String,
    pub output: PathBuf,
    pub notice_count: usize,
    pub license_file: Option<String>,
    pub stats: ScanStats,
}
