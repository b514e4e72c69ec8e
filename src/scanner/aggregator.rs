use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::models::{DirectoryReport, LicenseText, Notice, SeenSet};
use crate::notice::extractor::extract_file;
use crate::scanner::classifier::is_text;

/// License file names looked up at the scan root, highest priority first.
pub const LICENSE_FILE_NAMES: &[&str] = &[
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "license",
    "license.txt",
    "license.md",
];

/// Per-file notice extraction used by the walk.
pub type ExtractFn = fn(&Path) -> Result<Vec<Notice>>;

/// Scan a directory tree into a report of tree-wide unique notices.
///
/// Per-file failures are logged and counted; failing to list a directory
/// aborts the scan.
pub fn scan_directory(dir: &Path) -> Result<DirectoryReport> {
    scan_directory_with(dir, extract_file)
}

/// [`scan_directory`] with a caller-supplied per-file extractor.
pub fn scan_directory_with(dir: &Path, extract: ExtractFn) -> Result<DirectoryReport> {
    let mut report = DirectoryReport {
        license: find_license(dir),
        ..Default::default()
    };
    let mut seen = SeenSet::new();

    walk(dir, extract, &mut seen, &mut report)?;

    debug!(
        "{}: {} notices from {} files ({} skipped, {} failed)",
        dir.display(),
        report.notices.len(),
        report.stats.files_scanned,
        report.stats.files_skipped,
        report.stats.files_failed
    );

    Ok(report)
}

/// First readable license file in [`LICENSE_FILE_NAMES`] order.
pub fn find_license(dir: &Path) -> Option<LicenseText> {
    LICENSE_FILE_NAMES.iter().find_map(|name| {
        fs::read(dir.join(name)).ok().map(|bytes| LicenseText {
            file_name: (*name).to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    })
}

fn walk(
    dir: &Path,
    extract: ExtractFn,
    seen: &mut SeenSet,
    report: &mut DirectoryReport,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read directory {}", dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", path.display()))?;

        if file_type.is_dir() {
            walk(&path, extract, seen, report)?;
            continue;
        }

        // FIFOs, sockets and devices would block or never end; symlinks are
        // followed only when they resolve to a regular file.
        let is_file = if file_type.is_symlink() {
            fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false)
        } else {
            file_type.is_file()
        };
        if !is_file {
            debug!("skipping special file {}", path.display());
            report.stats.files_skipped += 1;
            continue;
        }

        if !is_text(&path) {
            debug!("skipping non-text file {}", path.display());
            report.stats.files_skipped += 1;
            continue;
        }

        match extract(&path) {
            Ok(notices) => {
                report.stats.files_scanned += 1;
                merge_notices(notices, seen, &mut report.notices);
            }
            Err(e) => {
                warn!("Error processing file {}: {:#}", path.display(), e);
                report.stats.files_failed += 1;
            }
        }
    }

    Ok(())
}

/// Append notices whose keys are new to the tree-wide scope.
fn merge_notices(notices: Vec<Notice>, seen: &mut SeenSet, out: &mut Vec<Notice>) {
    for notice in notices {
        if seen.insert(notice.key()) {
            out.push(notice);
        }
    }
}
