use std::fs;
use std::path::{is_separator, Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use log::info;

use crate::models::SubdirectoryOutcome;
use crate::scanner::aggregator::scan_directory;
use crate::scanner::template::Template;

/// Placeholder replaced by the subdirectory name in an output pattern.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Derive the report path for subdirectory `name`.
///
/// `{name}` is substituted when present; otherwise `_<name>` is spliced in
/// before the extension (`out.txt` → `out_a.txt`).
pub fn output_path_for(pattern: &str, name: &str) -> PathBuf {
    if pattern.contains(NAME_PLACEHOLDER) {
        return PathBuf::from(pattern.replace(NAME_PLACEHOLDER, name));
    }

    let file_start = pattern.rfind(is_separator).map_or(0, |i| i + 1);
    let ext_start = pattern[file_start..]
        .rfind('.')
        .map_or(pattern.len(), |i| file_start + i);
    let (base, ext) = pattern.split_at(ext_start);
    let base = base.strip_suffix('_').unwrap_or(base);

    PathBuf::from(format!("{}_{}{}", base, name, ext))
}

/// Scan every immediate subdirectory of `root` into its own report file.
///
/// Subdirectories are processed in name order. The first scan or write
/// failure aborts the batch.
pub fn scan_subdirectories(
    root: &Path,
    output_pattern: &str,
    template: Option<&Template>,
    progress: &ProgressBar,
) -> Result<Vec<SubdirectoryOutcome>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(root)
        .with_context(|| format!("failed to read directory {}", root.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read directory {}", root.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        if file_type.is_dir() {
            subdirs.push(entry);
        }
    }
    subdirs.sort_by_key(|e| e.file_name());

    progress.set_length(subdirs.len() as u64);

    let mut outcomes = Vec::with_capacity(subdirs.len());
    for entry in subdirs {
        let name = entry.file_name().to_string_lossy().into_owned();
        let sub_dir = entry.path();
        let output = output_path_for(output_pattern, &name);

        progress.set_message(name.clone());

        let report = scan_directory(&sub_dir)
            .with_context(|| format!("failed to scan directory {}", sub_dir.display()))?;

        let mut text = template.map(|t| t.render(&name)).unwrap_or_default();
        text.push_str(&report.render());

        fs::write(&output, text)
            .with_context(|| format!("failed to write file {}", output.display()))?;

        info!("scanned {} into {}", sub_dir.display(), output.display());
        progress.println(format!(
            "  {} {} → {}",
            "✓".green(),
            sub_dir.display(),
            output.display()
        ));
        progress.inc(1);

        outcomes.push(SubdirectoryOutcome {
            name,
            output,
            notice_count: report.notices.len(),
            license_file: report.license.map(|l| l.file_name),
            stats: report.stats,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_placeholder() {
        assert_eq!(output_path_for("out_{name}.txt", "a"), PathBuf::from("out_a.txt"));
        assert_eq!(
            output_path_for("reports/{name}/{name}.txt", "b"),
            PathBuf::from("reports/b/b.txt")
        );
    }

    #[test]
    fn test_output_path_without_placeholder() {
        assert_eq!(output_path_for("out.txt", "a"), PathBuf::from("out_a.txt"));
        assert_eq!(output_path_for("out_.txt", "a"), PathBuf::from("out_a.txt"));
        assert_eq!(output_path_for("report", "a"), PathBuf::from("report_a"));
        assert_eq!(
            output_path_for("build.d/report", "a"),
            PathBuf::from("build.d/report_a")
        );
        assert_eq!(
            output_path_for("out/notices.tar.txt", "a"),
            PathBuf::from("out/notices.tar_a.txt")
        );
    }

    #[test]
    fn test_one_report_per_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        fs::create_dir(root.path().join("a")).unwrap();
        fs::create_dir(root.path().join("b")).unwrap();
        fs::write(root.path().join("stray.txt"), "Copyright 2020 Stray\n").unwrap();
        fs::write(root.path().join("a").join("x.c"), "/* Copyright 2020 Alpha */\n").unwrap();
        fs::write(root.path().join("b").join("y.c"), "/* Copyright 2020 Beta */\n").unwrap();

        let pattern = out.path().join("out_{name}.txt");
        let outcomes = scan_subdirectories(
            root.path(),
            pattern.to_str().unwrap(),
            None,
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(outcomes.len(), 2);
        let mut written: Vec<_> = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        written.sort();
        assert_eq!(written, vec!["out_a.txt", "out_b.txt"]);

        assert_eq!(
            fs::read_to_string(out.path().join("out_a.txt")).unwrap(),
            "Copyright 2020 Alpha\n"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("out_b.txt")).unwrap(),
            "Copyright 2020 Beta\n"
        );
    }

    #[test]
    fn test_template_prepended() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("widget")).unwrap();
        fs::write(root.path().join("widget").join("w.rs"), "// Copyright 2023 Widget Co\n").unwrap();

        let template = Template::new("NOTICES\nSoftware:".to_string());
        let pattern = out.path().join("notices.txt");
        let outcomes = scan_subdirectories(
            root.path(),
            pattern.to_str().unwrap(),
            Some(&template),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(outcomes[0].notice_count, 1);
        assert_eq!(
            fs::read_to_string(out.path().join("notices_widget.txt")).unwrap(),
            "NOTICES\nSoftware: widget\nCopyright 2023 Widget Co\n"
        );
    }

    #[test]
    fn test_write_failure_aborts() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();

        let pattern = root.path().join("missing-dir").join("{name}.txt");
        let err = scan_subdirectories(
            root.path(),
            pattern.to_str().unwrap(),
            None,
            &ProgressBar::hidden(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to write file"));
    }

    #[test]
    fn test_listing_errors_name_the_path() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("absent");
        let err = scan_subdirectories(
            &missing,
            "{name}.txt",
            None,
            &ProgressBar::hidden(),
        )
        .unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("failed to read directory"));
        assert!(msg.contains(&missing.display().to_string()));
    }

    #[test]
    fn test_plain_files_in_root_ignored() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("README"), "Copyright 2020 Root").unwrap();
        let out = tempfile::tempdir().unwrap();
        let pattern = out.path().join("{name}.txt");

        let outcomes = scan_subdirectories(
            root.path(),
            pattern.to_str().unwrap(),
            None,
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert!(outcomes.is_empty());
    }
}
