use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::SubdirectoryOutcome;

/// Print the batch summary: a header, one table row per subdirectory, and a
/// totals line. `quiet` prints only the totals line.
pub fn render(outcomes: &[SubdirectoryOutcome], root: &Path, quiet: bool) {
    let total_notices: usize = outcomes.iter().map(|o| o.notice_count).sum();
    let total_failed: usize = outcomes.iter().map(|o| o.stats.files_failed).sum();

    if !quiet {
        println!(
            "\n {} v{}",
            "copyright-scanr".bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(" Scanned: {}\n", root.display());
        println!("{}", build_table(outcomes));
    }

    let failed = if total_failed > 0 {
        total_failed.to_string().red()
    } else {
        total_failed.to_string().normal()
    };
    println!(
        "Directories: {}  Notices: {}  Unreadable files: {}",
        outcomes.len().to_string().cyan(),
        total_notices.to_string().green(),
        failed,
    );
}

fn build_table(outcomes: &[SubdirectoryOutcome]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Directory").add_attribute(Attribute::Bold),
            Cell::new("Files").add_attribute(Attribute::Bold),
            Cell::new("Skipped").add_attribute(Attribute::Bold),
            Cell::new("Notices").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Output").add_attribute(Attribute::Bold),
        ]);

    for outcome in outcomes {
        let (license, license_color) = match &outcome.license_file {
            Some(name) => (name.as_str(), Color::Green),
            None => ("none", Color::DarkGrey),
        };
        let notice_color = if outcome.notice_count == 0 {
            Color::Yellow
        } else {
            Color::Reset
        };

        table.add_row(vec![
            Cell::new(&outcome.name),
            Cell::new(outcome.stats.files_scanned).set_alignment(CellAlignment::Right),
            Cell::new(outcome.stats.files_skipped).set_alignment(CellAlignment::Right),
            Cell::new(outcome.notice_count)
                .fg(notice_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(license).fg(license_color),
            Cell::new(outcome.output.display()),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanStats;
    use std::path::PathBuf;

    #[test]
    fn test_table_has_row_per_outcome() {
        let outcomes = vec![
            SubdirectoryOutcome {
                name: "alpha".to_string(),
                output: PathBuf::from("out_alpha.txt"),
                notice_count: 3,
                license_file: Some("LICENSE".to_string()),
                stats: ScanStats {
                    files_scanned: 10,
                    files_skipped: 2,
                    files_failed: 0,
                },
            },
            SubdirectoryOutcome {
                name: "beta".to_string(),
                output: PathBuf::from("out_beta.txt"),
                notice_count: 0,
                license_file: None,
                stats: ScanStats::default(),
            },
        ];

        let table = build_table(&outcomes);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("out_alpha.txt"));
        assert!(rendered.contains("none"));
    }
}
