//! Table and JSON rendering for CLI output

use std::fmt::Write;
use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;
use textloclib::{CharacterStats, CountSnapshot, LineStats, TextlocError};

const LINE_COLUMNS: &[&str] = &["Source", "Inline", "Block", "Mixed", "Blank", "Empty", "Total"];
const CHAR_COLUMNS: &[&str] = &[
    "Alpha", "Numeric", "Special", "Space", "Comment", "Source", "Total",
];

const CELL_WIDTH: usize = 10;

fn line_cells(lines: &LineStats) -> [u64; 7] {
    [
        lines.source,
        lines.inline_comments,
        lines.block_comments,
        lines.mixed,
        lines.whitespace,
        lines.empty,
        lines.total,
    ]
}

fn char_cells(chars: &CharacterStats) -> [u64; 7] {
    [
        chars.alphabetical,
        chars.numerical,
        chars.special,
        chars.whitespace,
        chars.comment,
        chars.source,
        chars.total,
    ]
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let count = name.chars().count();
    if count > max_len {
        let tail: String = name.chars().skip(count - max_len + 2).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory.
fn make_relative(path: &str, base: Option<&Path>) -> String {
    let path = Path::new(path);
    base.and_then(|base| path.strip_prefix(base).ok())
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

struct Table<'a> {
    title: &'a str,
    columns: &'a [&'a str],
    name_width: usize,
}

impl Table<'_> {
    fn width(&self) -> usize {
        self.name_width + (CELL_WIDTH + 1) * self.columns.len()
    }

    fn header(&self, out: &mut String, bold: &Style) {
        let mut line = format!("{:<width$}", self.title, width = self.name_width);
        for column in self.columns {
            let _ = write!(line, " {:>width$}", column, width = CELL_WIDTH);
        }
        let _ = writeln!(out, "{}", bold.apply_to(line));
        let _ = writeln!(out, "{}", "-".repeat(self.width()));
    }

    fn row(&self, out: &mut String, name: &str, cells: &[u64], style: Option<&Style>) {
        let truncated = truncate_name(name, self.name_width - 2);
        let mut line = format!("{:<width$}", truncated, width = self.name_width);
        for cell in cells {
            let _ = write!(line, " {:>width$}", cell, width = CELL_WIDTH);
        }
        match style {
            Some(style) => {
                let _ = writeln!(out, "{}", style.apply_to(line));
            }
            None => {
                let _ = writeln!(out, "{line}");
            }
        }
    }
}

/// Render line and character tables.
///
/// With `by_file`, every counted file gets a row above the total, with its
/// path shown relative to `base` when possible.
pub fn render_table(snapshot: &CountSnapshot, by_file: bool, base: Option<&Path>) -> String {
    let bold = Style::new().bold();
    let name_width = if by_file { 40 } else { 20 };
    let total_label = format!("Total ({} files)", snapshot.files.len());

    let tables = [
        (
            Table {
                title: "Lines",
                columns: LINE_COLUMNS,
                name_width,
            },
            true,
        ),
        (
            Table {
                title: "Characters",
                columns: CHAR_COLUMNS,
                name_width,
            },
            false,
        ),
    ];

    let mut out = String::new();
    for (idx, (table, lines)) in tables.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        table.header(&mut out, &bold);

        if by_file {
            for (name, stats) in &snapshot.files {
                let cells = if *lines {
                    line_cells(&stats.lines)
                } else {
                    char_cells(&stats.characters)
                };
                table.row(&mut out, &make_relative(name, base), &cells, None);
            }
            let _ = writeln!(out, "{}", "-".repeat(table.width()));
        }

        let totals = if *lines {
            line_cells(&snapshot.lines)
        } else {
            char_cells(&snapshot.characters)
        };
        table.row(&mut out, &total_label, &totals, Some(&bold));
    }

    out
}

#[derive(Debug, Serialize)]
struct SkippedFile {
    path: PathBuf,
    error: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<&'a std::collections::BTreeMap<String, textloclib::Statistics>>,
    file_count: usize,
    lines: &'a LineStats,
    characters: &'a CharacterStats,
    skipped: Vec<SkippedFile>,
}

/// Render the snapshot as pretty-printed JSON.
pub fn render_json(
    snapshot: &CountSnapshot,
    skipped: &[(PathBuf, TextlocError)],
    by_file: bool,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        files: by_file.then_some(&snapshot.files),
        file_count: snapshot.files.len(),
        lines: &snapshot.lines,
        characters: &snapshot.characters,
        skipped: skipped
            .iter()
            .map(|(path, error)| SkippedFile {
                path: path.clone(),
                error: error.to_string(),
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textloclib::{Aggregator, CFamilyParser};

    fn snapshot() -> CountSnapshot {
        let mut aggregator = Aggregator::new();
        aggregator.add_parser(Box::new(CFamilyParser::new()));
        aggregator
            .process("/work/src/main.c", "int x; // note\n/* block */\n\n")
            .unwrap();
        aggregator.process("/work/src/util.h", "void f();\n").unwrap();
        aggregator.statistics()
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("abcdefghijkl", 6), "..ijkl");
    }

    #[test]
    fn test_make_relative() {
        assert_eq!(
            make_relative("/work/src/main.c", Some(Path::new("/work"))),
            "src/main.c"
        );
        assert_eq!(make_relative("/other/x.c", Some(Path::new("/work"))), "/other/x.c");
        assert_eq!(make_relative("x.c", None), "x.c");
    }

    #[test]
    fn test_render_table_totals() {
        let out = render_table(&snapshot(), false, None);

        assert!(out.contains("Lines"));
        assert!(out.contains("Characters"));
        assert!(out.contains("Mixed"));
        assert!(out.contains("Total (2 files)"));
        assert!(!out.contains("main.c"));
    }

    #[test]
    fn test_render_table_by_file() {
        let out = render_table(&snapshot(), true, Some(Path::new("/work")));

        assert!(out.contains("src/main.c"));
        assert!(out.contains("src/util.h"));
        assert!(!out.contains("/work/src"));
    }

    #[test]
    fn test_render_json() {
        let skipped = vec![(PathBuf::from("empty.c"), TextlocError::EmptyContents)];
        let json = render_json(&snapshot(), &skipped, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file_count"], 2);
        assert_eq!(value["lines"]["total"], 4);
        assert_eq!(value["lines"]["mixed"], 1);
        assert_eq!(value["lines"]["block_comments"], 1);
        assert_eq!(value["lines"]["empty"], 1);
        assert_eq!(value["skipped"][0]["path"], "empty.c");
        assert!(value["files"]["/work/src/util.h"].is_object());
    }

    #[test]
    fn test_render_json_without_files() {
        let json = render_json(&snapshot(), &[], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("files").is_none());
        assert_eq!(value["lines"]["source"], 1);
    }
}
