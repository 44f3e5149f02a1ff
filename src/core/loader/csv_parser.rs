//! Catalog CSV bundle parser
//!
//! Layout produced by the catalog scraper:
//! - `nodes.csv`: `Course ID,Full Title` (optional `Category` column)
//! - `connections.csv`: `Source,Target,Color`; `Source` is the course that
//!   *has* the requirement, `Target` the required course, `red` marks a
//!   prerequisite and `blue` a corequisite
//! - `descriptions.csv` (optional): `Course ID,Description`

use super::LoadError;
use crate::core::models::{Course, GraphData, Relation};
use crate::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Course list file name
pub const NODES_FILE: &str = "nodes.csv";
/// Requisite edge file name
pub const CONNECTIONS_FILE: &str = "connections.csv";
/// Optional description file name
pub const DESCRIPTIONS_FILE: &str = "descriptions.csv";

/// Rows of one CSV file with header lookup
struct CsvTable {
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl CsvTable {
    fn read(path: &Path, required: &[&str]) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let headers = lines
            .next()
            .map(|(_, line)| parse_csv_line(line.trim_start_matches('\u{feff}')))
            .ok_or_else(|| LoadError::Csv {
                path: path.to_path_buf(),
                line: 1,
                message: "empty file".to_string(),
            })?;

        for column in required {
            if !headers.iter().any(|h| h.eq_ignore_ascii_case(column)) {
                return Err(LoadError::Csv {
                    path: path.to_path_buf(),
                    line: 1,
                    message: format!("missing '{column}' column"),
                });
            }
        }

        let rows = lines
            .map(|(idx, line)| (idx + 1, parse_csv_line(line)))
            .collect();
        Ok(Self { headers, rows })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }
}

fn field(row: &[String], column: Option<usize>) -> Option<&str> {
    column
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Split a CSV line into trimmed fields
///
/// Double-quoted fields may contain commas; `""` inside quotes is a literal quote.
#[must_use]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Canonical course id: non-breaking spaces and runs of whitespace become one space
#[must_use]
pub fn normalize_id(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a catalog title such as `Circuits and Signals. (4 Hours)` into name and credits
///
/// Credit ranges like `(1-4 Hours)` yield the upper bound.
#[must_use]
pub fn parse_full_title(title: &str) -> (Option<String>, Option<u32>) {
    let title = title.trim();
    let (name, credits) = match title.rfind('(') {
        Some(open) if title.ends_with(')') => {
            let inner = title[open + 1..title.len() - 1].trim();
            let hours = inner
                .strip_suffix("Hours")
                .or_else(|| inner.strip_suffix("Hour"))
                .and_then(|n| n.trim().rsplit('-').next())
                .and_then(|n| n.trim().parse::<u32>().ok());
            match hours {
                Some(hours) => (&title[..open], Some(hours)),
                None => (title, None),
            }
        }
        _ => (title, None),
    };

    let name = name.trim().trim_end_matches('.').trim();
    ((!name.is_empty()).then(|| name.to_string()), credits)
}

/// Load a CSV bundle directory into raw graph data
///
/// # Errors
/// Returns [`LoadError`] when a required file is unreadable or lacks its columns
pub fn load_csv_bundle(dir: &Path) -> Result<GraphData, LoadError> {
    let mut data = GraphData::default();
    let mut known: HashSet<String> = HashSet::new();

    let nodes = CsvTable::read(&dir.join(NODES_FILE), &["Course ID"])?;
    let (id_col, title_col, category_col) = (
        nodes.column("Course ID"),
        nodes.column("Full Title"),
        nodes.column("Category"),
    );
    for (line, row) in &nodes.rows {
        let Some(id) = field(row, id_col).map(normalize_id) else {
            debug!("{NODES_FILE}:{line}: row without a course id skipped");
            continue;
        };
        if !known.insert(id.clone()) {
            continue;
        }
        let (name, credits) = field(row, title_col).map_or((None, None), parse_full_title);
        let mut course = Course::new(id);
        course.name = name;
        course.credits = credits;
        if let Some(category) = field(row, category_col) {
            course = course.with_category(category);
        }
        data.nodes.push(course);
    }

    let connections = CsvTable::read(&dir.join(CONNECTIONS_FILE), &["Source", "Target", "Color"])?;
    let (source_col, target_col, color_col) = (
        connections.column("Source"),
        connections.column("Target"),
        connections.column("Color"),
    );
    for (line, row) in &connections.rows {
        let (Some(dependent), Some(required)) = (
            field(row, source_col).map(normalize_id),
            field(row, target_col).map(normalize_id),
        ) else {
            debug!("{CONNECTIONS_FILE}:{line}: incomplete connection skipped");
            continue;
        };

        let relation = match field(row, color_col).map(str::to_ascii_lowercase).as_deref() {
            Some("red") => Relation::prerequisite(required.clone(), dependent.clone()),
            Some("blue") => Relation::corequisite(required.clone(), dependent.clone()),
            other => {
                debug!("{CONNECTIONS_FILE}:{line}: unknown color {other:?} skipped");
                continue;
            }
        };

        for id in [dependent, required] {
            if known.insert(id.clone()) {
                data.nodes.push(Course::new(id));
            }
        }
        data.links.push(relation);
    }

    let descriptions_path = dir.join(DESCRIPTIONS_FILE);
    if descriptions_path.exists() {
        let descriptions = CsvTable::read(&descriptions_path, &["Course ID", "Description"])?;
        let (id_col, text_col) = (
            descriptions.column("Course ID"),
            descriptions.column("Description"),
        );
        for (_, row) in &descriptions.rows {
            if let (Some(id), Some(text)) = (field(row, id_col).map(normalize_id), field(row, text_col)) {
                if let Some(course) = data.nodes.iter_mut().find(|c| c.id == id) {
                    course.description = Some(text.to_string());
                }
            }
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_quotes() {
        let fields = parse_csv_line(r#"EECE 2150,"Circuits, Signals. (4 Hours)", red"#);
        assert_eq!(fields, vec!["EECE 2150", "Circuits, Signals. (4 Hours)", "red"]);

        let fields = parse_csv_line(r#"EECE 2160,"The ""Embedded"" Course",x"#);
        assert_eq!(fields[1], r#"The "Embedded" Course"#);

        assert_eq!(parse_csv_line("a,,c").len(), 3);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("EECE\u{a0}2150"), "EECE 2150");
        assert_eq!(normalize_id("  MATH   1341 "), "MATH 1341");
    }

    #[test]
    fn test_parse_full_title() {
        assert_eq!(
            parse_full_title("Circuits and Signals: Biomedical Applications. (4 Hours)"),
            (Some("Circuits and Signals: Biomedical Applications".to_string()), Some(4))
        );
        assert_eq!(
            parse_full_title("Special Topics. (1-4 Hours)"),
            (Some("Special Topics".to_string()), Some(4))
        );
        assert_eq!(parse_full_title("Lab. (1 Hour)"), (Some("Lab".to_string()), Some(1)));
        assert_eq!(
            parse_full_title("Signals (Advanced)"),
            (Some("Signals (Advanced)".to_string()), None)
        );
        assert_eq!(parse_full_title(""), (None, None));
    }
}
