//! Pipe table parsing.

use std::sync::LazyLock;

use regex::Regex;

use diagdoc_docx::Table;

use crate::inline::strip_inline_markup;

/// Delimiter row: only pipes, dashes, colons and whitespace.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?[\s\-|:]+\|?\s*$").unwrap());

/// Check whether a table line is a header/body delimiter row.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
    SEPARATOR_RE.is_match(line)
}

/// Split a table line into trimmed cells.
///
/// One leading and one trailing empty cell (from outer pipes) are removed.
/// Inline markup is stripped from the cell text.
#[must_use]
pub fn parse_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(strip_inline_markup).collect()
}

/// Build a table from buffered lines.
///
/// Returns `None` when no data rows remain after dropping delimiter rows.
/// The first row sets the column count: longer rows are truncated, shorter
/// rows padded with empty cells.
#[must_use]
pub fn parse_table(lines: &[String]) -> Option<Table> {
    let mut rows: Vec<Vec<String>> = lines
        .iter()
        .filter(|line| line.contains('|') && !is_separator_row(line))
        .map(|line| parse_row(line))
        .filter(|cells| !cells.is_empty())
        .collect();

    let columns = rows.first()?.len();
    for row in &mut rows {
        row.resize(columns, String::new());
    }

    Some(Table {
        rows,
        header_row: true,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: |"));
        assert!(is_separator_row("---|---"));
        assert!(!is_separator_row("| A | B |"));
        assert!(!is_separator_row("| 1 | - |"));
    }

    #[test]
    fn test_parse_row_trims_outer_cells() {
        assert_eq!(parse_row("| A |  B |"), vec!["A", "B"]);
        assert_eq!(parse_row("A | B"), vec!["A", "B"]);
        assert_eq!(parse_row("| A || C |"), vec!["A", "", "C"]);
    }

    #[test]
    fn test_parse_row_strips_markup() {
        assert_eq!(
            parse_row("| **topic** | `cmd/req` |"),
            vec!["topic", "cmd/req"]
        );
    }

    #[test]
    fn test_parse_table_round_trip() {
        let table = parse_table(&lines(&["| A | B |", "|---|---|", "| 1 | 2 |"])).unwrap();

        assert_eq!(
            table.rows,
            vec![
                vec!["A".to_owned(), "B".to_owned()],
                vec!["1".to_owned(), "2".to_owned()],
            ]
        );
        assert!(table.header_row);
    }

    #[test]
    fn test_parse_table_normalizes_row_width() {
        let table = parse_table(&lines(&["| A | B |", "| 1 |", "| x | y | z |"])).unwrap();

        assert_eq!(
            table.rows,
            vec![
                vec!["A".to_owned(), "B".to_owned()],
                vec!["1".to_owned(), String::new()],
                vec!["x".to_owned(), "y".to_owned()],
            ]
        );
    }

    #[test]
    fn test_parse_table_only_separators() {
        assert_eq!(parse_table(&lines(&["|---|---|"])), None);
        assert_eq!(parse_table(&[]), None);
    }
}
