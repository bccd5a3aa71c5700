//! Delimited table reader for the catalog files
//!
//! The catalogs ship as plain text tables: one header line, a configurable
//! column separator, and a second separator between the elements of a
//! multi-valued cell. Rows are accessed through typed column lookups that
//! carry file and line context in their errors, so a malformed cell fails
//! the load instead of leaking an empty value into the model.

use crate::core::error::{PlanError, Result};

/// A parsed table: header names plus raw rows, still untyped.
#[derive(Debug, Clone)]
pub struct Table {
    file: String,
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
struct RawRow {
    line: usize,
    cells: Vec<String>,
}

impl Table {
    /// Parse raw table text. `file` is used for error context only. Both
    /// `\n` and `\r\n` line endings are accepted; blank lines are skipped.
    pub fn parse(file: &str, raw: &str, column_delimiter: char) -> Result<Self> {
        let mut lines = raw.lines().enumerate();
        let (_, header_line) = lines
            .next()
            .ok_or_else(|| catalog_error(file, 1, "table is empty".to_string()))?;
        let headers: Vec<String> = header_line
            .split(column_delimiter)
            .map(|h| h.trim().to_string())
            .collect();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                return Err(catalog_error(file, 1, format!("header {} is empty", i + 1)));
            }
            if headers[..i].contains(header) {
                return Err(catalog_error(file, 1, format!("duplicate header '{header}'")));
            }
        }

        let mut rows = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<String> = line
                .split(column_delimiter)
                .map(|c| c.trim().to_string())
                .collect();
            if cells.len() != headers.len() {
                return Err(catalog_error(
                    file,
                    idx + 1,
                    format!("expected {} columns, found {}", headers.len(), cells.len()),
                ));
            }
            rows.push(RawRow { line: idx + 1, cells });
        }

        Ok(Self {
            file: file.to_string(),
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |raw| Row { table: self, raw })
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

/// One table row with typed, error-contextual column access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    raw: &'a RawRow,
}

impl<'a> Row<'a> {
    pub fn line(&self) -> usize {
        self.raw.line
    }

    pub fn str(&self, column: &str) -> Result<&'a str> {
        let idx = self
            .table
            .column_index(column)
            .ok_or_else(|| self.error(format!("missing column '{column}'")))?;
        Ok(self.raw.cells[idx].as_str())
    }

    /// Cell parsed as an integer.
    pub fn int(&self, column: &str) -> Result<i64> {
        let value = self.str(column)?;
        value
            .parse()
            .map_err(|_| self.error(format!("column '{column}': '{value}' is not an integer")))
    }

    /// Cell interpreted as a presence flag: `"1"` is true, anything else
    /// false.
    pub fn flag(&self, column: &str) -> Result<bool> {
        Ok(self.str(column)? == "1")
    }

    /// Multi-valued cell, split on the array delimiter. An empty cell is an
    /// empty list.
    pub fn list(&self, column: &str, array_delimiter: char) -> Result<Vec<String>> {
        Ok(self
            .str(column)?
            .split(array_delimiter)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    fn error(&self, message: String) -> PlanError {
        catalog_error(&self.table.file, self.raw.line, message)
    }
}

fn catalog_error(file: &str, line: usize, message: String) -> PlanError {
    PlanError::Catalog {
        file: file.to_string(),
        line,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_crlf_and_trailing_newline() {
        let table = Table::parse("t", "Zone;Weight\r\nA1;3\r\nA2;5\r\n", ';').unwrap();
        assert_eq!(table.headers(), ["Zone", "Weight"]);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].str("Zone").unwrap(), "A1");
        assert_eq!(rows[1].int("Weight").unwrap(), 5);
    }

    #[test]
    fn test_missing_column_reports_line() {
        let table = Table::parse("zones.csv", "Zone;Weight\nA1;3\n", ';').unwrap();
        let row = table.rows().next().unwrap();
        let err = row.str("Cost").unwrap_err();
        match err {
            PlanError::Catalog { file, line, message } => {
                assert_eq!(file, "zones.csv");
                assert_eq!(line, 2);
                assert!(message.contains("Cost"), "unexpected message: {message}");
            }
            other => panic!("expected catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_integer_is_an_error() {
        let table = Table::parse("t", "Zone;Weight\nA1;heavy\n", ';').unwrap();
        let row = table.rows().next().unwrap();
        assert!(row.int("Weight").is_err());
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        assert!(Table::parse("t", "A;B\n1\n", ';').is_err());
    }

    #[test]
    fn test_duplicate_header_is_an_error() {
        assert!(Table::parse("t", "A;A\n1;2\n", ';').is_err());
    }

    #[test]
    fn test_flag_and_list() {
        let table = Table::parse("t", "Name;Materials;Search?\nx;a|b| c;1\ny;;0\n", ';').unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert!(rows[0].flag("Search?").unwrap());
        assert_eq!(rows[0].list("Materials", '|').unwrap(), ["a", "b", "c"]);
        assert!(!rows[1].flag("Search?").unwrap());
        assert!(rows[1].list("Materials", '|').unwrap().is_empty());
    }
}
