//! Minimal CSV reader for the import source
//!
//! Handles a header row, comma separators, double-quoted fields with `""`
//! escapes, and LF or CRLF line endings. Blank lines are skipped.

/// Parsed CSV with named columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parses `text`; the first non-blank line is the header row.
    pub fn parse(text: &str) -> Self {
        let mut lines = parse_rows(text).into_iter();
        let headers = lines
            .next()
            .map(|h| h.into_iter().map(|c| c.trim().to_string()).collect())
            .unwrap_or_default();

        Self {
            headers,
            rows: lines.collect(),
        }
    }

    /// Index of a header, compared case-sensitively
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `column` of `row`, empty when the row is short
    pub fn cell<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
            }
            other => field.push(other),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    let blank = row.iter().all(|f| f.trim().is_empty());
    if !blank {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let table = CsvTable::parse("Name,Type1,Type2\nBulbasaur,Grass,Poison\nCharmander,Fire,\n");
        assert_eq!(table.headers, vec!["Name", "Type1", "Type2"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Charmander", "Fire", ""]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = CsvTable::parse("Name,Note\r\n\"Mr. Mime\",\"says \"\"hi\"\", twice\"\r\n");
        assert_eq!(table.rows[0], vec!["Mr. Mime", "says \"hi\", twice"]);
    }

    #[test]
    fn test_blank_lines_and_missing_trailing_newline() {
        let table = CsvTable::parse("Name\n\nPikachu\n\nRaichu");
        assert_eq!(table.rows, vec![vec!["Pikachu"], vec!["Raichu"]]);
    }

    #[test]
    fn test_short_row_cells_are_empty() {
        let table = CsvTable::parse("Name,Type1,Type2\nDitto,Normal");
        let row = &table.rows[0];
        assert_eq!(table.cell(row, 2), "");
        assert_eq!(table.column("Type1"), Some(1));
        assert_eq!(table.column("type1"), None);
    }
}
