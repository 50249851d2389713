//! Minimal CSV reading and writing.
//!
//! Covers exactly what the court table and the week sheets need: quoted
//! fields, doubled-quote escapes, CRLF tolerance. Not a general CSV library.

use std::io::{self, Write};
use std::mem::take;

/// Parse delimiter-separated rows. Quotes and CRLF tolerant.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush the trailing row when the input does not end with a newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer, quoting fields that need it.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let rows = parse_rows("a,b,c\nd,e,f\n", ',');
        assert_eq!(rows, vec![row(&["a", "b", "c"]), row(&["d", "e", "f"])]);
    }

    #[test]
    fn test_parse_quoted_and_crlf() {
        let rows = parse_rows("\"x,y\",z\r\n\"he said \"\"hi\"\"\",w\r\n", ',');
        assert_eq!(rows[0], row(&["x,y", "z"]));
        assert_eq!(rows[1], row(&["he said \"hi\"", "w"]));
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        let rows = parse_rows("a,b", ',');
        assert_eq!(rows, vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse_rows("a,b\n\nc,d\n", ',');
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_write_row_quotes_when_needed() {
        let mut out = Vec::new();
        write_row(&mut out, &row(&["plain", "with,comma", "with \"quote\""]), ',').unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "plain,\"with,comma\",\"with \"\"quote\"\"\"\n"
        );
    }

    #[test]
    fn test_roundtrip() {
        let original = vec![row(&["a", "b,c"]), row(&["d\ne", "f"])];
        let mut out = Vec::new();
        for r in &original {
            write_row(&mut out, r, ',').unwrap();
        }
        let parsed = parse_rows(&String::from_utf8(out).unwrap(), ',');
        assert_eq!(parsed, original);
    }
}
