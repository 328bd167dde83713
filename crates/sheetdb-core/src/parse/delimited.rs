//! Comma-delimited text with double-quote quoting.
//!
//! Single pass, one bit of state (inside a quoted field or not). Malformed
//! input never errors: the worst outcome is a misplaced field boundary.

use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

/// One parsed row of raw field text.
pub type Row = Vec<String>;

/* ---------------- Parsing ---------------- */

/// Undo the Latin-1 misrendering of UTF-8 middle dot and no-break space
/// (`Â·`, `Â `), then drop any stray `Â` left behind.
///
/// Runs once over the whole payload, before scanning.
pub fn repair_encoding(text: &str) -> Cow<'_, str> {
    if !text.contains('Â') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("Â·", "·")
            .replace("Â ", " ")
            .replace('Â', ""),
    )
}

/// Parse a payload into rows.
///
/// - `,` outside quotes ends a field
/// - CR, LF and CRLF outside quotes each end one row; a row holding a single
///   empty field is kept
/// - `""` inside a quoted field is a literal quote
/// - trailing content without a terminator is flushed as a last row
pub fn parse_rows(text: &str) -> Vec<Row> {
    let text = repair_encoding(text);

    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE => {
                if in_quotes && chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = !in_quotes;
                }
            }
            DELIMITER if !in_quotes => row.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(DELIMITER) || field.contains(QUOTE) || field.contains(['\n', '\r'])
}

/// Append one row, LF-terminated, quoting fields that need it.
fn push_row(out: &mut String, row: &[String]) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        if needs_quotes(cell) {
            out.push(QUOTE);
            for c in cell.chars() {
                if c == QUOTE {
                    out.push(QUOTE);
                }
                out.push(c);
            }
            out.push(QUOTE);
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// Write one row to `w`, LF-terminated.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut line = String::new();
    push_row(&mut line, row);
    w.write_all(line.as_bytes())
}

/// Serialize rows back to delimited text.
pub fn rows_to_string(rows: &[Row]) -> String {
    let mut out = String::new();
    for r in rows {
        push_row(&mut out, r);
    }
    out
}
