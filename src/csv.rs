// src/csv.rs
//
// Minimal delimited-text writer. A field is quoted when it contains the
// separator, a quote, or a line break; embedded quotes are doubled.

use std::borrow::Cow;
use std::io::{self, Write};

fn escape(field: &str, sep: char) -> Cow<'_, str> {
    let quote = field.chars().any(|c| c == sep || matches!(c, '"' | '\n' | '\r'));
    if quote {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn encode_row(row: &[String], sep: char) -> String {
    let mut line = row
        .iter()
        .map(|cell| escape(cell, sep))
        .collect::<Vec<_>>()
        .join(sep.encode_utf8(&mut [0; 4]));
    line.push('\n');
    line
}

/// One row, newline-terminated.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    w.write_all(encode_row(row, sep).as_bytes())
}
