//! Delimited-text tokenizer for uploaded customer files
//!
//! The reader produces a header row plus ordered data rows without interpreting
//! any cell content. Cells are kept verbatim (no trimming); normalization is a
//! per-consumer decision. Quoted cells may contain commas, doubled-quote
//! escapes, and line breaks. Blank lines are skipped so exports padded with
//! trailing newlines parse cleanly.

use thiserror::Error;

/// Errors raised while tokenizing an input file
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file contained no rows at all
    #[error("Input is empty: no header row found")]
    EmptyInput,

    /// The first row exists but holds no usable column names
    #[error("Header row is blank: column names are required for schema detection")]
    BlankHeader,

    /// A quoted cell was opened but never closed before end of input
    #[error("Unterminated quoted cell starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// A tokenized delimited file: one header row plus ordered data rows.
///
/// Rows may be ragged relative to the header; consumers treat missing cells
/// as empty strings.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Column names from the first non-blank line
    pub headers: Vec<String>,

    /// Data rows in file order
    pub rows: Vec<Vec<String>>,
}

/// Tokenizes CSV content into a header row and data rows.
///
/// # Errors
///
/// Returns `ParseError` when the input is empty, the header row is blank, or
/// a quoted cell is never terminated.
pub fn parse_csv(content: &str) -> Result<ParsedCsv, ParseError> {
    let mut records = tokenize(content)?.into_iter();

    let headers = records.next().ok_or(ParseError::EmptyInput)?;
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::BlankHeader);
    }

    Ok(ParsedCsv {
        headers,
        rows: records.collect(),
    })
}

/// Splits raw content into records, honoring quoting and skipping blank lines.
fn tokenize(content: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    // Doubled quote unescapes to a single literal quote
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if cell.is_empty() => {
                // Quoting is only special at the start of a cell
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut cell)),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    // Lone carriage return acts as a line break; the usual
                    // CRLF pair is handled by the newline branch below.
                    line += 1;
                    record.push(std::mem::take(&mut cell));
                    end_record(&mut records, &mut record);
                }
            }
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut cell));
                end_record(&mut records, &mut record);
            }
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote { line: quote_line });
    }

    // Final record when the file has no trailing newline
    if !cell.is_empty() || !record.is_empty() {
        record.push(cell);
        end_record(&mut records, &mut record);
    }

    Ok(records)
}

/// Commits a finished record, dropping blank lines (a single empty cell).
fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>) {
    if record.len() == 1 && record[0].is_empty() {
        record.clear();
        return;
    }
    records.push(std::mem::take(record));
}
