//! Minimal reader for delimiter-separated text with a header row.
//!
//! Handles double-quoted fields (embedded delimiters, line breaks and `""`
//! escapes), a leading UTF-8 byte-order mark and blank lines. A quote only
//! opens a quoted section at the start of a field; anywhere else it is kept
//! as a literal character.

use crate::error::RowRejection;

const BOM: char = '\u{feff}';

/// One data record together with the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// Records whose quoted field never closed. Reading resumes on the next line.
    pub malformed: Vec<RowRejection>,
}

pub fn parse(data: &[u8], delimiter: char) -> Result<Table, String> {
    let text = std::str::from_utf8(data).map_err(|e| format!("invalid UTF-8: {e}"))?;
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let (records, malformed) = split_records(text, delimiter);
    let mut records = records.into_iter();
    let header = records.next();

    if let Some(first_bad) = malformed.first() {
        if header.as_ref().map_or(true, |h| first_bad.line < h.line) {
            return Err(format!("header row at line {} has an unclosed quote", first_bad.line));
        }
    }
    let header = header.ok_or("file is empty")?;
    if header.fields.iter().all(|h| h.trim().is_empty()) {
        return Err("header row is empty".into());
    }

    Ok(Table {
        headers: header.fields,
        records: records.collect(),
        malformed,
    })
}

fn split_records(text: &str, delimiter: char) -> (Vec<Record>, Vec<RowRejection>) {
    let mut out = Vec::new();
    let mut malformed = Vec::new();
    let mut offset = 0;
    let mut line = 1;

    while let Some(open) = scan(&text[offset..], delimiter, line, &mut out) {
        malformed.push(RowRejection {
            line: open.start_line,
            reason: "quoted field is not closed before end of file".into(),
        });
        match open.resume {
            Some(resume) => {
                offset += resume;
                line = open.start_line + 1;
            }
            None => break,
        }
    }
    (out, malformed)
}

/// A record whose quoted field ran to end of input.
struct Unclosed {
    start_line: usize,
    /// Byte offset of the line following the record's first line.
    resume: Option<usize>,
}

fn scan(text: &str, delimiter: char, first_line: usize, out: &mut Vec<Record>) -> Option<Unclosed> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false; // current field opened with a quote
    let mut line = first_line;
    let mut start_line = first_line;
    let mut record_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if in_quotes {
            match ch {
                '"' if matches!(chars.peek(), Some((_, '"'))) => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    current.push(ch);
                }
                _ => current.push(ch),
            }
        } else if ch == '"' && current.is_empty() && !quoted {
            in_quotes = true;
            quoted = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut current));
            quoted = false;
        } else if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            // swallowed; the '\n' ends the record
        } else if ch == '\n' {
            push_record(out, &mut fields, &mut current, start_line);
            quoted = false;
            line += 1;
            start_line = line;
            record_start = i + 1;
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        let resume = text[record_start..]
            .find('\n')
            .map(|n| record_start + n + 1);
        return Some(Unclosed { start_line, resume });
    }
    if !current.is_empty() || !fields.is_empty() || quoted {
        push_record(out, &mut fields, &mut current, start_line);
    }
    None
}

fn push_record(out: &mut Vec<Record>, fields: &mut Vec<String>, current: &mut String, line: usize) {
    fields.push(std::mem::take(current));
    let fields = std::mem::take(fields);
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        out.push(Record { line, fields });
    }
}
