//! Parsing and serialization of history-file records
//!
//! A record is one top-level entry of the history file:
//!
//! ```text
//! write src/main.rs 3f786850e387550fdab836ed7e6dc881de23001b
//!  fn main() {}
//! ```
//!
//! The head line carries the cue word and its fields; every following line
//! that starts with a space belongs to the body, with exactly one leading
//! space stripped. The remainder of the head line after the cue is kept
//! verbatim so that free-text fields (commit messages, single-line insert
//! text) survive a parse/serialize round trip byte-exactly.
//!
//! ## Contract
//!
//! `Record::parse_all` followed by `serialize_all` reproduces the input
//! byte-for-byte for any text this module itself produced. Trailing blank
//! lines are tolerated on parse.

use anyhow::Context;
use bytes::Bytes;

/// One top-level entry of the history file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Cue word (first token of the head line)
    cue: String,
    /// Remainder of the head line after the cue, verbatim (may be empty)
    rest: String,
    /// Body text with one leading space per line stripped; interior newlines
    /// are preserved exactly
    body: Option<String>,
}

impl Record {
    pub fn new(cue: impl Into<String>, rest: impl Into<String>) -> Self {
        Record {
            cue: cue.into(),
            rest: rest.into(),
            body: None,
        }
    }

    pub fn with_body(cue: impl Into<String>, rest: impl Into<String>, body: impl Into<String>) -> Self {
        Record {
            cue: cue.into(),
            rest: rest.into(),
            body: Some(body.into()),
        }
    }

    pub fn cue(&self) -> &str {
        &self.cue
    }

    pub fn rest(&self) -> &str {
        &self.rest
    }

    /// Whitespace-split view of the head-line fields
    pub fn atoms(&self) -> Vec<&str> {
        self.rest.split_whitespace().collect()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Parse a whole record sequence from file text
    ///
    /// A line starting in column 0 opens a new record; a line starting with a
    /// space continues the current record's body. Blank lines between records
    /// are skipped, which also covers trailing blank lines at end of file.
    pub fn parse_all(text: &str) -> anyhow::Result<Vec<Record>> {
        let mut records: Vec<Record> = Vec::new();
        let mut body_lines: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            if let Some(body_line) = line.strip_prefix(' ') {
                if records.is_empty() {
                    anyhow::bail!("malformed history file: body line before any record");
                }
                body_lines.push(body_line);
            } else if line.is_empty() {
                Self::flush_body(&mut records, &mut body_lines)?;
            } else {
                Self::flush_body(&mut records, &mut body_lines)?;

                let (cue, rest) = match line.split_once(' ') {
                    Some((cue, rest)) => (cue, rest),
                    None => (line, ""),
                };
                records.push(Record::new(cue, rest));
            }
        }
        Self::flush_body(&mut records, &mut body_lines)?;

        Ok(records)
    }

    fn flush_body(records: &mut [Record], body_lines: &mut Vec<&str>) -> anyhow::Result<()> {
        if body_lines.is_empty() {
            return Ok(());
        }

        let record = records.last_mut().expect("body lines imply a record");
        if record.body.is_some() {
            anyhow::bail!(
                "malformed history file: record '{}' has a body split by a blank line",
                record.cue
            );
        }
        record.body = Some(body_lines.join("\n"));
        body_lines.clear();

        Ok(())
    }

    /// Serialize this record back to its file form, trailing newline included
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        out.push_str(&self.cue);
        if !self.rest.is_empty() {
            out.push(' ');
            out.push_str(&self.rest);
        }
        out.push('\n');

        if let Some(body) = &self.body {
            for line in body.split('\n') {
                out.push(' ');
                out.push_str(line);
                out.push('\n');
            }
        }

        out
    }

    /// Serialize a record sequence, e.g. the whole history file or a staged block
    pub fn serialize_all(records: &[Record]) -> String {
        records.iter().map(Record::serialize).collect()
    }

    /// Serialize a record sequence to bytes ready for a single append call
    pub fn serialize_all_bytes(records: &[Record]) -> Bytes {
        Bytes::from(Self::serialize_all(records))
    }

    /// Parse the body of this record as a nested record sequence
    ///
    /// Used for `stash` records (whose children are operations) and for
    /// commit records (whose children are metadata fields).
    pub fn children(&self) -> anyhow::Result<Vec<Record>> {
        let body = self
            .body()
            .with_context(|| format!("record '{}' has no body to parse", self.cue))?;
        Self::parse_all(body)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}
