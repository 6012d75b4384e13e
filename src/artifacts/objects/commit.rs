//! Commit records
//!
//! A commit seals the operations that precede it in the history file. Its
//! fields live in the record body, one per line:
//!
//! ```text
//! commit
//!  author sami
//!  timestamp 2026-08-02T10:15:00Z
//!  order 2
//!  message Fix the frobnicator
//!  parent 9c29ff4ed2cf9c31cfbdbb8a5d42e7ef25678b4b
//!  id 4a33260e65f39a2e24e87e1ef24dcdfdcb0d1d17
//! ```
//!
//! Fields are emitted in the canonical order `author, timestamp, order,
//! [message,] [parent,] id`; parsers accept any order. The `id` is the
//! SHA-1 of the canonical preamble plus the sealed operation bytes, so it is
//! a function of the record text and not of the resulting tree.

use crate::artifacts::log::record::Record;
use crate::artifacts::objects::hasher;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

pub const COMMIT_CUE: &str = "commit";
pub const STASH_CUE: &str = "stash";

/// A parsed commit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author: String,
    /// ISO-8601 UTC timestamp, kept verbatim for byte-exact round trips
    pub timestamp: String,
    /// 1-based position in the commit chain
    pub order: u64,
    /// Single-line commit message, possibly empty
    pub message: String,
    /// Hash of the prior commit; absent on the initial commit
    pub parent: Option<ObjectId>,
    pub id: ObjectId,
}

impl CommitRecord {
    /// Build a sealed commit, deriving its id from the canonical preamble
    ///
    /// `staged_ops` is the literal serialized staged-operations block with no
    /// trailing newline, or None when sealing nothing (the initial commit).
    pub fn seal(
        author: String,
        timestamp: String,
        order: u64,
        message: String,
        parent: Option<ObjectId>,
        staged_ops: Option<&str>,
    ) -> anyhow::Result<Self> {
        let id = hasher::commit_id(&author, &timestamp, &message, parent.as_ref(), staged_ops)?;

        Ok(CommitRecord {
            author,
            timestamp,
            order,
            message,
            parent,
            id,
        })
    }

    pub fn to_record(&self) -> Record {
        let mut fields = vec![
            Record::new("author", self.author.clone()),
            Record::new("timestamp", self.timestamp.clone()),
            Record::new("order", self.order.to_string()),
        ];

        if !self.message.is_empty() {
            fields.push(Record::new("message", self.message.clone()));
        }
        if let Some(parent) = &self.parent {
            fields.push(Record::new("parent", parent.as_ref().to_string()));
        }
        fields.push(Record::new("id", self.id.as_ref().to_string()));

        let body = Record::serialize_all(&fields);
        Record::with_body(
            COMMIT_CUE,
            "",
            body.strip_suffix('\n').unwrap_or_default().to_string(),
        )
    }
}

impl TryFrom<&Record> for CommitRecord {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        if record.cue() != COMMIT_CUE {
            anyhow::bail!("expected a commit record, found '{}'", record.cue());
        }

        let mut author = None;
        let mut timestamp = None;
        let mut order = None;
        let mut message = String::new();
        let mut parent = None;
        let mut id = None;

        for field in record.children().context("malformed commit record")? {
            let value = field.rest().to_string();
            match field.cue() {
                "author" => author = Some(value),
                "timestamp" => timestamp = Some(value),
                "order" => {
                    order = Some(
                        value
                            .parse::<u64>()
                            .with_context(|| format!("invalid commit order '{value}'"))?,
                    )
                }
                "message" => message = value,
                "parent" => parent = Some(ObjectId::try_parse(value)?),
                "id" => id = Some(ObjectId::try_parse(value)?),
                other => anyhow::bail!("malformed commit record: unknown field '{other}'"),
            }
        }

        Ok(CommitRecord {
            author: author.context("malformed commit record: missing author")?,
            timestamp: timestamp.context("malformed commit record: missing timestamp")?,
            order: order.context("malformed commit record: missing order")?,
            message,
            parent,
            id: id.context("malformed commit record: missing id")?,
        })
    }
}
