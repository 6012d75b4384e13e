//! Change records: the operation alphabet of the history file
//!
//! Each variant corresponds to one cue word. Adding a cue is purely additive:
//! the tree folder and the differ match per variant.

use crate::artifacts::log::record::Record;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::patch::Patch;
use anyhow::Context;

/// A filesystem edit recorded in the history file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create an empty file
    Touch { path: String },
    /// Create or replace a text file; the body carries the content
    Write {
        path: String,
        id: ObjectId,
        content: String,
    },
    /// Create or replace a binary file; the body carries base64 content
    Binary {
        path: String,
        id: ObjectId,
        size: u64,
        content: String,
    },
    /// Remove a path
    Delete { path: String },
    /// Create a directory
    Mkdir { path: String },
    /// Move a path
    Rename { from: String, to: String },
    /// Edit a text file in place; `id` is the post-patch blob hash
    Patch {
        path: String,
        id: ObjectId,
        script: Patch,
    },
}

impl Operation {
    pub fn cue(&self) -> &'static str {
        match self {
            Operation::Touch { .. } => "touch",
            Operation::Write { .. } => "write",
            Operation::Binary { .. } => "binary",
            Operation::Delete { .. } => "delete",
            Operation::Mkdir { .. } => "mkdir",
            Operation::Rename { .. } => "rename",
            Operation::Patch { .. } => "patch",
        }
    }

    /// The path this operation creates or updates, if any
    pub fn target_path(&self) -> &str {
        match self {
            Operation::Touch { path }
            | Operation::Write { path, .. }
            | Operation::Binary { path, .. }
            | Operation::Delete { path }
            | Operation::Mkdir { path }
            | Operation::Patch { path, .. } => path,
            Operation::Rename { to, .. } => to,
        }
    }

    pub fn to_record(&self) -> Record {
        match self {
            Operation::Touch { path } => Record::new("touch", path.clone()),
            Operation::Write { path, id, content } => {
                let rest = format!("{path} {id}");
                if content.is_empty() {
                    Record::new("write", rest)
                } else {
                    Record::with_body("write", rest, content.clone())
                }
            }
            Operation::Binary {
                path,
                id,
                size,
                content,
            } => {
                let rest = format!("{path} {id} {size}");
                if content.is_empty() {
                    Record::new("binary", rest)
                } else {
                    Record::with_body("binary", rest, content.clone())
                }
            }
            Operation::Delete { path } => Record::new("delete", path.clone()),
            Operation::Mkdir { path } => Record::new("mkdir", path.clone()),
            Operation::Rename { from, to } => Record::new("rename", format!("{from} {to}")),
            Operation::Patch { path, id, script } => Record::with_body(
                "patch",
                format!("{path} {id}"),
                script
                    .serialize()
                    .strip_suffix('\n')
                    .unwrap_or_default()
                    .to_string(),
            ),
        }
    }
}

impl TryFrom<&Record> for Operation {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let atoms = record.atoms();
        let body = || record.body().unwrap_or_default().to_string();

        match record.cue() {
            "touch" => match atoms.as_slice() {
                [path] => Ok(Operation::Touch {
                    path: path.to_string(),
                }),
                _ => Err(malformed(record, "touch takes a path")),
            },
            "write" => match atoms.as_slice() {
                [path, id] => Ok(Operation::Write {
                    path: path.to_string(),
                    id: ObjectId::try_parse(id.to_string())?,
                    content: body(),
                }),
                _ => Err(malformed(record, "write takes a path and a hash")),
            },
            "binary" => match atoms.as_slice() {
                [path, id, size] => Ok(Operation::Binary {
                    path: path.to_string(),
                    id: ObjectId::try_parse(id.to_string())?,
                    size: size
                        .parse()
                        .with_context(|| format!("invalid binary size '{size}'"))?,
                    content: body(),
                }),
                _ => Err(malformed(record, "binary takes a path, a hash and a size")),
            },
            "delete" => match atoms.as_slice() {
                [path] => Ok(Operation::Delete {
                    path: path.to_string(),
                }),
                _ => Err(malformed(record, "delete takes a path")),
            },
            "mkdir" => match atoms.as_slice() {
                [path] => Ok(Operation::Mkdir {
                    path: path.to_string(),
                }),
                _ => Err(malformed(record, "mkdir takes a path")),
            },
            "rename" => match atoms.as_slice() {
                [from, to] => Ok(Operation::Rename {
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                _ => Err(malformed(record, "rename takes a source and a destination")),
            },
            "patch" => match atoms.as_slice() {
                [path, id] => Ok(Operation::Patch {
                    path: path.to_string(),
                    id: ObjectId::try_parse(id.to_string())?,
                    script: Patch::parse(record.body().with_context(|| {
                        format!("malformed record: patch on '{path}' has no script body")
                    })?)?,
                }),
                _ => Err(malformed(record, "patch takes a path and a hash")),
            },
            other => anyhow::bail!("malformed record: unknown cue '{other}'"),
        }
    }
}

fn malformed(record: &Record, expectation: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "malformed record: '{} {}': {expectation}",
        record.cue(),
        record.rest()
    )
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Rename { from, to } => write!(f, "rename {from} -> {to}"),
            other => write!(f, "{} {}", other.cue(), other.target_path()),
        }
    }
}
