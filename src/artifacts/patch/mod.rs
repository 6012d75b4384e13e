//! Line-independent textual patches
//!
//! A patch describes the edits turning one text into another as a sequence of
//! `delete`/`insert` operations positioned in the **pre-patch** character
//! stream. Positions track the offset as if the edits were applied
//! left-to-right to the original string: the cursor advances over equal runs
//! and over inserted text, but not over deletions, because later operations
//! are still addressed in old-file coordinates shifted by what was already
//! inserted on the new side. Applying the operations in emitted order is what
//! makes this representation self-consistent.
//!
//! ## Script grammar
//!
//! The script reuses the record grammar one nesting level down:
//!
//! ```text
//! delete 12 5
//! insert 12 replacement
//! insert 40
//!  multi-line
//!  text
//! ```
//!
//! Single-line insert text is the raw remainder of the head line; text
//! containing a newline moves to the body form.

use crate::artifacts::log::record::Record;
use anyhow::Context;
use similar::{ChangeTag, TextDiff};

/// One edit of a patch script, positioned in pre-patch character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Remove `len` characters starting at `pos`
    Delete { pos: usize, len: usize },
    /// Insert `text` at `pos`
    Insert { pos: usize, text: String },
}

/// A patch script transforming one text into another
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total characters touched by the script (deleted plus inserted)
    pub fn changed_chars(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                PatchOp::Delete { len, .. } => *len,
                PatchOp::Insert { text, .. } => text.chars().count(),
            })
            .sum()
    }

    /// Derive the patch turning `old` into `new`
    ///
    /// Walks a character-level diff, merging runs of equal-tagged changes.
    /// Equal runs and insertions advance the cursor; deletions do not.
    pub fn between(old: &str, new: &str) -> Self {
        let diff = TextDiff::from_chars(old, new);

        let mut ops = Vec::new();
        let mut pos = 0usize;
        let mut run_tag: Option<ChangeTag> = None;
        let mut run = String::new();

        let mut flush = |tag: Option<ChangeTag>, run: &mut String, pos: &mut usize, ops: &mut Vec<PatchOp>| {
            match tag {
                Some(ChangeTag::Equal) => *pos += run.chars().count(),
                Some(ChangeTag::Delete) => ops.push(PatchOp::Delete {
                    pos: *pos,
                    len: run.chars().count(),
                }),
                Some(ChangeTag::Insert) => {
                    let len = run.chars().count();
                    ops.push(PatchOp::Insert {
                        pos: *pos,
                        text: std::mem::take(run),
                    });
                    *pos += len;
                }
                None => {}
            }
            run.clear();
        };

        for change in diff.iter_all_changes() {
            if run_tag != Some(change.tag()) {
                flush(run_tag, &mut run, &mut pos, &mut ops);
                run_tag = Some(change.tag());
            }
            run.push_str(change.value());
        }
        flush(run_tag, &mut run, &mut pos, &mut ops);

        Patch { ops }
    }

    /// Apply the script to `old`, splicing each edit in emitted order
    pub fn apply(&self, old: &str) -> anyhow::Result<String> {
        let mut result: Vec<char> = old.chars().collect();

        for op in &self.ops {
            match op {
                PatchOp::Delete { pos, len } => {
                    if pos + len > result.len() {
                        anyhow::bail!(
                            "malformed patch: delete {} {} exceeds text of {} characters",
                            pos,
                            len,
                            result.len()
                        );
                    }
                    result.splice(*pos..pos + len, std::iter::empty());
                }
                PatchOp::Insert { pos, text } => {
                    if *pos > result.len() {
                        anyhow::bail!(
                            "malformed patch: insert at {} exceeds text of {} characters",
                            pos,
                            result.len()
                        );
                    }
                    result.splice(*pos..*pos, text.chars());
                }
            }
        }

        Ok(result.into_iter().collect())
    }

    /// Serialize the script in the record grammar, trailing newline included
    pub fn serialize(&self) -> String {
        let records = self
            .ops
            .iter()
            .map(|op| match op {
                PatchOp::Delete { pos, len } => Record::new("delete", format!("{pos} {len}")),
                PatchOp::Insert { pos, text } if text.contains('\n') => {
                    Record::with_body("insert", pos.to_string(), text.clone())
                }
                PatchOp::Insert { pos, text } => Record::new("insert", format!("{pos} {text}")),
            })
            .collect::<Vec<_>>();

        Record::serialize_all(&records)
    }

    /// Parse a script previously produced by [`Patch::serialize`]
    pub fn parse(script: &str) -> anyhow::Result<Self> {
        let ops = Record::parse_all(script)?
            .iter()
            .map(Self::parse_op)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Patch { ops })
    }

    fn parse_op(record: &Record) -> anyhow::Result<PatchOp> {
        match record.cue() {
            "delete" => {
                let atoms = record.atoms();
                let (pos, len) = match atoms.as_slice() {
                    [pos, len] => (pos.parse()?, len.parse()?),
                    _ => anyhow::bail!("malformed patch: delete takes a position and a length"),
                };
                Ok(PatchOp::Delete { pos, len })
            }
            "insert" => {
                let (pos, inline_text) = match record.rest().split_once(' ') {
                    Some((pos, text)) => (pos, Some(text)),
                    None => (record.rest(), None),
                };
                let pos = pos
                    .parse()
                    .with_context(|| format!("malformed patch: invalid insert position '{pos}'"))?;

                let text = match (record.body(), inline_text) {
                    (Some(body), None) => body.to_string(),
                    (None, Some(text)) => text.to_string(),
                    _ => anyhow::bail!("malformed patch: insert needs inline text or a body"),
                };

                Ok(PatchOp::Insert { pos, text })
            }
            other => anyhow::bail!("malformed patch: unknown operation '{other}'"),
        }
    }
}

/// Use-patch heuristic: patch only when `old` is non-empty and the script
/// touches fewer than `threshold` of its characters
pub fn worth_patching(old: &str, patch: &Patch, threshold: f64) -> bool {
    !old.is_empty() && (patch.changed_chars() as f64) < threshold * old.chars().count() as f64
}
