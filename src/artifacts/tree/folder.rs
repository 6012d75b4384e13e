//! Folding an operation stream into a tree state
//!
//! Replay is linear in log size by design: there is no index or snapshot,
//! the record sequence is the only state. The folder applies operations
//! left-to-right and optionally halts at a chosen commit, which yields the
//! two canonical views: the committed tree (stop at the most recent commit)
//! and the staged tree (fold the whole file).
//!
//! Patch application on a missing file, rename of a missing source, and
//! delete of an absent path are malformed-record conditions: the folder
//! rejects them instead of recovering, because silent recovery would fork
//! the hash chain.

use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::{COMMIT_CUE, CommitRecord, STASH_CUE};
use crate::artifacts::objects::hasher;
use crate::artifacts::objects::operation::Operation;
use crate::artifacts::tree::{TreeNode, TreeState};
use anyhow::Context;

/// Fold the entire record sequence: the staged tree
pub fn fold(records: &[Record]) -> anyhow::Result<TreeState> {
    fold_until(records, |_| false)
}

/// Fold until `stop` matches a commit record
///
/// The operations sealed by the matching commit are applied; everything past
/// it is not. With a predicate that never matches this folds the whole file.
pub fn fold_until(
    records: &[Record],
    stop: impl Fn(&CommitRecord) -> bool,
) -> anyhow::Result<TreeState> {
    let mut state = TreeState::new();

    for record in records {
        match record.cue() {
            COMMIT_CUE => {
                let commit = CommitRecord::try_from(record)?;
                if stop(&commit) {
                    break;
                }
            }
            // stash records are inert with respect to the tree
            STASH_CUE => {}
            _ => {
                let operation = Operation::try_from(record)?;
                apply(&mut state, &operation)?;
            }
        }
    }

    Ok(state)
}

fn apply(state: &mut TreeState, operation: &Operation) -> anyhow::Result<()> {
    match operation {
        Operation::Touch { path } => {
            state.insert(
                path.clone(),
                TreeNode::File {
                    content: String::new(),
                    id: hasher::empty_blob_id(),
                },
            );
        }
        Operation::Write { path, id, content } => {
            state.insert(
                path.clone(),
                TreeNode::File {
                    content: content.clone(),
                    id: id.clone(),
                },
            );
        }
        Operation::Binary {
            path,
            id,
            size,
            content,
        } => {
            state.insert(
                path.clone(),
                TreeNode::Binary {
                    content: content.clone(),
                    size: *size,
                    id: id.clone(),
                },
            );
        }
        Operation::Mkdir { path } => {
            state.insert(path.clone(), TreeNode::Directory);
        }
        Operation::Delete { path } => {
            state
                .remove(path)
                .with_context(|| format!("malformed record: delete of absent path '{path}'"))?;
        }
        Operation::Rename { from, to } => {
            let node = state
                .remove(from)
                .with_context(|| format!("malformed record: rename of absent path '{from}'"))?;
            state.insert(to.clone(), node);
        }
        Operation::Patch { path, id, script } => {
            let node = state
                .get(path)
                .with_context(|| format!("malformed record: patch of absent path '{path}'"))?;
            let content = match node {
                TreeNode::File { content, .. } => content,
                _ => anyhow::bail!("malformed record: patch of non-text path '{path}'"),
            };

            let patched = script
                .apply(content)
                .with_context(|| format!("malformed record: patch failed on '{path}'"))?;
            state.insert(
                path.clone(),
                TreeNode::File {
                    content: patched,
                    id: id.clone(),
                },
            );
        }
    }

    Ok(())
}
