//! Diffing two tree states into an operation list
//!
//! ## Emission order
//!
//! Creates and updates come first (in path order), deletes next (children
//! before parents), renames last. The order is a contract: the tree folder
//! applies operations in emission order, and a rename stands in for a
//! delete+create pair that would otherwise have appeared earlier in the list.
//!
//! ## Rename detection
//!
//! A `delete` whose old-tree content exactly equals the content of an emitted
//! `write` or `binary` collapses with it into a single `rename`. Pairing is
//! on exact content equality only; near-identical content stays a
//! delete+create pair, which keeps the emission deterministic. Each delete
//! and each create participates in at most one pairing.

use crate::artifacts::objects::operation::Operation;
use crate::artifacts::patch::{self, Patch};
use crate::artifacts::tree::{TreeNode, TreeState};

/// Scope of delete emission: paths the caller actually scanned
///
/// Diffing a partial scan (e.g. `add src/`) must not delete tracked paths
/// the scan never visited.
#[derive(Debug, Clone)]
pub struct PathSelector {
    roots: Vec<String>,
}

impl PathSelector {
    pub fn new(roots: impl IntoIterator<Item = String>) -> Self {
        PathSelector {
            roots: roots.into_iter().collect(),
        }
    }

    /// Selector covering the whole tree
    pub fn all() -> Self {
        Self::new([".".to_string()])
    }

    pub fn matches(&self, path: &str) -> bool {
        self.roots.iter().any(|root| {
            root == "." || path == root || path.starts_with(&format!("{root}/"))
        })
    }
}

/// Compute the operations that fold `old` into `new`
pub fn diff_trees(
    old: &TreeState,
    new: &TreeState,
    selector: &PathSelector,
    patch_threshold: f64,
) -> anyhow::Result<Vec<Operation>> {
    let mut creates = Vec::new();

    for (path, new_node) in new {
        match old.get(path) {
            None => {
                if let Some(operation) = create_operation(old, path, new_node)? {
                    creates.push(operation);
                }
            }
            Some(old_node) => {
                if let Some(operation) = update_operation(path, old_node, new_node, patch_threshold)? {
                    creates.push(operation);
                }
            }
        }
    }

    let mut deletes = Vec::new();
    // children before parents, so the fold removes leaves first
    for path in old.keys().rev() {
        if !new.contains_key(path) && selector.matches(path) {
            deletes.push(Operation::Delete { path: path.clone() });
        }
    }

    Ok(pair_renames(old, new, creates, deletes))
}

fn create_operation(
    old: &TreeState,
    path: &str,
    node: &TreeNode,
) -> anyhow::Result<Option<Operation>> {
    let operation = match node {
        TreeNode::Directory => {
            // a directory already implied by tracked children is not a change
            if has_descendant(old, path) {
                return Ok(None);
            }
            Operation::Mkdir {
                path: path.to_string(),
            }
        }
        TreeNode::File { content, .. } if content.is_empty() => Operation::Touch {
            path: path.to_string(),
        },
        TreeNode::File { content, id } => Operation::Write {
            path: path.to_string(),
            id: id.clone(),
            content: content.clone(),
        },
        TreeNode::Binary { content, size, id } => Operation::Binary {
            path: path.to_string(),
            id: id.clone(),
            size: *size,
            content: content.clone(),
        },
    };

    Ok(Some(operation))
}

fn update_operation(
    path: &str,
    old_node: &TreeNode,
    new_node: &TreeNode,
    patch_threshold: f64,
) -> anyhow::Result<Option<Operation>> {
    let operation = match (old_node, new_node) {
        (TreeNode::Directory, TreeNode::Directory) => return Ok(None),
        (
            TreeNode::File {
                content: old_content,
                ..
            },
            TreeNode::File { content, id },
        ) => {
            if content == old_content {
                return Ok(None);
            }

            let script = Patch::between(old_content, content);
            if patch::worth_patching(old_content, &script, patch_threshold) {
                Operation::Patch {
                    path: path.to_string(),
                    id: id.clone(),
                    script,
                }
            } else {
                Operation::Write {
                    path: path.to_string(),
                    id: id.clone(),
                    content: content.clone(),
                }
            }
        }
        (
            TreeNode::Binary {
                content: old_content,
                ..
            },
            TreeNode::Binary { content, size, id },
        ) => {
            if content == old_content {
                return Ok(None);
            }
            Operation::Binary {
                path: path.to_string(),
                id: id.clone(),
                size: *size,
                content: content.clone(),
            }
        }
        // classification changed: re-record the path in full
        (_, TreeNode::Directory) => Operation::Mkdir {
            path: path.to_string(),
        },
        (_, TreeNode::File { content, .. }) if content.is_empty() => Operation::Touch {
            path: path.to_string(),
        },
        (_, TreeNode::File { content, id }) => Operation::Write {
            path: path.to_string(),
            id: id.clone(),
            content: content.clone(),
        },
        (_, TreeNode::Binary { content, size, id }) => Operation::Binary {
            path: path.to_string(),
            id: id.clone(),
            size: *size,
            content: content.clone(),
        },
    };

    Ok(Some(operation))
}

fn has_descendant(state: &TreeState, path: &str) -> bool {
    let prefix = format!("{path}/");
    state
        .range(prefix.clone()..)
        .next()
        .is_some_and(|(key, _)| key.starts_with(&prefix))
}

fn pair_renames(
    old: &TreeState,
    new: &TreeState,
    creates: Vec<Operation>,
    deletes: Vec<Operation>,
) -> Vec<Operation> {
    let mut create_used = vec![false; creates.len()];
    let mut renames = Vec::new();

    let mut kept_deletes = Vec::new();
    for delete in deletes {
        let Operation::Delete { path: from } = &delete else {
            unreachable!("delete list holds delete operations only");
        };
        let Some(old_node) = old.get(from) else {
            kept_deletes.push(delete);
            continue;
        };

        let pair = creates.iter().enumerate().find(|(index, create)| {
            if create_used[*index] {
                return false;
            }
            match create {
                Operation::Write { path, .. } | Operation::Binary { path, .. } => new
                    .get(path)
                    .is_some_and(|new_node| old_node.same_content(new_node)),
                _ => false,
            }
        });

        match pair {
            Some((index, create)) => {
                create_used[index] = true;
                renames.push(Operation::Rename {
                    from: from.clone(),
                    to: create.target_path().to_string(),
                });
            }
            None => kept_deletes.push(delete),
        }
    }

    let mut operations: Vec<Operation> = creates
        .into_iter()
        .zip(create_used)
        .filter(|(_, used)| !used)
        .map(|(create, _)| create)
        .collect();
    operations.extend(kept_deletes);
    operations.extend(renames);
    operations
}

/// True when `new` needs no operations to be reached from `old`
pub fn trees_match(old: &TreeState, new: &TreeState) -> anyhow::Result<bool> {
    Ok(diff_trees(old, new, &PathSelector::all(), 0.5)?.is_empty())
}
