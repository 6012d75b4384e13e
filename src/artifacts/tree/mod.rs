//! Virtual filesystem tree states
//!
//! A tree state maps forward-slash relative paths to nodes. Parent
//! directories may be implicit: a `File` at `a/b.txt` does not require a
//! `Directory` entry for `a`.

pub mod folder;

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Mapping from relative path to tree node, sorted for deterministic walks
pub type TreeState = BTreeMap<String, TreeNode>;

/// One entry of a tree state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// UTF-8 text file
    File { content: String, id: ObjectId },
    /// Binary file, content held as base64
    Binary {
        content: String,
        size: u64,
        id: ObjectId,
    },
    Directory,
}

impl TreeNode {
    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory)
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory()
    }

    /// Exact content equality within the same classification
    ///
    /// Used by rename detection: a deleted file pairs with a created file
    /// only when both are text or both are binary and the content matches.
    pub fn same_content(&self, other: &TreeNode) -> bool {
        match (self, other) {
            (TreeNode::File { content: a, .. }, TreeNode::File { content: b, .. }) => a == b,
            (TreeNode::Binary { content: a, .. }, TreeNode::Binary { content: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Paths in `state` that hold file or binary nodes
pub fn file_paths(state: &TreeState) -> Vec<String> {
    state
        .iter()
        .filter(|(_, node)| node.is_file())
        .map(|(path, _)| path.clone())
        .collect()
}

/// Explicit directory paths in `state`, deepest first
pub fn directory_paths_deepest_first(state: &TreeState) -> Vec<String> {
    let mut dirs: Vec<String> = state
        .iter()
        .filter(|(_, node)| node.is_directory())
        .map(|(path, _)| path.clone())
        .collect();
    dirs.sort_by(|a, b| b.cmp(a));
    dirs
}
