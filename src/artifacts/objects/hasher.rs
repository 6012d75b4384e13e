//! Deterministic content and commit hashing
//!
//! Text blobs are hashed with the git blob convention (`blob <len>\0` header
//! prepended), so text hashes match `git hash-object` output for the same
//! bytes and survive a Git import unchanged. Binary blobs are hashed over
//! their raw bytes, a deliberate divergence from git.
//!
//! Commit hashes cover the canonical preamble lines plus the exact serialized
//! bytes of the operations being sealed, so a commit pins the record text
//! rather than the resulting tree.

use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

/// Hash of the empty text blob (`blob 0\0`)
pub const EMPTY_BLOB_ID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

/// Hash a text file's content, git-blob compatible
pub fn text_blob_id(content: &str) -> anyhow::Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content.as_bytes());

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}

/// Hash a binary file's raw bytes
pub fn binary_blob_id(bytes: &[u8]) -> anyhow::Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(bytes);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}

/// Hash assigned to files created by `touch`
pub fn empty_blob_id() -> ObjectId {
    ObjectId::try_parse(EMPTY_BLOB_ID.to_string()).expect("constant is a valid object id")
}

/// Compute a commit hash over the canonical preamble
///
/// The input is the following lines joined by `\n`, optional lines included
/// only when present:
///
/// 1. `author <author>`
/// 2. `timestamp <timestamp>`
/// 3. `message <message>` (always present, empty message allowed)
/// 4. `parent <parent>` (only when a parent exists)
/// 5. the serialized staged-operations block, no trailing newline (only when
///    non-empty)
pub fn commit_id(
    author: &str,
    timestamp: &str,
    message: &str,
    parent: Option<&ObjectId>,
    staged_ops: Option<&str>,
) -> anyhow::Result<ObjectId> {
    let mut lines = vec![
        format!("author {author}"),
        format!("timestamp {timestamp}"),
        format!("message {message}"),
    ];

    if let Some(parent) = parent {
        lines.push(format!("parent {}", parent.as_ref()));
    }

    if let Some(staged_ops) = staged_ops
        && !staged_ops.is_empty()
    {
        lines.push(staged_ops.to_string());
    }

    let mut hasher = Sha1::new();
    hasher.update(lines.join("\n").as_bytes());

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}
