//! Git import adapter
//!
//! Translates an existing Git repository's commit log into the history-file
//! format, using the same operation vocabulary and hash rules as the rest of
//! the engine. Text blobs keep their Git hashes (the blob-header convention
//! is shared); binary blobs are re-hashed over raw bytes.
//!
//! The history-file format requires the first record to be a commit that
//! seals nothing, so Git commit 1 maps to the initial commit with an empty
//! tree and every later commit `k` seals the operations that fold the tree
//! of commit `k-1` into the tree of commit `k`. All commit metadata
//! (author, timestamp, subject) is carried over one-to-one, which keeps the
//! commit count identical to the source repository.

use crate::areas::workspace::{self, ScanOptions};
use crate::artifacts::diff::tree_diff::{self, PathSelector};
use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::operation::Operation;
use crate::artifacts::tree::TreeState;
use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Field separator in the `git log` format string
const FIELD_SEPARATOR: char = '\u{1f}';

/// Metadata of one source commit
#[derive(Debug, Clone)]
struct SourceCommit {
    sha: String,
    author: String,
    timestamp: String,
    subject: String,
}

/// Build the full record sequence for a history file mirroring the Git
/// repository at `dir`
pub fn import_records(dir: &Path, options: &ScanOptions) -> anyhow::Result<Vec<Record>> {
    let commits = list_commits(dir)?;
    if commits.is_empty() {
        anyhow::bail!("nothing to import: the Git repository has no commits");
    }

    let mut records = Vec::new();
    let mut previous_tree = TreeState::new();
    let mut previous_commit: Option<CommitRecord> = None;

    for (index, source) in commits.iter().enumerate() {
        let staged_text = if index == 0 {
            // the initial commit seals nothing
            None
        } else {
            let tree = read_tree(dir, &source.sha, options)?;
            let operations = tree_diff::diff_trees(
                &previous_tree,
                &tree,
                &PathSelector::all(),
                options.patch_threshold_ratio,
            )?;
            previous_tree = tree;

            let operation_records: Vec<Record> =
                operations.iter().map(Operation::to_record).collect();
            let text = Record::serialize_all(&operation_records);
            records.extend(operation_records);

            Some(text.strip_suffix('\n').unwrap_or_default().to_string())
        };

        let commit = CommitRecord::seal(
            source.author.clone(),
            source.timestamp.clone(),
            (index + 1) as u64,
            source.subject.clone(),
            previous_commit.as_ref().map(|commit| commit.id.clone()),
            staged_text.as_deref(),
        )?;
        records.push(commit.to_record());
        previous_commit = Some(commit);
    }

    Ok(records)
}

fn list_commits(dir: &Path) -> anyhow::Result<Vec<SourceCommit>> {
    let format = format!("%H{FIELD_SEPARATOR}%an{FIELD_SEPARATOR}%aI{FIELD_SEPARATOR}%s");
    let stdout = run_git(dir, &["log", "--reverse", &format!("--format={format}")])?;

    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            let [sha, author, date, subject] = fields.as_slice() else {
                anyhow::bail!("unexpected git log line: {line}");
            };

            Ok(SourceCommit {
                sha: sha.to_string(),
                author: author.to_string(),
                timestamp: to_utc_timestamp(date)?,
                subject: subject.to_string(),
            })
        })
        .collect()
}

fn to_utc_timestamp(date: &str) -> anyhow::Result<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(date)
        .with_context(|| format!("invalid commit date '{date}'"))?;
    Ok(parsed
        .with_timezone(&chrono::Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string())
}

/// Snapshot the blob tree of one Git commit
fn read_tree(dir: &Path, sha: &str, options: &ScanOptions) -> anyhow::Result<TreeState> {
    let listing = run_git(dir, &["ls-tree", "-r", sha])?;
    let mut tree = TreeState::new();

    for line in listing.lines().filter(|line| !line.is_empty()) {
        // <mode> <type> <oid>\t<path>
        let (meta, path) = line
            .split_once('\t')
            .with_context(|| format!("unexpected git ls-tree line: {line}"))?;
        let object_type = meta.split_whitespace().nth(1).unwrap_or_default();
        if object_type != "blob" {
            continue;
        }

        let bytes = run_git_bytes(dir, &["show", &format!("{sha}:{path}")])?;
        let node = workspace::node_from_bytes(options, Path::new(path), bytes)?;
        tree.insert(path.to_string(), node);
    }

    Ok(tree)
}

fn run_git(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let bytes = run_git_bytes(dir, args)?;
    String::from_utf8(bytes).context("git produced non-UTF-8 output")
}

fn run_git_bytes(dir: &Path, args: &[&str]) -> anyhow::Result<Vec<u8>> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .context("failed to run git; is it installed?")?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(output.stdout)
}
