//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! repository operations. It acts as a facade over the lower-level components
//! (history file, workspace) and implements the porcelain commands in
//! `crate::commands`.
//!
//! ## Architecture
//!
//! The parsed record sequence is the only state: every view (staged tree,
//! committed tree, commit chain) is re-folded from the file on demand. There
//! is no in-memory object graph that could diverge from the history file.

use crate::areas::history::{self, HistoryFile};
use crate::areas::workspace::{ScanOptions, Workspace};
use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::{COMMIT_CUE, CommitRecord};
use crate::artifacts::tree::{TreeState, folder};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// History file name extension
pub const HISTORY_EXTENSION: &str = "sit";

/// Sit repository
///
/// Coordinates all repository operations. The history file is the sole
/// persisted state; the workspace is the directory that contains it.
pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout or a test buffer)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// The append-only history file
    history: HistoryFile,
    /// Working directory
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Self::with_options(path, writer, ScanOptions::default())
    }

    pub fn with_options(
        path: PathBuf,
        writer: Box<dyn std::io::Write>,
        options: ScanOptions,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }
        let path = path.canonicalize()?;

        let history_path = Self::locate_history_file(&path)?
            .unwrap_or_else(|| Self::default_history_path(&path));
        let history = HistoryFile::new(history_path.into_boxed_path());
        let workspace = Workspace::with_options(path.clone().into_boxed_path(), options);

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            history,
            workspace,
        })
    }

    /// First `*.sit` file in `dir`, if any
    pub(crate) fn locate_history_file(dir: &Path) -> anyhow::Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == HISTORY_EXTENSION)
            })
            .collect();
        candidates.sort();

        Ok(candidates.into_iter().next())
    }

    /// `<dirname>.sit` inside the repository root
    fn default_history_path(dir: &Path) -> PathBuf {
        let dirname = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history".to_string());
        dir.join(format!("{dirname}.{HISTORY_EXTENSION}"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn history(&self) -> &HistoryFile {
        &self.history
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Parse the whole history file
    pub fn records(&self) -> anyhow::Result<Vec<Record>> {
        self.history.load()
    }

    /// Records after the last commit: the staged changes
    pub fn staged_records<'r>(records: &'r [Record]) -> &'r [Record] {
        &records[history::last_commit_boundary(records)..]
    }

    /// All commit records in file order
    pub fn commits(records: &[Record]) -> anyhow::Result<Vec<CommitRecord>> {
        records
            .iter()
            .filter(|record| record.cue() == COMMIT_CUE)
            .map(CommitRecord::try_from)
            .collect()
    }

    /// The most recent commit
    ///
    /// Every well-formed history file starts with the initial commit, so a
    /// missing commit is a structural error.
    pub fn last_commit(records: &[Record]) -> anyhow::Result<CommitRecord> {
        records
            .iter()
            .rev()
            .find(|record| record.cue() == COMMIT_CUE)
            .context("corrupt history file: no commit record found")
            .and_then(CommitRecord::try_from)
    }

    /// Fold the whole file: committed plus staged operations
    pub fn staged_tree(records: &[Record]) -> anyhow::Result<TreeState> {
        folder::fold(records)
    }

    /// Fold up to the most recent commit
    pub fn committed_tree(records: &[Record]) -> anyhow::Result<TreeState> {
        let last = Self::last_commit(records)?;
        Self::tree_at(records, &last)
    }

    /// Fold up to (and not past) the given commit
    pub fn tree_at(records: &[Record], commit: &CommitRecord) -> anyhow::Result<TreeState> {
        folder::fold_until(records, |candidate| candidate.id == commit.id)
    }

    /// Resolve a checkout/log query to a commit
    ///
    /// An all-digits query selects by `order`; anything else matches the
    /// first commit whose id contains the query as a substring.
    pub fn find_commit(records: &[Record], query: &str) -> anyhow::Result<CommitRecord> {
        let by_order = regex::Regex::new(r"^\d+$").expect("valid order pattern");
        let commits = Self::commits(records)?;

        let found = if by_order.is_match(query) {
            let order: u64 = query.parse()?;
            commits.into_iter().find(|commit| commit.order == order)
        } else {
            commits.into_iter().find(|commit| commit.id.contains(query))
        };

        found.with_context(|| format!("unknown target: {query}"))
    }

    /// Commit author: `$USER`, or "Unknown" when absent
    pub fn author() -> String {
        std::env::var("USER").unwrap_or_else(|_| "Unknown".to_string())
    }

    /// Current time as an ISO-8601 UTC timestamp
    pub fn timestamp_now() -> String {
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Normalize a CLI path argument to the grammar's forward-slash form
    pub fn normalize_path(raw: &str) -> String {
        let trimmed = raw.trim_start_matches("./").trim_end_matches('/');
        if trimmed.is_empty() {
            ".".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
