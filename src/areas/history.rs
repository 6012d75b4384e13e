//! The history file on disk
//!
//! The repository's only persisted state is a single plain-text file. This
//! module owns every byte-level interaction with it:
//!
//! - parse under a shared advisory lock
//! - append under an exclusive lock, serialized fully in memory first and
//!   written with a single call followed by fsync, so a torn append is the
//!   only possible failure mode
//! - tail rewrite (reset/stash), which truncates to the byte offset right
//!   after the last commit and re-appends the new tail
//!
//! Round-trip parse/serialize is byte-identical, so the truncation offset of
//! a record prefix is the length of its serialization.

use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::COMMIT_CUE;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, new)]
pub struct HistoryFile {
    path: Box<Path>,
}

impl HistoryFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with its initial records; fails if it already exists
    pub fn create_with(&self, records: &[Record]) -> anyhow::Result<()> {
        let bytes = Record::serialize_all_bytes(records);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .with_context(|| format!("failed to create history file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(&bytes)?;
        lock.deref_mut().sync_all()?;

        Ok(())
    }

    /// Parse the whole file under a shared lock
    pub fn load(&self) -> anyhow::Result<Vec<Record>> {
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|_| anyhow::anyhow!("not a repository (no .sit history file found)"))?;
        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;

        let mut text = String::new();
        lock.deref_mut().read_to_string(&mut text)?;

        Record::parse_all(&text)
            .with_context(|| format!("corrupt history file at {:?}", self.path))
    }

    /// Append records with a single write followed by fsync
    pub fn append(&self, records: &[Record]) -> anyhow::Result<()> {
        let bytes = Record::serialize_all_bytes(records);

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|_| anyhow::anyhow!("not a repository (no .sit history file found)"))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(&bytes)?;
        lock.deref_mut().sync_all()?;

        Ok(())
    }

    /// Replace everything after the last commit record with `tail`
    ///
    /// `records` must be the current parsed file content; the kept prefix
    /// runs through the last commit record. Requires exclusive access.
    pub fn rewrite_tail(&self, records: &[Record], tail: &[Record]) -> anyhow::Result<()> {
        let keep = last_commit_boundary(records);
        let keep_bytes = Record::serialize_all(&records[..keep]).len() as u64;
        let tail_bytes = Record::serialize_all_bytes(tail);

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|_| anyhow::anyhow!("not a repository (no .sit history file found)"))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut().set_len(keep_bytes)?;
        lock.deref_mut().seek(SeekFrom::End(0))?;
        lock.deref_mut().write_all(&tail_bytes)?;
        lock.deref_mut().sync_all()?;

        Ok(())
    }
}

/// Index just past the last commit record; records from here on are staged
pub fn last_commit_boundary(records: &[Record]) -> usize {
    records
        .iter()
        .rposition(|record| record.cue() == COMMIT_CUE)
        .map(|index| index + 1)
        .unwrap_or(0)
}
