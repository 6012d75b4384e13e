use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{COMMIT_CUE, STASH_CUE};
use crate::artifacts::tree;
use std::io::Write;

impl Repository {
    pub async fn stats(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;

        let commit_count = records.iter().filter(|r| r.cue() == COMMIT_CUE).count();
        let operation_count = records
            .iter()
            .filter(|r| r.cue() != COMMIT_CUE && r.cue() != STASH_CUE)
            .count();
        let staged_count = Self::staged_records(&records).len();
        let tracked_count = tree::file_paths(&Self::staged_tree(&records)?).len();
        let file_size = std::fs::metadata(self.history().path())?.len();

        writeln!(self.writer(), "commits:    {commit_count}")?;
        writeln!(self.writer(), "operations: {operation_count}")?;
        writeln!(self.writer(), "staged:     {staged_count}")?;
        writeln!(self.writer(), "tracked:    {tracked_count}")?;
        writeln!(self.writer(), "file size:  {file_size} bytes")?;

        Ok(())
    }
}
