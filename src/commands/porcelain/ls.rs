use crate::areas::repository::Repository;
use crate::artifacts::tree;
use std::io::Write;

impl Repository {
    pub async fn ls(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged_tree = Self::staged_tree(&records)?;

        for path in tree::file_paths(&staged_tree) {
            writeln!(self.writer(), "{path}")?;
        }

        Ok(())
    }
}
