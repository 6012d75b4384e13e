use crate::areas::repository::Repository;
use crate::artifacts::log::record::Record;
use std::io::Write;

impl Repository {
    /// Print the staged records exactly as they appear in the history file
    pub async fn stage(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged = Self::staged_records(&records);

        write!(self.writer(), "{}", Record::serialize_all(staged))?;

        Ok(())
    }
}
