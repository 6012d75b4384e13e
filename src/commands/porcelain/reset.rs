use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Drop every record staged after the last commit
    pub async fn reset(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged_count = Self::staged_records(&records).len();

        if staged_count == 0 {
            writeln!(self.writer(), "Nothing staged")?;
            return Ok(());
        }

        self.history().rewrite_tail(&records, &[])?;
        writeln!(self.writer(), "Dropped {staged_count} staged record(s)")?;

        Ok(())
    }
}
