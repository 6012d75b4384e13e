use crate::areas::repository::Repository;
use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::STASH_CUE;
use std::io::Write;

impl Repository {
    /// Move the staged operations into a single `stash` record
    pub async fn stash(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged = Self::staged_records(&records);

        if staged.is_empty() {
            writeln!(self.writer(), "Nothing to stash")?;
            return Ok(());
        }

        let stashed_count = staged.len();
        let body = Record::serialize_all(staged);
        let stash = Record::with_body(
            STASH_CUE,
            "",
            body.strip_suffix('\n').unwrap_or_default().to_string(),
        );

        self.history().rewrite_tail(&records, &[stash])?;
        writeln!(self.writer(), "Stashed {stashed_count} staged record(s)")?;

        Ok(())
    }
}
