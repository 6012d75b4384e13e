use crate::areas::repository::Repository;
use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::CommitRecord;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let records = self.records()?;

        let staged = Self::staged_records(&records);
        if staged.is_empty() {
            anyhow::bail!("no staged changes");
        }

        let last = Self::last_commit(&records)?;
        let staged_text = Record::serialize_all(staged);
        let staged_text = staged_text.strip_suffix('\n').unwrap_or_default();

        let commit = CommitRecord::seal(
            Self::author(),
            Self::timestamp_now(),
            last.order + 1,
            message.trim().to_string(),
            Some(last.id),
            Some(staged_text),
        )?;
        self.history().append(&[commit.to_record()])?;

        writeln!(
            self.writer(),
            "[{}] {} {}",
            commit.order,
            commit.id.to_short_oid(),
            commit.message
        )?;

        Ok(())
    }
}
