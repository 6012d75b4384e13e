use crate::areas::repository::Repository;
use crate::artifacts::objects::operation::Operation;
use crate::commands::porcelain::colored_summary;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;

        let staged: Vec<String> = Self::staged_records(&records)
            .iter()
            .map(|record| match Operation::try_from(record) {
                Ok(operation) => colored_summary(&operation).to_string(),
                // stash records stay staged but are not operations
                Err(_) => record.cue().to_string(),
            })
            .collect();

        let unstaged = self.pending_changes(&[".".to_string()])?;

        if staged.is_empty() && unstaged.is_empty() {
            writeln!(self.writer(), "Nothing staged, working directory clean")?;
            return Ok(());
        }

        if !staged.is_empty() {
            writeln!(self.writer(), "Staged operations:")?;
            for line in &staged {
                writeln!(self.writer(), "  {line}")?;
            }
        }

        if !unstaged.is_empty() {
            writeln!(self.writer(), "Unstaged changes:")?;
            for operation in &unstaged {
                writeln!(self.writer(), "  {}", colored_summary(operation))?;
            }
        }

        Ok(())
    }
}
