use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let commits = Self::commits(&records)?;

        for commit in commits.iter().rev() {
            writeln!(
                self.writer(),
                "{} {}",
                format!("commit {}", commit.id).yellow(),
                format!("(#{})", commit.order).cyan()
            )?;
            writeln!(self.writer(), "Author: {}", commit.author)?;
            writeln!(self.writer(), "Date:   {}", commit.timestamp)?;
            if !commit.message.is_empty() {
                writeln!(self.writer())?;
                writeln!(self.writer(), "    {}", commit.message)?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
