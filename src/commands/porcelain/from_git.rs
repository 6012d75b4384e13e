use crate::areas::repository::Repository;
use crate::artifacts::import;
use crate::artifacts::objects::commit::COMMIT_CUE;
use std::io::Write;

impl Repository {
    /// Import the Git repository in the working directory as a fresh
    /// history file
    pub async fn from_git(&mut self) -> anyhow::Result<()> {
        if self.history().exists() {
            anyhow::bail!(
                "already a repository: {} exists",
                self.history().path().display()
            );
        }

        let records = import::import_records(self.path(), self.workspace().options())?;
        let commit_count = records.iter().filter(|r| r.cue() == COMMIT_CUE).count();

        self.history().create_with(&records)?;
        writeln!(
            self.writer(),
            "Imported {} commit(s) into {}",
            commit_count,
            self.history().path().display()
        )?;

        Ok(())
    }
}
