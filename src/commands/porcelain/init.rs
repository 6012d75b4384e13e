use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitRecord;
use std::io::Write;

const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.history().exists() {
            anyhow::bail!(
                "already a repository: {} exists",
                self.history().path().display()
            );
        }

        let commit = CommitRecord::seal(
            Self::author(),
            Self::timestamp_now(),
            1,
            INITIAL_COMMIT_MESSAGE.to_string(),
            None,
            None,
        )?;
        self.history().create_with(&[commit.to_record()])?;

        writeln!(
            self.writer(),
            "Initialized empty sit repository in {}",
            self.history().path().display()
        )?;

        Ok(())
    }
}
