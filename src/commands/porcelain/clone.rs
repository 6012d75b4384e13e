use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Copy another repository's history file here and materialize its
    /// staged tree
    pub async fn clone_from(&mut self, source: &str) -> anyhow::Result<()> {
        if self.history().exists() {
            anyhow::bail!(
                "already a repository: {} exists",
                self.history().path().display()
            );
        }

        let source_dir = PathBuf::from(source)
            .canonicalize()
            .with_context(|| format!("failed to read clone source: {source}"))?;
        let source_history = Self::locate_history_file(&source_dir)?
            .ok_or_else(|| anyhow::anyhow!("not a repository (no .sit history file found)"))?;

        std::fs::copy(&source_history, self.history().path())
            .with_context(|| format!("failed to copy history file from {source}"))?;

        self.checkout(None).await?;
        writeln!(
            self.writer(),
            "Cloned {} into {}",
            source_history.display(),
            self.history().path().display()
        )?;

        Ok(())
    }
}
