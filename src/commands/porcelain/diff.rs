use crate::areas::repository::Repository;
use crate::commands::porcelain::colored_summary;
use std::io::Write;

impl Repository {
    /// Preview the operations `add` would stage, without staging them
    pub async fn diff(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let paths = if paths.is_empty() {
            vec![".".to_string()]
        } else {
            paths.to_vec()
        };

        let operations = self.pending_changes(&paths)?;
        for operation in &operations {
            writeln!(self.writer(), "{}", colored_summary(operation))?;
        }

        Ok(())
    }
}
