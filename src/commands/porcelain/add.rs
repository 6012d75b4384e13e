use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::{self, PathSelector};
use crate::artifacts::objects::operation::Operation;
use crate::commands::porcelain::colored_summary;
use std::io::Write;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let operations = self.stage_changes(paths)?;

        if operations.is_empty() {
            writeln!(self.writer(), "Nothing to add")?;
            return Ok(());
        }

        for operation in &operations {
            writeln!(self.writer(), "{}", colored_summary(operation))?;
        }

        Ok(())
    }

    /// Scan `paths`, diff against the staged tree and append the resulting
    /// operation records. Returns the change list.
    pub(crate) fn stage_changes(&self, paths: &[String]) -> anyhow::Result<Vec<Operation>> {
        let operations = self.pending_changes(paths)?;

        if !operations.is_empty() {
            let records: Vec<_> = operations.iter().map(Operation::to_record).collect();
            self.history().append(&records)?;
        }

        Ok(operations)
    }

    /// The operations `add` would stage for `paths`, without staging them
    pub(crate) fn pending_changes(&self, paths: &[String]) -> anyhow::Result<Vec<Operation>> {
        let roots: Vec<String> = paths.iter().map(|p| Self::normalize_path(p)).collect();

        let records = self.records()?;
        let staged_tree = Self::staged_tree(&records)?;
        let live_tree = self.workspace().scan(&roots)?;

        tree_diff::diff_trees(
            &staged_tree,
            &live_tree,
            &PathSelector::new(roots),
            self.workspace().options().patch_threshold_ratio,
        )
    }
}
