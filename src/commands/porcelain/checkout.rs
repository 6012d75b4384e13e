use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff;
use crate::artifacts::log::record::Record;
use crate::artifacts::tree::TreeState;
use std::io::Write;

impl Repository {
    /// Reconcile the working directory with a historical tree state
    ///
    /// With a query, the target is the folded tree of the matching commit;
    /// without one, the target is the staged tree (fast-forward back to the
    /// present). Checkout refuses to run over unstaged changes: the working
    /// directory must match either the staged tree or the tree of some
    /// commit (the latter covers returning from an earlier checkout, which
    /// is not recorded in the history file).
    pub async fn checkout(&mut self, query: Option<&str>) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged_tree = Self::staged_tree(&records)?;
        let live_tree = self.workspace().scan(&[".".to_string()])?;

        let clean = tree_diff::trees_match(&staged_tree, &live_tree)?
            || self.live_matches_a_commit(&records, &live_tree)?;
        if !clean {
            anyhow::bail!("working tree has unstaged changes; add or stash them first");
        }

        let (target, description) = match query {
            Some(query) => {
                let commit = Self::find_commit(&records, query)?;
                let tree = Self::tree_at(&records, &commit)?;
                let description =
                    format!("commit [{}] {}", commit.order, commit.id.to_short_oid());
                (tree, description)
            }
            None => (staged_tree.clone(), "the staged tree".to_string()),
        };

        self.workspace().apply_tree(&staged_tree, &target)?;
        writeln!(self.writer(), "Checked out {description}")?;

        Ok(())
    }

    /// Whether the live tree equals the folded tree of any commit, newest
    /// first (replay per commit is linear by design)
    fn live_matches_a_commit(
        &self,
        records: &[Record],
        live_tree: &TreeState,
    ) -> anyhow::Result<bool> {
        for commit in Self::commits(records)?.iter().rev() {
            let tree = Self::tree_at(records, commit)?;
            if tree_diff::trees_match(&tree, live_tree)? {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
