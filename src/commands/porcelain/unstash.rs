use crate::areas::repository::Repository;
use crate::artifacts::log::record::Record;
use crate::artifacts::objects::commit::STASH_CUE;
use std::io::Write;

impl Repository {
    /// Re-append the children of the most recent staged `stash` record and
    /// remove the stash itself
    pub async fn unstash(&mut self) -> anyhow::Result<()> {
        let records = self.records()?;
        let staged = Self::staged_records(&records);

        let stash_index = staged
            .iter()
            .rposition(|record| record.cue() == STASH_CUE)
            .ok_or_else(|| anyhow::anyhow!("no stash found"))?;

        let children = staged[stash_index].children()?;
        let restored_count = children.len();

        let mut tail: Vec<Record> = staged
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != stash_index)
            .map(|(_, record)| record.clone())
            .collect();
        tail.extend(children);

        self.history().rewrite_tail(&records, &tail)?;
        writeln!(self.writer(), "Restored {restored_count} stashed record(s)")?;

        Ok(())
    }
}
