use crate::common::command::{repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reinitializing_is_refused(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already a repository"));

    Ok(())
}
