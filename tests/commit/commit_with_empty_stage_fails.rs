use crate::common::command::{repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_with_empty_stage_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sit_command(repository_dir.path(), &["commit", "nothing", "staged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no staged changes"));

    Ok(())
}
