use crate::common::command::{init_repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_of_unknown_target_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_sit_command(repository_dir.path(), &["checkout", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target: 42"));

    run_sit_command(repository_dir.path(), &["checkout", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target: deadbeef"));

    Ok(())
}
