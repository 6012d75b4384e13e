use crate::common::command::{init_repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn partial_add_does_not_delete_unscanned_paths(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // delete a tracked file, then add a different path only
    std::fs::remove_file(repository_dir.path().join("1.txt"))?;

    run_sit_command(repository_dir.path(), &["add", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to add"));

    // the deletion is outside the scanned scope, so nothing was staged
    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::eq(""));

    // a full add picks the deletion up
    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete 1.txt"));

    Ok(())
}
