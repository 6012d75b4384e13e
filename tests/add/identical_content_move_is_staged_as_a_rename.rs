use crate::common::command::{init_repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn identical_content_move_is_staged_as_a_rename(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // move 1.txt to renamed.txt without touching its content
    let old_path = repository_dir.path().join("1.txt");
    let new_path = repository_dir.path().join("renamed.txt");
    std::fs::rename(&old_path, &new_path)?;

    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("rename 1.txt -> renamed.txt"))
        .stdout(predicate::str::contains("write").not())
        .stdout(predicate::str::contains("delete").not());

    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::eq("rename 1.txt renamed.txt\n"));

    Ok(())
}
