use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn small_edits_are_staged_as_patches(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let original = "a".repeat(1000);
    write_file(FileSpec::new(
        repository_dir.path().join("big.txt"),
        original.clone(),
    ));
    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    run_sit_command(repository_dir.path(), &["commit", "add", "big"])
        .assert()
        .success();

    // change 100 of 1000 characters: under the 50% threshold
    let modified = format!("{}{}", "b".repeat(100), "a".repeat(900));
    write_file(FileSpec::new(
        repository_dir.path().join("big.txt"),
        modified.clone(),
    ));

    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("patch big.txt"))
        .stdout(predicate::str::contains("write").not());

    // round trip: back to commit 1 and forward again restores the edit exactly
    run_sit_command(repository_dir.path(), &["checkout", "1"])
        .assert()
        .success();
    assert!(!repository_dir.path().join("big.txt").exists());

    run_sit_command(repository_dir.path(), &["checkout"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("big.txt"))?,
        modified
    );

    Ok(())
}
