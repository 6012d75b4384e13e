use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reset_drops_staged_operations(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("scratch.txt"),
        "scratch\n".to_string(),
    ));
    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    run_sit_command(repository_dir.path(), &["reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped 1 staged record(s)"));

    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::eq(""));

    // reset drops records, not working-directory files
    assert!(repository_dir.path().join("scratch.txt").exists());

    Ok(())
}
