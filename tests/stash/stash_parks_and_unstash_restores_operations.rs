use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn stash_parks_and_unstash_restores_operations(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("wip.txt"),
        "work in progress\n".to_string(),
    ));
    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let staged_before = run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success();
    let staged_before = String::from_utf8(staged_before.get_output().stdout.clone())?;

    run_sit_command(repository_dir.path(), &["stash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stashed 1 staged record(s)"));

    // the stash record holds the operations as its indented body
    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("stash\n"))
        .stdout(predicate::str::contains(" write wip.txt"));

    run_sit_command(repository_dir.path(), &["unstash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 stashed record(s)"));

    let staged_after = run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success();
    let staged_after = String::from_utf8(staged_after.get_output().stdout.clone())?;
    assert_eq!(staged_after, staged_before);

    // a second unstash has nothing to restore
    run_sit_command(repository_dir.path(), &["unstash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stash found"));

    Ok(())
}
