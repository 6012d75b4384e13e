use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn sealing_staged_operations_succeeds(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    write_file(FileSpec::new(
        repository_dir.path().join("notes.txt"),
        content,
    ));
    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    run_sit_command(repository_dir.path(), &["commit", "add", "the", "notes"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[2\] [0-9a-f]{7} add the notes\n$",
        )?);

    // sealing empties the stage
    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::eq(""));

    Ok(())
}
