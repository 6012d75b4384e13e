use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn stage_new_files_as_write_and_touch(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("notes.txt"),
        "remember the milk\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("empty.txt"),
        String::new(),
    ));

    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("write notes.txt"))
        .stdout(predicate::str::contains("touch empty.txt"));

    // the staged records carry the content and the git-compatible blob hash
    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"write notes\.txt [0-9a-f]{40}\n")?)
        .stdout(predicate::str::contains(" remember the milk"))
        .stdout(predicate::str::contains("touch empty.txt\n"));

    Ok(())
}
