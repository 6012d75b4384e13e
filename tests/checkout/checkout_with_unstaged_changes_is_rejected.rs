use crate::common::command::{init_repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_with_unstaged_changes_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "modified one".to_string(),
    ));

    run_sit_command(repository_dir.path(), &["checkout", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unstaged changes"));

    // the working directory is untouched by the refused checkout
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "modified one"
    );

    Ok(())
}
