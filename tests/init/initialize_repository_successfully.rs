use crate::common;
use crate::common::command::{repository_dir, run_sit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn initialize_repository_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty sit repository in .+\.sit\n$",
        )?);

    let history = common::read_history_file(&repository_dir);
    assert!(history.lines().next() == Some("commit"));
    assert!(predicate::str::is_match(r" id [0-9a-f]{40}\n")?.eval(&history));
    assert!(history.contains(" order 1"));
    assert!(history.contains(" message Initial commit"));
    assert!(history.contains(" author testuser"));
    assert!(!history.contains(" parent "));

    Ok(())
}
