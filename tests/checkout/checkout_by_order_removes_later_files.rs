use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn checkout_by_order_removes_later_files(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    // an empty .ico is tracked as a binary file
    write_file(FileSpec::new(
        repository_dir.path().join("favicon.ico"),
        String::new(),
    ));
    run_sit_command(repository_dir.path(), &["add", "favicon.ico"])
        .assert()
        .success();
    run_sit_command(repository_dir.path(), &["commit", "add", "favicon"])
        .assert()
        .success();

    run_sit_command(repository_dir.path(), &["checkout", "1"])
        .assert()
        .success();
    assert!(!repository_dir.path().join("favicon.ico").exists());

    run_sit_command(repository_dir.path(), &["checkout"])
        .assert()
        .success();
    assert!(repository_dir.path().join("favicon.ico").exists());

    Ok(())
}
