use crate::common;
use crate::common::command::{repository_dir, run_git_command, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn import_preserves_commit_count_and_blob_hashes(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_git_command(repository_dir.path(), &["init", "--quiet"])
        .assert()
        .success();

    for index in 1..=5 {
        write_file(FileSpec::new(
            repository_dir.path().join(format!("file{index}.txt")),
            format!("content of file {index}\n"),
        ));
        run_git_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        run_git_command(
            repository_dir.path(),
            &["commit", "--quiet", "-m", &format!("commit {index}")],
        )
        .assert()
        .success();
    }

    run_sit_command(repository_dir.path(), &["from-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 5 commit(s)"));

    run_sit_command(repository_dir.path(), &["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commits:    5"))
        .stdout(predicate::str::contains("staged:     0"));

    // text blob hashes in the imported records match git hash-object
    let git_hash = run_git_command(repository_dir.path(), &["hash-object", "file3.txt"])
        .assert()
        .success();
    let git_hash = String::from_utf8(git_hash.get_output().stdout.clone())?
        .trim()
        .to_string();

    let history = common::read_history_file(&repository_dir);
    assert!(history.contains(&format!("write file3.txt {git_hash}")));

    // commit metadata is carried over one-to-one
    assert!(history.contains(" author Test Author"));
    assert!(history.contains(" message commit 5"));

    Ok(())
}
