use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_binary_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn binary_files_are_detected_by_extension_and_content(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    // a .png is binary regardless of its bytes
    write_file(FileSpec::new(
        repository_dir.path().join("image.png"),
        "just text really".to_string(),
    ));
    // a zero byte marks this one binary despite the unknown extension
    write_binary_file(
        repository_dir.path().join("data.blob"),
        &[0x01, 0x02, 0x00, 0x03],
    );
    write_file(FileSpec::new(
        repository_dir.path().join("plain.txt"),
        "text stays text\n".to_string(),
    ));

    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("binary image.png"))
        .stdout(predicate::str::contains("binary data.blob"))
        .stdout(predicate::str::contains("write plain.txt"));

    // binary records carry the raw byte size and a base64 body
    run_sit_command(repository_dir.path(), &["stage"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"binary image\.png [0-9a-f]{40} 16\n",
        )?)
        .stdout(predicate::str::is_match(
            r"binary data\.blob [0-9a-f]{40} 4\n AQIAAw==\n",
        )?);

    Ok(())
}
