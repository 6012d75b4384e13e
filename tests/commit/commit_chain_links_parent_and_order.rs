use crate::common;
use crate::common::command::{repository_dir, run_sit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Pull `(order, id, parent)` triples out of the raw history file text
fn commit_fields(history: &str) -> Vec<(u64, String, Option<String>)> {
    let mut commits = Vec::new();
    let mut current: Option<(Option<u64>, Option<String>, Option<String>)> = None;

    for line in history.lines() {
        if !line.starts_with(' ') {
            if let Some((Some(order), Some(id), parent)) = current.take() {
                commits.push((order, id, parent));
            }
            if line == "commit" {
                current = Some((None, None, None));
            }
        } else if let Some(fields) = current.as_mut() {
            if let Some(order) = line.strip_prefix(" order ") {
                fields.0 = Some(order.parse().unwrap());
            } else if let Some(id) = line.strip_prefix(" id ") {
                fields.1 = Some(id.to_string());
            } else if let Some(parent) = line.strip_prefix(" parent ") {
                fields.2 = Some(parent.to_string());
            }
        }
    }
    if let Some((Some(order), Some(id), parent)) = current {
        commits.push((order, id, parent));
    }

    commits
}

#[rstest]
fn commit_chain_links_parent_and_order(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (index, name) in ["first", "second", "third"].iter().enumerate() {
        write_file(FileSpec::new(
            repository_dir.path().join(format!("{name}.txt")),
            format!("content {index}\n"),
        ));
        run_sit_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        run_sit_command(repository_dir.path(), &["commit", "add", name])
            .assert()
            .success();
    }

    let history = common::read_history_file(&repository_dir);
    let commits = commit_fields(&history);

    assert_eq!(commits.len(), 4);
    assert_eq!(commits[0].2, None);
    for (index, window) in commits.windows(2).enumerate() {
        assert_eq!(window[0].0, (index + 1) as u64);
        assert_eq!(window[1].0, window[0].0 + 1);
        assert_eq!(window[1].2.as_ref(), Some(&window[0].1));
    }

    Ok(())
}
