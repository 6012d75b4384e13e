#![allow(dead_code)]

pub mod file;

/// Name of the history file created for an assert_fs temp dir
///
/// The history file is `<dirname>.sit` next to the tracked files.
pub fn history_file_name(dir: &assert_fs::TempDir) -> String {
    let dirname = dir
        .path()
        .file_name()
        .expect("temp dir has a name")
        .to_string_lossy()
        .into_owned();
    format!("{dirname}.sit")
}

/// Read the raw history file of a repository directory
pub fn read_history_file(dir: &assert_fs::TempDir) -> String {
    let path = dir.path().join(history_file_name(dir));
    std::fs::read_to_string(path).expect("history file exists")
}
