use crate::artifacts::objects::hasher;
use crate::artifacts::tree::{self, TreeNode, TreeState};
use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_NAMES: [&str; 3] = ["node_modules", ".git", ".DS_Store"];

const HISTORY_FILE_EXTENSION: &str = ".sit";

const DEFAULT_BINARY_EXTENSIONS: [&str; 24] = [
    "png", "jpg", "jpeg", "gif", "ico", "bmp", "webp", "pdf", "zip", "gz", "tar", "bz2", "7z",
    "exe", "dll", "so", "dylib", "woff", "woff2", "ttf", "eot", "mp3", "mp4", "mov",
];

/// Scanner behavior knobs, fixed defaults but overridable so tests can drive
/// classification deterministically
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extra_ignores: BTreeSet<String>,
    pub binary_extensions: BTreeSet<String>,
    pub binary_probe_bytes: usize,
    pub patch_threshold_ratio: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            extra_ignores: BTreeSet::new(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            binary_probe_bytes: 8000,
            patch_threshold_ratio: 0.5,
        }
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    options: ScanOptions,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace {
            path,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(path: Box<Path>, options: ScanOptions) -> Self {
        Workspace { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Build the live tree for the given scan roots (relative paths; `.`
    /// scans the whole working directory)
    pub fn scan(&self, roots: &[String]) -> anyhow::Result<TreeState> {
        let mut state = TreeState::new();

        for root in roots {
            let root_path = if root == "." {
                self.path.to_path_buf()
            } else {
                self.path.join(root)
            };

            if !root_path.exists() {
                // adding a non-existent path only selects it for deletion
                continue;
            }

            for entry in WalkDir::new(&root_path).into_iter().filter_map(|e| e.ok()) {
                let Some(relative) = self.relative_name(entry.path()) else {
                    continue;
                };
                if relative.is_empty() || self.is_ignored(entry.path()) {
                    continue;
                }

                if entry.file_type().is_dir() {
                    state.insert(relative, TreeNode::Directory);
                } else if entry.file_type().is_file() {
                    state.insert(relative.clone(), self.read_node(entry.path())?);
                }
            }
        }

        Ok(state)
    }

    /// Classify and read one regular file into a tree node
    fn read_node(&self, path: &Path) -> anyhow::Result<TreeNode> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read file: {:?}", path))?;
        node_from_bytes(&self.options, path, bytes)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                name.ends_with(HISTORY_FILE_EXTENSION)
                    || IGNORED_NAMES.contains(&name.as_ref())
                    || self.options.extra_ignores.contains(name.as_ref())
            } else {
                false
            }
        })
    }

    /// Forward-slash relative name of an absolute path under the workspace
    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn absolute_path(&self, relative: &str) -> PathBuf {
        let mut path = self.path.to_path_buf();
        for part in relative.split('/') {
            path.push(part);
        }
        path
    }

    // Reconciliation order matters: tracked files are deleted first, emptied
    // directories pruned deepest-first, then target directories and files are
    // written.
    pub fn apply_tree(&self, current: &TreeState, target: &TreeState) -> anyhow::Result<()> {
        for path in tree::file_paths(current) {
            if target.get(&path).is_none_or(TreeNode::is_directory) {
                let absolute = self.absolute_path(&path);
                if absolute.is_file() {
                    std::fs::remove_file(&absolute)
                        .with_context(|| format!("failed to remove file: {:?}", absolute))?;
                }
            }
        }

        for path in tree::directory_paths_deepest_first(current) {
            let absolute = self.absolute_path(&path);
            // only prune directories that are now empty; errors are skipped
            if std::fs::read_dir(&absolute)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false)
            {
                let _ = std::fs::remove_dir(&absolute);
            }
        }

        for (path, node) in target {
            if node.is_directory() {
                std::fs::create_dir_all(self.absolute_path(path))?;
            }
        }

        for (path, node) in target {
            match node {
                TreeNode::Directory => {}
                TreeNode::File { content, .. } => {
                    self.write_file(path, content.as_bytes())?;
                }
                TreeNode::Binary { content, .. } => {
                    let bytes = BASE64
                        .decode(content)
                        .with_context(|| format!("invalid base64 content for '{path}'"))?;
                    self.write_file(path, &bytes)?;
                }
            }
        }

        Ok(())
    }

    fn write_file(&self, relative: &str, data: &[u8]) -> anyhow::Result<()> {
        let absolute = self.absolute_path(relative);
        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&absolute)
            .with_context(|| format!("failed to open file: {:?}", absolute))?;
        file.write_all(data)
            .with_context(|| format!("failed to write to file: {:?}", absolute))?;

        Ok(())
    }
}

/// Build a tree node from raw file bytes using the shared classification
/// rules (also used by the Git import adapter)
pub fn node_from_bytes(
    options: &ScanOptions,
    path: &Path,
    bytes: Vec<u8>,
) -> anyhow::Result<TreeNode> {
    if is_binary(options, path, &bytes) {
        return Ok(binary_node(&bytes));
    }

    match String::from_utf8(bytes) {
        Ok(content) => {
            let id = hasher::text_blob_id(&content)?;
            Ok(TreeNode::File { content, id })
        }
        // not valid UTF-8, keep the raw bytes
        Err(error) => Ok(binary_node(&error.into_bytes())),
    }
}

fn binary_node(bytes: &[u8]) -> TreeNode {
    TreeNode::Binary {
        content: BASE64.encode(bytes),
        size: bytes.len() as u64,
        id: hasher::binary_blob_id(bytes).expect("sha1 output is a valid object id"),
    }
}

fn is_binary(options: &ScanOptions, path: &Path, bytes: &[u8]) -> bool {
    let known_extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| options.binary_extensions.contains(&ext));

    let probe = &bytes[..bytes.len().min(options.binary_probe_bytes)];
    known_extension || probe.contains(&0)
}
