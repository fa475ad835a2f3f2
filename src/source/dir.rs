use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{QueryParams, TreeSource, FILETREE_FILE, HIGHLIGHT_FILE, MANIFEST_FILE};
use crate::error::{TreemapError, TreemapResult};
use crate::tree::TreeNode;

/// Reads trees from a database directory laid out as
///
/// ```text
/// <root>/filetree.json
/// <root>/highlight.json
/// <root>/.gitmodules
/// <root>/<submodule path>/filetree.json
/// ...
/// ```
///
/// Static files cannot be filtered, so query parameters are only logged.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the repository at `path`. `.` and `..` segments are
    /// dropped so the result always stays below the root.
    pub fn repo_dir(&self, path: &str) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(
            path.split('/')
                .filter(|s| !s.is_empty() && *s != "." && *s != ".."),
        );
        dir
    }

    pub fn read_tree(&self, path: &str, file: &str) -> TreemapResult<TreeNode> {
        let file_path = self.repo_dir(path).join(file);
        let text = fs::read_to_string(&file_path).map_err(|source| TreemapError::Io {
            path: file_path.clone(),
            source,
        })?;
        TreeNode::from_json(&text)
    }

    pub fn read_manifest(&self, path: &str) -> TreemapResult<Vec<String>> {
        let file_path = self.repo_dir(path).join(MANIFEST_FILE);
        match fs::read_to_string(&file_path) {
            Ok(text) => Ok(parse_manifest(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(TreemapError::Io {
                path: file_path,
                source,
            }),
        }
    }

    fn load(&self, path: &str, file: &str, params: &QueryParams) -> Option<TreeNode> {
        if !params.is_empty() {
            tracing::debug!(
                "Ignoring query '{}' for static {}{}",
                params.to_query_string(),
                path,
                file
            );
        }
        match self.read_tree(path, file) {
            Ok(tree) => {
                tracing::debug!(
                    "Loaded {} for '{}': {} nodes, weight {}",
                    file,
                    path,
                    tree.len(),
                    tree.weight()
                );
                Some(tree)
            }
            Err(e) => {
                tracing::warn!("Could not load {} for '{}': {}", file, path, e);
                None
            }
        }
    }
}

/// A manifest is either a JSON array of names or one name per line.
pub fn parse_manifest(text: &str) -> Vec<String> {
    if let Ok(names) = serde_json::from_str::<Vec<String>>(text) {
        return names;
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

impl TreeSource for DirSource {
    fn fetch_tree(&self, path: &str, params: &QueryParams) -> Option<TreeNode> {
        self.load(path, FILETREE_FILE, params)
    }

    fn fetch_highlight(&self, path: &str, params: &QueryParams) -> Option<TreeNode> {
        self.load(path, HIGHLIGHT_FILE, params)
    }

    fn submodule_names(&self, path: &str) -> Vec<String> {
        self.read_manifest(path).unwrap_or_else(|e| {
            tracing::warn!("Could not read submodule manifest for '{}': {}", path, e);
            Vec::new()
        })
    }
}
