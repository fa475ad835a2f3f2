use std::collections::HashMap;

use super::{QueryParams, TreeSource};
use crate::tree::path::normalize;
use crate::tree::TreeNode;

/// Trees held in memory, keyed by repository path. Useful for embedding and
/// tests; query parameters are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    trees: HashMap<String, TreeNode>,
    highlights: HashMap<String, TreeNode>,
    manifests: HashMap<String, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(mut self, path: &str, tree: TreeNode) -> Self {
        self.trees.insert(normalize(path), tree);
        self
    }

    pub fn with_highlight(mut self, path: &str, tree: TreeNode) -> Self {
        self.highlights.insert(normalize(path), tree);
        self
    }

    pub fn with_submodules(mut self, path: &str, names: &[&str]) -> Self {
        self.manifests
            .insert(normalize(path), names.iter().map(|n| n.to_string()).collect());
        self
    }
}

impl TreeSource for MemorySource {
    fn fetch_tree(&self, path: &str, _params: &QueryParams) -> Option<TreeNode> {
        self.trees.get(&normalize(path)).cloned()
    }

    fn fetch_highlight(&self, path: &str, _params: &QueryParams) -> Option<TreeNode> {
        self.highlights.get(&normalize(path)).cloned()
    }

    fn submodule_names(&self, path: &str) -> Vec<String> {
        self.manifests
            .get(&normalize(path))
            .cloned()
            .unwrap_or_default()
    }
}
