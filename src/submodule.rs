//! Submodule discovery and grafting.
//!
//! A repository may embed other repositories. Each one has its own tree in the
//! source, stored under its path, and is merged into the primary tree (and the
//! highlight tree) at that path.

use serde::Serialize;

use crate::source::{QueryParams, TreeSource};
use crate::tree::merge::try_insert_subtree;
use crate::tree::path::{join, normalize};
use crate::tree::TreeNode;

/// Nesting limit for submodule manifests
pub const MAX_SUBMODULE_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmoduleTree {
    /// Path from the top-level repository (`""` for the top level itself)
    pub path: String,
    pub submodules: Vec<SubmoduleTree>,
    /// Disabled modules are not merged, and neither are their descendants
    pub enabled: bool,
}

impl SubmoduleTree {
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize(path),
            submodules: Vec::new(),
            enabled: true,
        }
    }

    /// Read manifests recursively, starting at `path`.
    pub fn discover(source: &dyn TreeSource, path: &str) -> Self {
        let tree = discover_at(source, &normalize(path), 0);
        tracing::debug!("Discovered {} submodules below '{}'", tree.count(), tree.path);
        tree
    }

    /// Number of submodules below this node.
    pub fn count(&self) -> usize {
        self.submodules.iter().map(|s| 1 + s.count()).sum()
    }

    pub fn find(&self, path: &str) -> Option<&SubmoduleTree> {
        find_in(self, &normalize(path))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut SubmoduleTree> {
        find_in_mut(self, &normalize(path))
    }

    /// Returns false if no submodule lives at `path`.
    pub fn set_enabled(&mut self, path: &str, enabled: bool) -> bool {
        match self.find_mut(path) {
            Some(module) => {
                module.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

fn find_in<'a>(node: &'a SubmoduleTree, path: &str) -> Option<&'a SubmoduleTree> {
    if node.path == path {
        return Some(node);
    }
    node.submodules.iter().find_map(|s| find_in(s, path))
}

fn find_in_mut<'a>(node: &'a mut SubmoduleTree, path: &str) -> Option<&'a mut SubmoduleTree> {
    if node.path == path {
        return Some(node);
    }
    node.submodules.iter_mut().find_map(|s| find_in_mut(s, path))
}

fn discover_at(source: &dyn TreeSource, path: &str, depth: usize) -> SubmoduleTree {
    let mut node = SubmoduleTree::new(path);
    if depth >= MAX_SUBMODULE_DEPTH {
        tracing::warn!("Submodule nesting too deep at '{}', not descending", path);
        return node;
    }
    for name in source.submodule_names(path) {
        if name.split('/').any(|s| s == "." || s == "..") {
            tracing::warn!("Ignoring submodule '{}' of '{}': relative segments", name, path);
            continue;
        }
        let child = normalize(&join(path, &name));
        if child == path {
            continue;
        }
        node.submodules.push(discover_at(source, &child, depth + 1));
    }
    node
}

/// Merge the tree of every enabled submodule into `primary`, parents before
/// children. Returns the number of submodules merged. Nothing is merged when
/// `tree` itself is disabled.
pub fn populate(primary: &mut TreeNode, source: &dyn TreeSource, tree: &SubmoduleTree) -> usize {
    graft_all(primary, tree, &mut |path: &str| source.fetch_tree(path, &QueryParams::new()))
}

/// Like [`populate`], for highlight trees fetched with `params`.
pub fn populate_highlight(
    highlight: &mut TreeNode,
    source: &dyn TreeSource,
    tree: &SubmoduleTree,
    params: &QueryParams,
) -> usize {
    graft_all(highlight, tree, &mut |path: &str| source.fetch_highlight(path, params))
}

fn graft_all(
    host: &mut TreeNode,
    tree: &SubmoduleTree,
    fetch: &mut dyn FnMut(&str) -> Option<TreeNode>,
) -> usize {
    if !tree.enabled {
        tracing::debug!("Submodules below '{}' are disabled", tree.path);
        return 0;
    }
    let mut merged = 0;
    for module in &tree.submodules {
        if !module.enabled {
            tracing::debug!("Skipping disabled submodule '{}'", module.path);
            continue;
        }
        let Some(subtree) = fetch(&module.path) else {
            tracing::warn!("No tree for submodule '{}', skipping it and its children", module.path);
            continue;
        };
        if try_insert_subtree(host, subtree, &module.path).is_none() {
            tracing::warn!("Submodule '{}' could not be merged, skipping its children", module.path);
            continue;
        }
        merged += 1 + graft_all(host, module, fetch);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::tree::path::resolve;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_tree(
                "",
                TreeNode::internal(
                    "root",
                    vec![
                        TreeNode::leaf("main.rs", 10.0),
                        TreeNode::internal("libs", vec![TreeNode::leaf("foo", 0.0)]),
                    ],
                ),
            )
            .with_submodules("", &["libs/foo", "vendor/bar"])
            .with_submodules("/libs/foo", &["deps/baz"])
            .with_tree("/libs/foo", TreeNode::internal("foo", vec![TreeNode::leaf("lib.rs", 4.0)]))
            .with_tree("/libs/foo/deps/baz", TreeNode::leaf("baz", 2.0))
    }

    #[test]
    fn discovers_nested_manifests() {
        let tree = SubmoduleTree::discover(&source(), "");
        assert_eq!(tree.count(), 3);
        let paths: Vec<&str> = tree.submodules.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["/libs/foo", "/vendor/bar"]);
        assert!(tree.find("/libs/foo/deps/baz").is_some());
        assert!(tree.find("/libs/foobar").is_none());
    }

    #[test]
    fn populates_parents_before_children() {
        let source = source();
        let mut primary = source.fetch_tree("", &QueryParams::new()).expect("primary");
        let tree = SubmoduleTree::discover(&source, "");

        // vendor/bar has no tree of its own
        assert_eq!(populate(&mut primary, &source, &tree), 2);
        assert_eq!(primary.weight(), 16.0);
        let foo = resolve(&primary, "/libs/foo").expect("grafted");
        assert!(foo.is_submodule());
        assert_eq!(foo.weight(), 6.0);
        assert!(resolve(&primary, "/libs/foo/deps/baz").is_some());
        assert!(resolve(&primary, "/vendor").is_none());
    }

    #[test]
    fn disabled_modules_are_skipped_with_descendants() {
        let source = source();
        let mut primary = source.fetch_tree("", &QueryParams::new()).expect("primary");
        let mut tree = SubmoduleTree::discover(&source, "");
        assert!(tree.set_enabled("libs/foo", false));
        assert!(!tree.set_enabled("/nope", false));

        assert_eq!(populate(&mut primary, &source, &tree), 0);
        assert_eq!(primary.weight(), 10.0);
        assert!(resolve(&primary, "/libs/foo/deps").is_none());
    }

    #[test]
    fn disabling_the_root_disables_everything() {
        let source = source();
        let mut primary = source.fetch_tree("", &QueryParams::new()).expect("primary");
        let mut tree = SubmoduleTree::discover(&source, "");
        assert!(tree.set_enabled("", false));

        assert_eq!(populate(&mut primary, &source, &tree), 0);
        assert_eq!(primary.weight(), 10.0);
        assert!(resolve(&primary, "/libs/foo/lib.rs").is_none());
    }

    #[test]
    fn refused_grafts_are_not_counted() {
        let source = MemorySource::new()
            .with_tree("", TreeNode::internal("root", vec![TreeNode::leaf("blob", 5.0)]))
            .with_submodules("", &["blob/inner", "ok"])
            .with_tree("/blob/inner", TreeNode::leaf("inner", 1.0))
            .with_tree("/ok", TreeNode::leaf("ok", 2.0));
        let mut primary = source.fetch_tree("", &QueryParams::new()).expect("primary");
        let tree = SubmoduleTree::discover(&source, "");

        assert_eq!(populate(&mut primary, &source, &tree), 1);
        assert_eq!(primary.weight(), 7.0);
    }

    #[test]
    fn relative_segments_are_ignored() {
        let source = MemorySource::new()
            .with_submodules("", &["..", "./x", "a/../b", "ok"])
            .with_submodules("/ok", &[".."]);
        let tree = SubmoduleTree::discover(&source, "");
        assert_eq!(tree.count(), 1);
        assert_eq!(tree.submodules[0].path, "/ok");
    }

    #[test]
    fn highlight_trees_use_params() {
        let source = MemorySource::new()
            .with_submodules("", &["sub"])
            .with_highlight("/sub", TreeNode::leaf("sub", 3.0));
        let tree = SubmoduleTree::discover(&source, "");
        let mut highlight = TreeNode::internal("/", vec![]);
        let params = QueryParams::new().with("author", "ada");
        assert_eq!(populate_highlight(&mut highlight, &source, &tree, &params), 1);
        assert_eq!(highlight.weight(), 3.0);
    }
}
