//! Slash-delimited addressing within a tree.
//!
//! Paths look like `/src/layout/mod.rs`. A leading slash is ignored at every
//! step, and the empty path addresses the node itself. A segment must match
//! exactly one child by name; zero or several matches resolve to `None`.

use super::TreeNode;

/// Split `path` at its first `/` into (segment, rest).
pub(crate) fn split_segment(path: &str) -> (&str, &str) {
    path.split_once('/').unwrap_or((path, ""))
}

/// Index of the unique child of `node` named `name`.
pub(crate) fn unique_child_index(node: &TreeNode, name: &str) -> Option<usize> {
    let mut found = None;
    for (i, child) in node.children().iter().enumerate() {
        if child.name() == name {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

/// Resolve `path` below `node`.
pub fn resolve<'a>(node: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
    let mut current = node;
    let mut rest = path;
    loop {
        rest = rest.strip_prefix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Some(current);
        }
        let (segment, tail) = split_segment(rest);
        let index = unique_child_index(current, segment)?;
        current = &current.children()[index];
        rest = tail;
    }
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(node: &'a mut TreeNode, path: &str) -> Option<&'a mut TreeNode> {
    let mut current = node;
    let mut rest = path;
    loop {
        rest = rest.strip_prefix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Some(current);
        }
        let (segment, tail) = split_segment(rest);
        let index = unique_child_index(current, segment)?;
        current = match current {
            TreeNode::Internal { children, .. } => children.get_mut(index)?,
            TreeNode::Leaf { .. } => return None,
        };
        rest = tail;
    }
}

/// Canonical form of a path: `""` for the root, otherwise `/a/b` with empty
/// segments dropped.
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .fold(String::new(), |mut acc, segment| {
            acc.push('/');
            acc.push_str(segment);
            acc
        })
}

/// Path of a child named `name` under `parent`.
pub fn join(parent: &str, name: &str) -> String {
    format!("{}/{}", parent, name)
}

/// Last segment of a path (`""` for the root).
pub fn file_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}
