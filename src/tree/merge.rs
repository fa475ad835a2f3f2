use compact_str::CompactString;

use super::aggregate::sort_children;
use super::path::{split_segment, unique_child_index};
use super::TreeNode;

/// Graft `incoming` into `host` at `path` and return the host's new weight.
///
/// Missing segments along the path are created as zero-weight directories.
/// The node at the end of the path keeps the path's segment as its name and
/// takes the incoming weight and children, flagged as a submodule. The weight
/// change is added to every ancestor on the path and their children are
/// re-sorted by weight.
///
/// A segment that matches several children, or that runs through a non-empty
/// file, leaves the host untouched.
///
/// An empty path replaces the host itself.
pub fn insert_subtree(host: &mut TreeNode, incoming: TreeNode, path: &str) -> f64 {
    try_insert_subtree(host, incoming, path);
    host.weight()
}

/// Like [`insert_subtree`], but returns the weight delta applied to `host`,
/// or `None` when the graft was refused.
pub fn try_insert_subtree(host: &mut TreeNode, incoming: TreeNode, path: &str) -> Option<f64> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        let old = host.weight();
        *host = incoming;
        return Some(host.weight() - old);
    }
    let delta = graft(host, incoming, rest)?;
    tracing::debug!("Grafted subtree at '{}' (weight delta {})", path, delta);
    Some(delta)
}

/// Walk one level of `path` below `parent`. Returns the weight delta applied to
/// `parent`, `None` when the walk was abandoned.
fn graft(parent: &mut TreeNode, incoming: TreeNode, path: &str) -> Option<f64> {
    let (segment, rest) = split_segment(path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);

    if !promote_placeholder(parent) {
        tracing::warn!(
            "Cannot graft '{}' below file '{}' (weight {})",
            segment,
            parent.name(),
            parent.weight()
        );
        return None;
    }

    let index = match parent.children().iter().filter(|c| c.name() == segment).count() {
        0 => {
            let children = parent.children_mut()?;
            children.push(TreeNode::Internal {
                name: CompactString::new(segment),
                weight: 0.0,
                children: Vec::new(),
                is_submodule: false,
            });
            children.len() - 1
        }
        1 => unique_child_index(parent, segment)?,
        n => {
            tracing::warn!(
                "Cannot graft at '{}': {} children of '{}' share that name",
                segment,
                n,
                parent.name()
            );
            return None;
        }
    };

    let child = parent.children_mut()?.get_mut(index)?;
    let delta = if rest.is_empty() {
        let old = child.weight();
        let mut replacement = incoming;
        replacement.set_name(segment);
        replacement.set_submodule(true);
        *child = replacement;
        child.weight() - old
    } else {
        graft(child, incoming, rest)?
    };

    *parent.weight_mut() += delta;
    sort_children(parent);
    Some(delta)
}

/// Turn an empty file into an empty directory so something can be grafted
/// below it. Returns false for a file that carries weight.
fn promote_placeholder(node: &mut TreeNode) -> bool {
    let (name, is_submodule) = match node {
        TreeNode::Internal { .. } => return true,
        TreeNode::Leaf { weight, .. } if *weight != 0.0 => return false,
        TreeNode::Leaf {
            name, is_submodule, ..
        } => (std::mem::take(name), *is_submodule),
    };
    *node = TreeNode::Internal {
        name,
        weight: 0.0,
        children: Vec::new(),
        is_submodule,
    };
    true
}
