pub mod aggregate;
pub mod extensions;
pub mod merge;
pub mod path;
pub mod wire;

use compact_str::CompactString;

/// A node in a weighted tree (a file, a directory, or a grafted submodule).
///
/// For `Internal` nodes the weight is the sum of the children's weights; this is
/// re-established after loading and after every merge.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        name: CompactString,
        weight: f64,
        is_submodule: bool,
    },
    Internal {
        name: CompactString,
        weight: f64,
        children: Vec<TreeNode>,
        is_submodule: bool,
    },
}

impl TreeNode {
    pub fn leaf(name: &str, weight: f64) -> Self {
        TreeNode::Leaf {
            name: CompactString::new(name),
            weight,
            is_submodule: false,
        }
    }

    /// Internal node whose weight is the sum of `children`.
    pub fn internal(name: &str, children: Vec<TreeNode>) -> Self {
        let weight = children.iter().map(TreeNode::weight).sum();
        TreeNode::Internal {
            name: CompactString::new(name),
            weight,
            children,
            is_submodule: false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Leaf { name, .. } | TreeNode::Internal { name, .. } => name.as_str(),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            TreeNode::Leaf { weight, .. } | TreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_submodule(&self) -> bool {
        match self {
            TreeNode::Leaf { is_submodule, .. } | TreeNode::Internal { is_submodule, .. } => {
                *is_submodule
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Children in their current order (empty for leaves).
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf { .. } => &[],
            TreeNode::Internal { children, .. } => children,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { children, .. } => Some(children),
        }
    }

    pub(crate) fn weight_mut(&mut self) -> &mut f64 {
        match self {
            TreeNode::Leaf { weight, .. } | TreeNode::Internal { weight, .. } => weight,
        }
    }

    pub(crate) fn set_name(&mut self, new_name: &str) {
        match self {
            TreeNode::Leaf { name, .. } | TreeNode::Internal { name, .. } => {
                *name = CompactString::new(new_name)
            }
        }
    }

    pub fn set_submodule(&mut self, flag: bool) {
        match self {
            TreeNode::Leaf { is_submodule, .. } | TreeNode::Internal { is_submodule, .. } => {
                *is_submodule = flag
            }
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children().iter().map(TreeNode::len).sum::<usize>()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of levels below this node (0 for a leaf or an empty directory).
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Iterate over every leaf in this subtree, depth-first.
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    TreeNode::Leaf { .. } => return Some(node),
                    TreeNode::Internal { children, .. } => stack.extend(children.iter().rev()),
                }
            }
            None
        })
    }
}
