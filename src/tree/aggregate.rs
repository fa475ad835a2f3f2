use super::TreeNode;

/// Recompute the weight of every internal node (bottom-up).
/// After this, each internal node's weight equals the sum of its children's weights.
/// Returns the new weight of `node`.
pub fn aggregate_weights(node: &mut TreeNode) -> f64 {
    match node {
        TreeNode::Leaf { weight, .. } => *weight,
        TreeNode::Internal {
            weight, children, ..
        } => {
            *weight = children.iter_mut().map(aggregate_weights).sum();
            *weight
        }
    }
}

/// Sort the direct children of `node` by weight (descending).
/// The sort is stable so equal weights keep their original order.
pub fn sort_children(node: &mut TreeNode) {
    if let Some(children) = node.children_mut() {
        children.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
    }
}

/// Sort children of every internal node by weight (descending).
/// The squarified layout expects children sorted by weight.
pub fn sort_children_by_weight(node: &mut TreeNode) {
    if let Some(children) = node.children_mut() {
        children.iter_mut().for_each(sort_children_by_weight);
    }
    sort_children(node);
}

/// Path of the first internal node whose weight differs from the sum of its
/// children by more than `tolerance` (relative to the larger of the two).
pub fn find_weight_mismatch(node: &TreeNode, tolerance: f64) -> Option<String> {
    fn walk(node: &TreeNode, path: &str, tolerance: f64) -> Option<String> {
        let TreeNode::Internal {
            weight, children, ..
        } = node
        else {
            return None;
        };
        let sum: f64 = children.iter().map(TreeNode::weight).sum();
        let scale = weight.abs().max(sum.abs()).max(1.0);
        if (weight - sum).abs() > tolerance * scale {
            return Some(path.to_string());
        }
        children
            .iter()
            .find_map(|c| walk(c, &format!("{}/{}", path, c.name()), tolerance))
    }
    walk(node, "", tolerance)
}
