use super::{LayoutConfig, LayoutRect, LayoutStats};
use crate::tree::TreeNode;

/// Squarified layout of `children` inside the rectangle `(x, y, width, height)`.
///
/// Children are taken in the given order (sorted by weight descending for the
/// classic result) and grouped into rows along the shorter side. A row keeps
/// growing while the next child does not make its worst aspect ratio worse.
/// Every child yields exactly one rectangle, even with zero weight.
#[allow(clippy::too_many_arguments)]
pub fn squarify(
    mut x: f64,
    mut y: f64,
    width: f64,
    height: f64,
    children: &[TreeNode],
    parent_path: &str,
    depth: u16,
    config: &LayoutConfig,
    stats: &mut LayoutStats,
) -> Vec<LayoutRect> {
    let mut w = width.max(0.0);
    let mut h = height.max(0.0);
    let mut result = Vec::with_capacity(children.len());
    let mut remaining = children;

    while !remaining.is_empty() {
        let side = w.min(h);
        let (row, rest) = remaining.split_at(row_length(remaining, side));

        result.extend(layout_row(row, x, y, w, h, parent_path, depth, config, stats));

        // Shrink remaining space along the long axis
        let row_sum: f64 = row.iter().map(TreeNode::weight).sum();
        let used = if side > 0.0 { row_sum / side } else { 0.0 };
        if w >= h {
            x += used;
            w = (w - used).max(0.0);
        } else {
            y += used;
            h = (h - used).max(0.0);
        }

        remaining = rest;
    }

    result
}

/// Number of leading `children` that form the next row against `side`.
/// Always at least one so the layout makes progress.
fn row_length(children: &[TreeNode], side: f64) -> usize {
    let mut row: Vec<f64> = Vec::with_capacity(children.len().min(16));
    let mut current = f64::INFINITY;
    for child in children {
        row.push(child.weight());
        let candidate = worst(&row, side);
        if candidate <= current {
            current = candidate;
        } else {
            row.pop();
            break;
        }
    }
    row.len().max(1)
}

/// Worst aspect ratio of the boxes in `row` when laid side by side along `side`.
///
/// A row with zero total weight, or laid against a zero side, scores
/// `-inf` so it is always accepted.
pub fn worst(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum == 0.0 || side == 0.0 {
        return f64::NEG_INFINITY;
    }
    // Divide before multiplying so weights near f64::MAX stay finite
    let ratio = sum / side;
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    let a = max_r / ratio / ratio;
    let b = ratio / min_r * ratio;
    a.max(b)
}

/// Place one frozen row. When the space is wider than tall the row is a column
/// on the left edge; otherwise it is a strip along the top edge. Boxes split
/// the row's length in proportion to their weight.
#[allow(clippy::too_many_arguments)]
fn layout_row(
    row: &[TreeNode],
    mut x: f64,
    mut y: f64,
    w: f64,
    h: f64,
    parent_path: &str,
    depth: u16,
    config: &LayoutConfig,
    stats: &mut LayoutStats,
) -> Vec<LayoutRect> {
    let row_sum: f64 = row.iter().map(TreeNode::weight).sum();
    let column = w >= h;
    let fixed = if column { h } else { w };
    let thickness = if fixed != 0.0 { row_sum / fixed } else { 0.0 };

    let mut out = Vec::with_capacity(row.len());
    for node in row {
        let area = node.weight();
        let length = if thickness != 0.0 { area / thickness } else { 0.0 };
        let (bw, bh) = if column {
            (thickness, length)
        } else {
            (length, thickness)
        };

        let children = match node {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { children, .. } => Some(nested(
                node, children, x, y, bw, bh, parent_path, depth, config, stats,
            )),
        };

        out.push(LayoutRect {
            label: node.name().into(),
            area,
            x,
            y,
            width: bw,
            height: bh,
            parent_path: parent_path.to_string(),
            depth,
            is_submodule: node.is_submodule(),
            children,
            highlight: None,
        });

        if column {
            y += length;
        } else {
            x += length;
        }
    }

    stats.max_depth = stats.max_depth.max(depth.saturating_add(1));
    stats.rect_count += row.len();
    out
}

/// Layout of an internal node's children inside its box.
#[allow(clippy::too_many_arguments)]
fn nested(
    node: &TreeNode,
    children: &[TreeNode],
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    parent_path: &str,
    depth: u16,
    config: &LayoutConfig,
    stats: &mut LayoutStats,
) -> Vec<LayoutRect> {
    if !config.nest {
        return Vec::new();
    }
    let child_depth = depth.saturating_add(1);
    if child_depth >= config.max_depth {
        tracing::warn!(
            "Not laying out {} children of '{}/{}': depth limit {} reached",
            children.len(),
            parent_path,
            node.name(),
            config.max_depth
        );
        return Vec::new();
    }
    let path = crate::tree::path::join(parent_path, node.name());
    squarify(x, y, w, h, children, &path, child_depth, config, stats)
}
