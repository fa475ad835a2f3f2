pub mod squarify;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::highlight::Highlight;
use crate::tree::TreeNode;

pub use self::squarify::{squarify, worst};

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRect {
    pub label: CompactString,
    /// Weight of the source node
    pub area: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Path of the enclosing node (`""` at the root)
    pub parent_path: String,
    pub depth: u16,
    pub is_submodule: bool,
    /// Nested layout of the node's children, `None` for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<LayoutRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl LayoutRect {
    pub fn path(&self) -> String {
        crate::tree::path::join(&self.parent_path, &self.label)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether the rectangle clears the configured minimum area.
    pub fn is_visible(&self, config: &LayoutConfig) -> bool {
        self.area >= config.min_area.max(0.0)
    }

    /// Screen area actually covered (`width * height`).
    pub fn extent(&self) -> f64 {
        self.width * self.height
    }

    pub fn intensity(&self) -> Option<f64> {
        self.highlight.and_then(|h| h.intensity)
    }
}

/// Running totals gathered while laying out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutStats {
    /// Deepest nesting level reached (1 when only top-level boxes were placed)
    pub max_depth: u16,
    pub rect_count: usize,
}

/// The full layout result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub rects: Vec<LayoutRect>,
    pub width: f64,
    pub height: f64,
    pub stats: LayoutStats,
}

impl Layout {
    /// All rectangles, parents before their children.
    pub fn iter(&self) -> RectIter<'_> {
        walk(&self.rects)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LayoutRect> {
        self.iter().filter(|r| r.is_leaf())
    }

    pub fn find(&self, path: &str) -> Option<&LayoutRect> {
        self.iter().find(|r| r.path() == path)
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rectangles with a smaller area are flagged as not visible
    pub min_area: f64,
    /// Maximum nesting depth; deeper subtrees are not laid out
    pub max_depth: u16,
    /// Lay out the children of every box, not only the top level
    pub nest: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            max_depth: 256,
            nest: true,
        }
    }
}

/// Canvas for `area` weight units at the given width/height ratio, so that
/// one unit of weight covers one unit of canvas area.
pub fn canvas_size(area: f64, aspect_ratio: f64) -> (f64, f64) {
    if area <= 0.0 || !area.is_finite() || aspect_ratio <= 0.0 || !aspect_ratio.is_finite() {
        return (0.0, 0.0);
    }
    let width = (area * aspect_ratio).sqrt();
    (width, area / width)
}

/// Lay out `node` (any subtree, for drill-down) on a canvas sized from its
/// weight and `aspect_ratio`. `path` is the node's own path and becomes the
/// parent path of the top-level boxes.
pub fn compute_layout(
    node: &TreeNode,
    x: f64,
    y: f64,
    aspect_ratio: f64,
    path: &str,
    config: &LayoutConfig,
) -> Layout {
    let (width, height) = canvas_size(node.weight(), aspect_ratio);
    let mut stats = LayoutStats::default();

    let rects = match node {
        TreeNode::Internal { children, .. } => {
            squarify(x, y, width, height, children, path, 0, config, &mut stats)
        }
        TreeNode::Leaf { .. } => squarify(
            x,
            y,
            width,
            height,
            std::slice::from_ref(node),
            path,
            0,
            config,
            &mut stats,
        ),
    };

    tracing::debug!(
        "Laid out '{}' (weight {}) into {:.1}x{:.1}: {} rects, max depth {}",
        path,
        node.weight(),
        width,
        height,
        stats.rect_count,
        stats.max_depth
    );

    Layout {
        rects,
        width,
        height,
        stats,
    }
}

/// Pre-order iterator over nested rectangles.
pub struct RectIter<'a> {
    stack: Vec<&'a LayoutRect>,
}

pub fn walk(rects: &[LayoutRect]) -> RectIter<'_> {
    RectIter {
        stack: rects.iter().rev().collect(),
    }
}

impl<'a> Iterator for RectIter<'a> {
    type Item = &'a LayoutRect;

    fn next(&mut self) -> Option<&'a LayoutRect> {
        let rect = self.stack.pop()?;
        if let Some(children) = &rect.children {
            self.stack.extend(children.iter().rev());
        }
        Some(rect)
    }
}

/// Apply `f` to every rectangle, parents before their children.
pub fn for_each_mut(rects: &mut [LayoutRect], f: &mut impl FnMut(&mut LayoutRect)) {
    for rect in rects {
        f(&mut *rect);
        if let Some(children) = rect.children.as_mut() {
            for_each_mut(children, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TreeNode {
        TreeNode::internal(
            "root",
            vec![
                TreeNode::internal("src", vec![TreeNode::leaf("a.rs", 6.0), TreeNode::leaf("b.rs", 2.0)]),
                TreeNode::leaf("README.md", 2.0),
            ],
        )
    }

    #[test]
    fn canvas_matches_weight() {
        let (w, h) = canvas_size(100.0, 4.0);
        assert!((w - 20.0).abs() < 1e-9);
        assert!((h - 5.0).abs() < 1e-9);
        assert_eq!(canvas_size(0.0, 1.5), (0.0, 0.0));
        assert_eq!(canvas_size(10.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn layout_covers_canvas() {
        let layout = compute_layout(&tree(), 0.0, 0.0, 1.0, "", &LayoutConfig::default());
        let covered: f64 = layout.rects.iter().map(LayoutRect::extent).sum();
        assert!((covered - layout.width * layout.height).abs() < 1e-9);
        assert_eq!(layout.stats.rect_count, 4);
        assert_eq!(layout.stats.max_depth, 2);
    }

    #[test]
    fn iteration_and_lookup() {
        let layout = compute_layout(&tree(), 0.0, 0.0, 1.0, "", &LayoutConfig::default());
        let paths: Vec<String> = layout.iter().map(LayoutRect::path).collect();
        assert_eq!(paths, vec!["/src", "/src/a.rs", "/src/b.rs", "/README.md"]);
        let leaves: Vec<&str> = layout.leaves().map(|r| r.label.as_str()).collect();
        assert_eq!(leaves, vec!["a.rs", "b.rs", "README.md"]);
        let a = layout.find("/src/a.rs").expect("laid out");
        assert_eq!(a.depth, 1);
        assert_eq!(a.parent_path, "/src");
        assert!(layout.find("/missing").is_none());
    }

    #[test]
    fn leaf_scope_is_a_single_box() {
        let leaf = TreeNode::leaf("big.bin", 16.0);
        let layout = compute_layout(&leaf, 0.0, 0.0, 1.0, "/big.bin", &LayoutConfig::default());
        assert_eq!(layout.rects.len(), 1);
        let r = &layout.rects[0];
        assert!((r.width - 4.0).abs() < 1e-9);
        assert!((r.height - 4.0).abs() < 1e-9);
        assert_eq!(r.path(), "/big.bin/big.bin");
    }

    #[test]
    fn min_area_only_hides() {
        let config = LayoutConfig {
            min_area: 3.0,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&tree(), 0.0, 0.0, 1.0, "", &config);
        assert_eq!(layout.iter().count(), 4);
        let hidden: Vec<&str> = layout
            .iter()
            .filter(|r| !r.is_visible(&config))
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(hidden, vec!["b.rs", "README.md"]);
    }

    #[test]
    fn for_each_mut_reaches_nested_rects() {
        let mut layout = compute_layout(&tree(), 0.0, 0.0, 1.0, "", &LayoutConfig::default());
        let mut seen = 0;
        for_each_mut(&mut layout.rects, &mut |r| {
            r.depth += 10;
            seen += 1;
        });
        assert_eq!(seen, 4);
        assert!(layout.iter().all(|r| r.depth >= 10));
    }
}
