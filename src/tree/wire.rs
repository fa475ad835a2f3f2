//! JSON wire format: `{ "name": ..., "val": ..., "children"?: [...], "submodule"?: bool }`.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate_weights, sort_children_by_weight};
use super::TreeNode;
use crate::error::{TreemapError, TreemapResult};

/// Deepest tree accepted from the wire. serde_json's own recursion limit
/// usually rejects deeper JSON documents first.
pub const MAX_TREE_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(default)]
    pub name: CompactString,
    #[serde(default)]
    pub val: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<WireNode>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub submodule: bool,
}

impl TreeNode {
    /// Parse a tree from JSON. Internal weights are re-aggregated and children
    /// sorted by weight, so the result always satisfies the weight invariant.
    pub fn from_json(text: &str) -> TreemapResult<Self> {
        let wire: WireNode = serde_json::from_str(text)?;
        Self::from_wire(wire)
    }

    pub fn from_wire(wire: WireNode) -> TreemapResult<Self> {
        let mut node = convert(wire, 0)?;
        aggregate_weights(&mut node);
        sort_children_by_weight(&mut node);
        Ok(node)
    }

    pub fn to_wire(&self) -> WireNode {
        WireNode {
            name: CompactString::new(self.name()),
            val: self.weight(),
            children: match self {
                TreeNode::Leaf { .. } => None,
                TreeNode::Internal { children, .. } => {
                    Some(children.iter().map(TreeNode::to_wire).collect())
                }
            },
            submodule: self.is_submodule(),
        }
    }

    pub fn to_json(&self) -> TreemapResult<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }
}

fn convert(wire: WireNode, depth: usize) -> TreemapResult<TreeNode> {
    if depth > MAX_TREE_DEPTH {
        return Err(TreemapError::invalid_tree(format!(
            "nesting deeper than {} levels below '{}'",
            MAX_TREE_DEPTH, wire.name
        )));
    }
    if !wire.val.is_finite() || wire.val < 0.0 {
        return Err(TreemapError::invalid_tree(format!(
            "'{}' has weight {}",
            wire.name, wire.val
        )));
    }
    Ok(match wire.children {
        None => TreeNode::Leaf {
            name: wire.name,
            weight: wire.val,
            is_submodule: wire.submodule,
        },
        Some(children) => TreeNode::Internal {
            name: wire.name,
            weight: wire.val,
            children: children
                .into_iter()
                .map(|c| convert(c, depth + 1))
                .collect::<TreemapResult<Vec<_>>>()?,
            is_submodule: wire.submodule,
        },
    })
}
