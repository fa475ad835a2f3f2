//! Highlight intensities: map a secondary weighting (e.g. change counts) onto
//! `[0, 1]` for every matching box of a layout.
//!
//! The highlight tree is matched against the layout by name, level by level.
//! Each highlight leaf with a positive weight annotates its box. Scores are
//! either the raw value or the value per unit of area, and are spread over
//! `[0, 1]` with a log curve through the smallest and largest score:
//!
//! ```text
//! intensity = ln(score - min + 1) / ln(max - min + 1)
//! ```
//!
//! In fraction mode a box with zero area has an infinite score. Such boxes
//! are left out of the min/max scan and always get intensity 1.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::{for_each_mut, walk, LayoutRect};
use crate::tree::TreeNode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Highlight value divided by the box's area
    #[default]
    Fraction,
    /// Highlight value as is
    Raw,
}

impl HighlightMode {
    pub fn score(self, value: f64, area: f64) -> f64 {
        match self {
            HighlightMode::Raw => value,
            HighlightMode::Fraction if area > 0.0 => value / area,
            HighlightMode::Fraction => f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub mode: HighlightMode,
    /// Fixed hue for highlighted boxes; by default each file's extension hue is used
    pub hue: Option<f64>,
}

/// Highlight data attached to a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    pub value: f64,
    pub intensity: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HighlightSummary {
    /// Boxes that received a highlight value
    pub annotated: usize,
    /// Smallest and largest finite score
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    /// Boxes with an infinite score (zero area in fraction mode)
    pub saturated: usize,
}

/// Annotate `rects` from `highlight` and assign intensities.
/// Any highlights from a previous call are cleared first.
pub fn normalize(
    rects: &mut [LayoutRect],
    highlight: &TreeNode,
    config: &HighlightConfig,
) -> HighlightSummary {
    for_each_mut(rects, &mut |r: &mut LayoutRect| r.highlight = None);
    let annotated = attach(rects, highlight.children());

    let mut summary = HighlightSummary {
        annotated,
        ..HighlightSummary::default()
    };
    for rect in walk(rects) {
        let Some(h) = rect.highlight else { continue };
        let score = config.mode.score(h.value, rect.area);
        if score.is_finite() {
            summary.min_score = Some(summary.min_score.map_or(score, |m| m.min(score)));
            summary.max_score = Some(summary.max_score.map_or(score, |m| m.max(score)));
        } else {
            summary.saturated += 1;
        }
    }

    let curve = match (summary.min_score, summary.max_score) {
        (Some(min), Some(max)) if max > min => Some(Curve::Log { min, max }),
        (Some(min), Some(_)) if min > 0.0 => Some(Curve::Uniform),
        (None, None) if summary.saturated > 0 => Some(Curve::Uniform),
        _ => None,
    };

    if let Some(curve) = curve {
        let mode = config.mode;
        for_each_mut(rects, &mut |r: &mut LayoutRect| {
            let area = r.area;
            if let Some(h) = r.highlight.as_mut() {
                h.intensity = Some(curve.apply(mode.score(h.value, area)));
            }
        });
    }

    tracing::debug!(
        "Highlighted {} boxes (score range {:?}..{:?}, {} saturated)",
        summary.annotated,
        summary.min_score,
        summary.max_score,
        summary.saturated
    );
    summary
}

#[derive(Debug, Clone, Copy)]
enum Curve {
    Log { min: f64, max: f64 },
    Uniform,
}

impl Curve {
    fn apply(self, score: f64) -> f64 {
        match self {
            _ if !score.is_finite() => 1.0,
            Curve::Uniform => 1.0,
            Curve::Log { min, max } => {
                ((score - min + 1.0).ln() / (max - min + 1.0).ln()).clamp(0.0, 1.0)
            }
        }
    }
}

/// Match `highlights` against `rects` by name and attach values of positive
/// highlight leaves. Returns the number of boxes annotated.
fn attach(rects: &mut [LayoutRect], highlights: &[TreeNode]) -> usize {
    let mut attached = 0;
    for hl in highlights {
        let Some(rect) = rects.iter_mut().find(|r| r.label == hl.name()) else {
            tracing::debug!("No box for highlighted '{}'", hl.name());
            continue;
        };
        match hl {
            TreeNode::Internal { children, .. } => match rect.children.as_mut() {
                Some(nested) => attached += attach(nested, children),
                None => tracing::debug!("Highlight directory '{}' is a file in the layout", hl.name()),
            },
            TreeNode::Leaf { weight, .. } if *weight > 0.0 => {
                rect.highlight = Some(Highlight {
                    value: *weight,
                    intensity: None,
                });
                attached += 1;
            }
            TreeNode::Leaf { .. } => {}
        }
    }
    attached
}

/// Highlight value of every box matched by `highlight`, directories included,
/// keyed by box path. Used for hover text.
pub fn title_values(rects: &[LayoutRect], highlight: &TreeNode) -> HashMap<String, f64> {
    fn collect(rects: &[LayoutRect], highlights: &[TreeNode], out: &mut HashMap<String, f64>) {
        for hl in highlights {
            let Some(rect) = rects.iter().find(|r| r.label == hl.name()) else {
                continue;
            };
            if let Some(nested) = &rect.children {
                collect(nested, hl.children(), out);
            }
            out.insert(rect.path(), hl.weight());
        }
    }
    let mut out = HashMap::new();
    collect(rects, highlight.children(), &mut out);
    out
}
