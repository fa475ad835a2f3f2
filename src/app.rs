use std::collections::HashMap;

use crate::config::Config;
use crate::error::{TreemapError, TreemapResult};
use crate::highlight::{self, HighlightSummary};
use crate::layout::{compute_layout, Layout, LayoutRect};
use crate::navigation::NavigationState;
use crate::source::{QueryParams, TreeSource};
use crate::style::{self, ExtensionStats, Hsl};
use crate::submodule::{self, SubmoduleTree};
use crate::tree::aggregate::sort_children_by_weight;
use crate::tree::path::resolve;
use crate::tree::TreeNode;

/// Top-level session state: the merged trees, submodule toggles and the
/// navigation history.
pub struct App {
    source: Box<dyn TreeSource>,
    pub config: Config,

    // Data
    tree: TreeNode,
    highlight: TreeNode,
    submodules: SubmoduleTree,

    // Query state
    tree_params: QueryParams,
    highlight_params: Option<QueryParams>,

    // UI state
    pub navigation: NavigationState,
}

/// Everything needed to draw the current view.
#[derive(Debug, Clone)]
pub struct View {
    /// Path of the node being shown
    pub path: String,
    pub layout: Layout,
    pub highlight: HighlightSummary,
    /// Highlight value per box path, for hover text
    pub titles: HashMap<String, f64>,
    pub extensions: ExtensionStats,
    /// Fixed highlight hue, if configured
    pub hue: Option<f64>,
}

impl View {
    pub fn title(&self, rect: &LayoutRect) -> String {
        style::title(rect, &self.titles)
    }

    pub fn fill(&self, rect: &LayoutRect) -> Option<Hsl> {
        style::leaf_fill(rect, self.hue)
    }
}

impl App {
    /// Fetch the primary tree and merge in every submodule. With
    /// `highlight_params` a highlight tree is fetched as well; without, the
    /// primary tree doubles as the highlight tree.
    pub fn load(
        source: Box<dyn TreeSource>,
        tree_params: QueryParams,
        highlight_params: Option<QueryParams>,
        config: Config,
    ) -> TreemapResult<Self> {
        let submodules = SubmoduleTree::discover(source.as_ref(), "");
        let tree = load_tree(source.as_ref(), &submodules, &tree_params)?;
        let highlight = match &highlight_params {
            Some(params) => load_highlight(source.as_ref(), &submodules, params),
            None => tree.clone(),
        };

        tracing::info!(
            "Loaded tree: {} nodes, weight {}, {} submodules",
            tree.len(),
            tree.weight(),
            submodules.count()
        );

        Ok(Self {
            source,
            config,
            tree,
            highlight,
            submodules,
            tree_params,
            highlight_params,
            navigation: NavigationState::new(),
        })
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn highlight_tree(&self) -> &TreeNode {
        &self.highlight
    }

    pub fn submodules(&self) -> &SubmoduleTree {
        &self.submodules
    }

    /// Re-fetch the highlight tree with new parameters (`None` falls back to
    /// the primary tree).
    pub fn reload_highlight(&mut self, params: Option<QueryParams>) {
        self.highlight = match &params {
            Some(params) => load_highlight(self.source.as_ref(), &self.submodules, params),
            None => self.tree.clone(),
        };
        self.highlight_params = params;
    }

    /// Enable or disable a submodule and rebuild both trees. Returns false if
    /// there is no submodule at `path`.
    pub fn set_submodule_enabled(&mut self, path: &str, enabled: bool) -> TreemapResult<bool> {
        if !self.submodules.set_enabled(path, enabled) {
            return Ok(false);
        }
        self.tree = load_tree(self.source.as_ref(), &self.submodules, &self.tree_params)?;
        self.reload_highlight(self.highlight_params.clone());
        if resolve(&self.tree, &self.navigation.current).is_none() {
            self.navigation.navigate_home();
        }
        Ok(true)
    }

    /// Lay out the current navigation path at `aspect_ratio` (width / height)
    /// and apply highlights. `None` if the path no longer resolves.
    pub fn view(&self, aspect_ratio: f64) -> Option<View> {
        let path = self.navigation.current.clone();
        let Some(scope) = resolve(&self.tree, &path) else {
            tracing::warn!("View path '{}' not found in tree", path);
            return None;
        };

        let mut layout = compute_layout(scope, 0.0, 0.0, aspect_ratio, &path, &self.config.layout);

        let (summary, titles) = match resolve(&self.highlight, &path) {
            Some(hl) => {
                // A file scope is laid out as a single box, so match against the file itself
                let wrapped;
                let hl = if scope.is_leaf() {
                    wrapped = TreeNode::internal("", vec![hl.clone()]);
                    &wrapped
                } else {
                    hl
                };
                let summary = highlight::normalize(&mut layout.rects, hl, &self.config.highlight);
                (summary, highlight::title_values(&layout.rects, hl))
            }
            None => {
                tracing::debug!("No highlight data at '{}'", path);
                (HighlightSummary::default(), HashMap::new())
            }
        };

        let extensions = ExtensionStats::collect(&layout);
        tracing::info!(
            "View '{}': {} rects, {} highlighted",
            path,
            layout.stats.rect_count,
            summary.annotated
        );

        Some(View {
            path,
            layout,
            highlight: summary,
            titles,
            extensions,
            hue: self.config.highlight.hue,
        })
    }

    /// Drill into the directory at `path`. Files and unknown paths are ignored.
    pub fn drill_down(&mut self, path: &str) -> bool {
        match resolve(&self.tree, path) {
            Some(node) if !node.is_leaf() => self.navigation.drill_down(path),
            _ => false,
        }
    }

    pub fn navigate_up(&mut self) -> bool {
        self.navigation.navigate_up()
    }

    pub fn navigate_home(&mut self) {
        self.navigation.navigate_home();
    }
}

fn load_tree(
    source: &dyn TreeSource,
    submodules: &SubmoduleTree,
    params: &QueryParams,
) -> TreemapResult<TreeNode> {
    let mut tree = source
        .fetch_tree("", params)
        .ok_or_else(|| TreemapError::missing_tree("/"))?;
    let merged = submodule::populate(&mut tree, source, submodules);
    sort_children_by_weight(&mut tree);
    tracing::debug!("Merged {} submodule trees", merged);
    Ok(tree)
}

fn load_highlight(source: &dyn TreeSource, submodules: &SubmoduleTree, params: &QueryParams) -> TreeNode {
    let mut highlight = source.fetch_highlight("", params).unwrap_or_else(|| {
        tracing::warn!("No highlight tree, continuing without highlights");
        TreeNode::internal("/", Vec::new())
    });
    submodule::populate_highlight(&mut highlight, source, submodules, params);
    sort_children_by_weight(&mut highlight);
    highlight
}
