// Public library interface for churnmap
// The debug-layout tool and embedders drive everything through these modules

pub mod app;
pub mod config;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod navigation;
pub mod source;
pub mod style;
pub mod submodule;
pub mod tree;

pub use app::{App, View};
pub use config::Config;
pub use error::{TreemapError, TreemapResult};
pub use layout::{compute_layout, Layout, LayoutConfig, LayoutRect};
pub use source::{DirSource, MemorySource, QueryParams, TreeSource};
pub use tree::TreeNode;
