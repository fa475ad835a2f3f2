//! Where trees come from.
//!
//! A [`TreeSource`] hands out the primary tree, highlight trees and submodule
//! manifests for a repository path (`""` for the top-level repository,
//! `/libs/foo` for a submodule). Failures never produce a partial tree: the
//! implementations log them and return `None`.

pub mod dir;
pub mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;

use crate::tree::TreeNode;

/// File name of the primary tree in a repository directory
pub const FILETREE_FILE: &str = "filetree.json";
/// File name of the highlight tree in a repository directory
pub const HIGHLIGHT_FILE: &str = "highlight.json";
/// File name of the submodule manifest in a repository directory
pub const MANIFEST_FILE: &str = ".gitmodules";

pub trait TreeSource {
    /// Primary tree of the repository at `path`.
    fn fetch_tree(&self, path: &str, params: &QueryParams) -> Option<TreeNode>;

    /// Highlight tree of the repository at `path`, filtered by `params`.
    fn fetch_highlight(&self, path: &str, params: &QueryParams) -> Option<TreeNode>;

    /// Names (relative paths) of the submodules directly inside the
    /// repository at `path`.
    fn submodule_names(&self, path: &str) -> Vec<String>;
}

/// Ordered multi-valued query parameters (`author=a&author=b&since=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.append(key, value);
        self
    }

    pub fn append(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => self.entries.push((key.to_string(), vec![value.to_string()])),
        }
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization, keys in insertion order.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.entries {
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                form_encode(key, &mut out);
                out.push('=');
                form_encode(value, &mut out);
            }
        }
        out
    }
}

/// `path`, followed by `?query` when there are parameters.
pub fn url_for(path: &str, params: &QueryParams) -> String {
    let query = params.to_query_string();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn form_encode(text: &str, out: &mut String) {
    for b in text.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => out.push(b as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
}
