use crate::tree::path::normalize;

/// Navigation state: tracks the current view root and history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Stack of view roots (for back navigation)
    history: Vec<String>,
    /// Path of the current view root (`""` for the top level)
    pub current: String,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drill down into the node at `path`.
    /// Returns true if navigation happened.
    pub fn drill_down(&mut self, path: &str) -> bool {
        let target = normalize(path);

        // Don't drill into the same node
        if target == self.current {
            return false;
        }

        let previous = std::mem::replace(&mut self.current, target);
        self.history.push(previous);
        true
    }

    /// Navigate back to the previous view root.
    /// Returns true if navigation happened.
    pub fn navigate_up(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
            true
        } else {
            false
        }
    }

    /// Navigate to the absolute root.
    pub fn navigate_home(&mut self) {
        self.history.clear();
        self.current.clear();
    }

    /// Current depth in navigation history.
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
