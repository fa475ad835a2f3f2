use std::collections::HashMap;

use compact_str::CompactString;
use serde::Serialize;

use crate::layout::Layout;
use crate::tree::extensions::{extension, extension_hue};

/// Area and file count for one file extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionStat {
    /// `None` for files without an extension
    pub extension: Option<CompactString>,
    pub hue: Option<f64>,
    pub area: f64,
    pub files: usize,
}

/// Per-extension breakdown of the boxes in a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtensionStats {
    /// Sorted by area, largest first
    pub entries: Vec<ExtensionStat>,
    pub total_area: f64,
}

impl ExtensionStats {
    /// Tally every leaf box of `layout`.
    pub fn collect(layout: &Layout) -> Self {
        let mut map: HashMap<Option<&str>, (f64, usize)> = HashMap::new();
        let mut total_area = 0.0;

        for rect in layout.leaves() {
            let entry = map.entry(extension(&rect.label)).or_insert((0.0, 0));
            entry.0 += rect.area;
            entry.1 += 1;
            total_area += rect.area;
        }

        let mut entries: Vec<ExtensionStat> = map
            .into_iter()
            .map(|(ext, (area, files))| ExtensionStat {
                extension: ext.map(CompactString::new),
                hue: ext.map(extension_hue),
                area,
                files,
            })
            .collect();
        // Sort by area descending; ties by name for a stable legend
        entries.sort_by(|a, b| {
            b.area
                .total_cmp(&a.area)
                .then_with(|| a.extension.cmp(&b.extension))
        });

        ExtensionStats {
            entries,
            total_area,
        }
    }

    pub fn get(&self, ext: Option<&str>) -> Option<&ExtensionStat> {
        self.entries
            .iter()
            .find(|e| e.extension.as_deref() == ext)
    }
}
