use std::collections::HashMap;

use crate::layout::LayoutRect;

/// Hover text for a box: its weight, its path, then the highlight value
/// matched for that path, if any.
pub fn title(rect: &LayoutRect, highlight_values: &HashMap<String, f64>) -> String {
    let path = rect.path();
    let mut text = format!("{}\n{}", rect.area, path);
    if let Some(value) = highlight_values.get(&path) {
        text.push('\n');
        text.push_str(&value.to_string());
    }
    text
}

/// Label size that fits the box: bounded by the width per character and by
/// the box height.
pub fn label_font_size(rect: &LayoutRect) -> f64 {
    let chars = rect.label.chars().count().max(1) as f64;
    (1.5 * rect.width / chars).min(rect.height).max(0.0)
}

/// Human-readable byte count for a box weight. Kilobytes get one decimal,
/// larger units two; anything past terabytes stays in terabytes.
pub fn format_size(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if !bytes.is_finite() || bytes < 1024.0 {
        return format!("{} B", bytes);
    }
    let mut value = bytes / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
