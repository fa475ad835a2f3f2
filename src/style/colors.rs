use crate::layout::LayoutRect;
use crate::tree::extensions::{extension, extension_hue};

/// Saturation range (percent) for highlighted boxes
const SATURATION_MIN: f64 = 40.0;
const SATURATION_MAX: f64 = 90.0;
/// Lightness range (percent); stronger highlights are darker
const LIGHTNESS_MIN: f64 = 50.0;
const LIGHTNESS_MAX: f64 = 90.0;

/// An HSL colour: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_css(self) -> String {
        format!("hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Saturation and lightness (percent) for a highlight intensity in `[0, 1]`.
pub fn shade(intensity: f64) -> (f64, f64) {
    let f = intensity.clamp(0.0, 1.0);
    (
        (SATURATION_MAX - SATURATION_MIN) * f + SATURATION_MIN,
        (LIGHTNESS_MIN - LIGHTNESS_MAX) * f + LIGHTNESS_MAX,
    )
}

/// Fill for a highlighted box: the fixed hue when one is set, otherwise the
/// hue of the box's file extension. `None` for boxes without an intensity or
/// without a usable hue.
pub fn leaf_fill(rect: &LayoutRect, user_hue: Option<f64>) -> Option<Hsl> {
    let intensity = rect.intensity()?;
    let hue = match user_hue {
        Some(hue) => hue,
        None if rect.is_leaf() => extension_hue(extension(&rect.label)?),
        None => return None,
    };
    let (saturation, lightness) = shade(intensity);
    Some(Hsl {
        hue,
        saturation,
        lightness,
    })
}

/// Position of `depth` among `max_depth` styling tiers, `0.0` (top) to `1.0`.
pub fn depth_tier(depth: u16, max_depth: u16) -> f64 {
    if max_depth <= 1 {
        return 0.0;
    }
    (depth as f64 / (max_depth - 1) as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Highlight;

    fn rect(label: &str, intensity: Option<f64>) -> LayoutRect {
        LayoutRect {
            label: label.into(),
            area: 1.0,
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            parent_path: String::new(),
            depth: 0,
            is_submodule: false,
            children: None,
            highlight: intensity.map(|i| Highlight {
                value: 1.0,
                intensity: Some(i),
            }),
        }
    }

    #[test]
    fn shade_endpoints() {
        assert_eq!(shade(0.0), (40.0, 90.0));
        assert_eq!(shade(1.0), (90.0, 50.0));
        assert_eq!(shade(0.5), (65.0, 70.0));
        assert_eq!(shade(7.0), shade(1.0));
    }

    #[test]
    fn fill_prefers_user_hue() {
        let r = rect("main.rs", Some(1.0));
        let fill = leaf_fill(&r, Some(120.0)).expect("highlighted");
        assert_eq!(fill.hue, 120.0);
        assert_eq!(fill.to_css(), "hsl(120,90%,50%)");
        let by_ext = leaf_fill(&r, None).expect("has extension");
        assert_eq!(by_ext.hue, extension_hue("rs"));
    }

    #[test]
    fn no_fill_without_intensity_or_hue() {
        assert!(leaf_fill(&rect("main.rs", None), Some(10.0)).is_none());
        assert!(leaf_fill(&rect("Makefile", Some(0.3)), None).is_none());
    }

    #[test]
    fn tiers() {
        assert_eq!(depth_tier(0, 4), 0.0);
        assert_eq!(depth_tier(3, 4), 1.0);
        assert_eq!(depth_tier(9, 4), 1.0);
        assert_eq!(depth_tier(2, 0), 0.0);
    }
}
