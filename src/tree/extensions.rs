/// Extension of a file name: the text after the last `.`.
/// Names without a dot, or ending in one, have no extension.
pub fn extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Deterministic hue (degrees, `0..360`) for an extension.
///
/// Each byte contributes a letter-like digit in `1..=26`, weighted by powers
/// of 27 so the first characters dominate: extensions sharing a prefix get
/// neighbouring hues.
pub fn extension_hue(ext: &str) -> f64 {
    const STEP: f64 = 360.0 / 27.0;
    let mut hue = 0.0;
    let mut scale = 1.0;
    for b in ext.bytes() {
        let digit = (((b % 26) + 7) % 26 + 1) as f64;
        hue += digit * STEP / scale;
        scale *= 27.0;
    }
    hue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_rules() {
        assert_eq!(extension("main.rs"), Some("rs"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension(".gitignore"), Some("gitignore"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension("weird."), None);
    }

    #[test]
    fn hue_is_stable_and_in_range() {
        for ext in ["rs", "py", "json", "md", "zzzz", "a"] {
            let hue = extension_hue(ext);
            assert!((0.0..360.0).contains(&hue), "{} -> {}", ext, hue);
            assert_eq!(hue, extension_hue(ext));
        }
        assert_eq!(extension_hue(""), 0.0);
    }

    #[test]
    fn first_byte_dominates() {
        // 'a' = 97: ((97 % 26) + 7) % 26 + 1 = 1
        assert!((extension_hue("a") - 360.0 / 27.0).abs() < 1e-12);
        let rs = extension_hue("rs");
        let rb = extension_hue("rb");
        let c = extension_hue("c");
        assert!((rs - rb).abs() < 360.0 / 27.0);
        assert!((rs - c).abs() > (rs - rb).abs());
    }
}
