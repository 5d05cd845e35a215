//! Deterministic default colors for labels created without one

/// Label palette, readable as pill backgrounds on light and dark themes
const PALETTE: &[&str] = &[
    "#d73a4a", "#e36209", "#f9c513", "#0e8a16", "#006b75", "#1d76db", "#5319e7", "#b60205",
    "#d876e3", "#0075ca", "#7057ff", "#008672", "#e4e669", "#bfd4f2", "#c5def5", "#fbca04",
];

/// Pick a palette color for a label name.
///
/// Names that differ only in case or surrounding whitespace get the same color.
pub fn label_color(name: &str) -> &'static str {
    let key = name.trim().to_lowercase();
    PALETTE[fnv1a(&key) as usize % PALETTE.len()]
}

/// 32-bit FNV-1a
fn fnv1a(s: &str) -> u32 {
    s.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}
