use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

const NEUTRAL: Rgb = Rgb { r: 150, g: 150, b: 150 };

/// Parse a CSS hex color (`#rgb` or `#rrggbb`, case-insensitive).
/// Anything else (named colors, garbage) falls back to neutral gray so the
/// SVG output never carries unescaped config text.
pub(crate) fn css_color(text: &str) -> Rgb {
    let Some(hex) = text.trim().strip_prefix('#') else { return NEUTRAL };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) { return NEUTRAL }

    let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(150);
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Rgb { r: expand(0), g: expand(1), b: expand(2) }
        }
        6 => Rgb { r: channel(&hex[0..2]), g: channel(&hex[2..4]), b: channel(&hex[4..6]) },
        _ => NEUTRAL,
    }
}
