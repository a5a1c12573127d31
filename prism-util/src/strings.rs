//! Small string helpers used by menu labels and chat output.

/// Small-caps glyphs for A-Z in order. Q and X have no dedicated
/// small-cap codepoint and fall back to a lookalike.
const SMALL_CAPS: &str = "\u{1d00}\u{299}\u{1d04}\u{1d05}\u{1d07}\u{493}\u{262}\u{29c}\u{26a}\u{1d0a}\u{1d0b}\u{29f}\u{1d0d}\u{274}\u{1d0f}\u{1d18}Q\u{280}s\u{1d1b}\u{1d1c}\u{1d20}\u{1d21}x\u{28f}\u{1d22}";

/// Convert a string to small caps, e.g. "Next Page" becomes small-cap
/// glyphs. Non-alphabetic characters pass through unchanged.
#[must_use]
pub fn to_small_caps(input: &str) -> String {
    let table: Vec<char> = SMALL_CAPS.chars().collect();
    input
        .chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if upper.is_ascii_uppercase() {
                table[(upper as u8 - b'A') as usize]
            } else {
                c
            }
        })
        .collect()
}

/// Interpolate between two `#RRGGBB` colors. `ratio` 0.0 yields `start`,
/// 1.0 yields `end`. Returns `None` when either color is malformed.
#[must_use]
pub fn interpolate_color(start: &str, end: &str, ratio: f64) -> Option<String> {
    let (sr, sg, sb) = parse_hex(start)?;
    let (er, eg, eb) = parse_hex(end)?;
    let mix = |a: u8, b: u8| -> u8 {
        (f64::from(a) + ratio.clamp(0.0, 1.0) * (f64::from(b) - f64::from(a))).round() as u8
    };
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        mix(sr, er),
        mix(sg, eg),
        mix(sb, eb)
    ))
}

/// Per-character gradient colors for `text` running from `start` to `end`.
#[must_use]
pub fn gradient_colors(text: &str, start: &str, end: &str) -> Vec<String> {
    let len = text.chars().count();
    if len == 0 {
        return Vec::new();
    }
    (0..len)
        .map(|i| {
            let ratio = if len == 1 {
                0.0
            } else {
                i as f64 / (len - 1) as f64
            };
            interpolate_color(start, end, ratio).unwrap_or_else(|| start.to_string())
        })
        .collect()
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_caps_keeps_spacing_and_digits() {
        assert_eq!(to_small_caps("Page 2"), "\u{1d18}\u{1d00}\u{262}\u{1d07} 2");
    }

    #[test]
    fn interpolation_endpoints() {
        assert_eq!(
            interpolate_color("#000000", "#FFFFFF", 0.0).as_deref(),
            Some("#000000")
        );
        assert_eq!(
            interpolate_color("#000000", "#FFFFFF", 1.0).as_deref(),
            Some("#FFFFFF")
        );
        assert!(interpolate_color("bad", "#FFFFFF", 0.5).is_none());
    }

    #[test]
    fn gradient_has_one_color_per_char() {
        let colors = gradient_colors("abcd", "#FF0000", "#0000FF");
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], "#FF0000");
        assert_eq!(colors[3], "#0000FF");
    }
}
