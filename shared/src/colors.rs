/// Parse a `#rrggbb` token. Returns `None` for anything else.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// A hex accent at the given alpha; unparseable tokens are passed through as-is.
pub fn with_alpha(color: &str, a: f64) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => rgba_css(r, g, b, a),
        None => color.to_string(),
    }
}

/// Text color for a card's style label. Pure white accents are toned down to stay legible.
pub fn label_color(accent: &str) -> &str {
    if accent.eq_ignore_ascii_case("#ffffff") {
        "#d1d5db"
    } else {
        accent
    }
}

#[cfg(test)]
mod tests {
    use super::{label_color, parse_hex, rgba_css, with_alpha};

    #[test]
    fn parses_dataset_tokens() {
        assert_eq!(parse_hex("#ea9999"), Some((0xea, 0x99, 0x99)));
        assert_eq!(parse_hex("#FFFFFF"), Some((255, 255, 255)));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_hex("ea9999"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn alpha_formatting() {
        assert_eq!(rgba_css(1, 2, 3, 0.5), "rgba(1,2,3,0.5)");
        assert_eq!(with_alpha("#d64f92", 0.3), "rgba(214,79,146,0.3)");
        assert_eq!(with_alpha("teal", 0.3), "teal");
    }

    #[test]
    fn white_labels_are_toned_down() {
        assert_eq!(label_color("#ffffff"), "#d1d5db");
        assert_eq!(label_color("#ea9999"), "#ea9999");
    }
}
