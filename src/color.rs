/// Preset word palettes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Ocean,
    Sunset,
    Forest,
    Berry,
    Monochrome,
    Rainbow,
}

impl ColorScheme {
    pub fn colors(&self) -> Vec<&'static str> {
        match self {
            ColorScheme::Ocean => vec!["#264653", "#287271", "#2a9d8f", "#8ab17d", "#e9c46a"],
            ColorScheme::Sunset => vec!["#f94144", "#f3722c", "#f8961e", "#f9844a", "#f9c74f"],
            ColorScheme::Forest => vec!["#2d6a4f", "#40916c", "#52b788", "#74c69d", "#95d5b2"],
            ColorScheme::Berry => vec!["#7b2cbf", "#9d4edd", "#c77dff", "#e0aaff", "#ff6d00"],
            ColorScheme::Monochrome => vec!["#212529", "#495057", "#6c757d", "#adb5bd", "#ced4da"],
            ColorScheme::Rainbow => {
                vec![
                    "#e63946", "#f4a261", "#e9c46a", "#2a9d8f", "#457b9d", "#7b2cbf",
                ]
            }
        }
    }

    pub fn palette(&self) -> Vec<String> {
        self.colors().into_iter().map(String::from).collect()
    }
}

/// Colour for the word ranked `rank` (0 = most frequent).
pub fn color_for_rank(palette: &[String], rank: usize) -> String {
    if palette.is_empty() {
        return "#000000".to_string();
    }
    palette[rank % palette.len()].clone()
}

pub(crate) fn parse_hex_color(hex: &str) -> Option<tiny_skia::Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_cycle_through_palette() {
        let palette = ColorScheme::Forest.palette();
        assert_eq!(color_for_rank(&palette, 0), "#2d6a4f");
        assert_eq!(color_for_rank(&palette, 5), "#2d6a4f");
        assert_eq!(color_for_rank(&palette, 7), "#52b788");
        assert_eq!(color_for_rank(&[], 3), "#000000");
    }

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_hex_color("#ff8000").unwrap();
        assert_eq!(c.to_color_u8().red(), 255);
        assert_eq!(c.to_color_u8().green(), 128);
        assert!(parse_hex_color("#fff").is_none());
        assert!(parse_hex_color("zzzzzz").is_none());
    }
}
