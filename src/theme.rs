//! Panel colors, with optional hex overrides from the config file

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,   // Notes heading and border, key hints
    pub header: Color,   // Bigscreen title
    pub warning: Color,  // Special conditions heading and border
    pub text: Color,     // Body text
    pub text_dim: Color, // Footer hints, status line
    pub inactive: Color, // Footer file path
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback
        Self {
            accent: Color::Rgb(137, 180, 250),
            header: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
        }
    }
}

impl Theme {
    /// Build a theme from config overrides; unparseable values are ignored
    pub fn from_config(config: &ThemeConfig) -> Self {
        let base = Self::default();
        let pick = |name: &str, value: &Option<String>, fallback: Color| -> Color {
            match value.as_deref() {
                None => fallback,
                Some(raw) => Self::parse_hex_color(raw).unwrap_or_else(|| {
                    tracing::warn!("Ignoring invalid theme color {} = {:?}", name, raw);
                    fallback
                }),
            }
        };

        Self {
            accent: pick("accent", &config.accent, base.accent),
            header: pick("header", &config.header, base.header),
            warning: pick("warning", &config.warning, base.warning),
            text: pick("text", &config.text, base.text),
            text_dim: pick("text_dim", &config.text_dim, base.text_dim),
            inactive: pick("inactive", &config.inactive, base.inactive),
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        match s.len() {
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                Some(Color::Rgb(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
                Some(Color::Rgb(r, g, b))
            }
            _ => None,
        }
    }
}
