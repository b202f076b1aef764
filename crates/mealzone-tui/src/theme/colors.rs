//! Colour palette for the TUI and CSS colour parsing for scene paint.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// High contrast theme, used when `NO_COLOR` is set.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Pick the theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::high_contrast()
        } else {
            Self::mocha()
        }
    }
}

/// Parse a CSS colour (`#rgb`, `#rrggbb`, or one of the few named colours
/// the chart uses) into RGB components.
pub fn css_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        return match hex.len() {
            3 => {
                let mut parts = hex.chars().map(|c| c.to_digit(16));
                let r = parts.next()??;
                let g = parts.next()??;
                let b = parts.next()??;
                // Each digit doubles: #abc == #aabbcc.
                Some(((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some((r, g, b))
            }
            _ => None,
        };
    }
    match value.to_ascii_lowercase().as_str() {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "lightblue" => Some((173, 216, 230)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "gold" => Some((255, 215, 0)),
        _ => None,
    }
}

/// RGB components of a ratatui colour, when it has fixed components.
pub fn color_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((255, 255, 255)),
        _ => None,
    }
}

/// Mix `color` over `background` at `alpha` (0 = background, 1 = color).
pub fn blend(color: (u8, u8, u8), background: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let Some(bg) = color_rgb(background) else {
        return Color::Rgb(color.0, color.1, color.2);
    };
    let mix = |fg: u8, bg: u8| -> u8 {
        let value = f64::from(bg) + (f64::from(fg) - f64::from(bg)) * alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(mix(color.0, bg.0), mix(color.1, bg.1), mix(color.2, bg.2))
}
