//! Display styler: theme identifier to terminal colors.
//!
//! Colors come from the Tailwind palette (500 for the lit strokes, 400 for
//! the glow, 950 for the panel tint, 600/700 for borders, 900 for shadow).

use ratatui::style::Color;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Amber,
    Cyan,
    Green,
    Magenta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    /// Lit segments.
    pub fill: Color,
    /// Separators and the period indicator.
    pub glow: Color,
    pub text: Color,
    /// Clock panel tint.
    pub background: Color,
    pub border: Color,
    /// Outer frame.
    pub shadow: Color,
}

const AMBER: ThemeStyle = ThemeStyle {
    fill: Color::Rgb(245, 158, 11),
    glow: Color::Rgb(251, 191, 36),
    text: Color::Rgb(245, 158, 11),
    background: Color::Rgb(69, 26, 3),
    border: Color::Rgb(180, 83, 9),
    shadow: Color::Rgb(120, 53, 15),
};

const CYAN: ThemeStyle = ThemeStyle {
    fill: Color::Rgb(34, 211, 238),
    glow: Color::Rgb(103, 232, 249),
    text: Color::Rgb(34, 211, 238),
    background: Color::Rgb(8, 51, 68),
    border: Color::Rgb(6, 182, 212),
    shadow: Color::Rgb(22, 78, 99),
};

const GREEN: ThemeStyle = ThemeStyle {
    fill: Color::Rgb(16, 185, 129),
    glow: Color::Rgb(52, 211, 153),
    text: Color::Rgb(16, 185, 129),
    background: Color::Rgb(2, 44, 34),
    border: Color::Rgb(5, 150, 105),
    shadow: Color::Rgb(6, 78, 59),
};

const MAGENTA: ThemeStyle = ThemeStyle {
    fill: Color::Rgb(217, 70, 239),
    glow: Color::Rgb(232, 121, 249),
    text: Color::Rgb(217, 70, 239),
    background: Color::Rgb(74, 4, 78),
    border: Color::Rgb(192, 38, 211),
    shadow: Color::Rgb(112, 26, 117),
};

impl Theme {
    /// Picker order.
    pub const ALL: [Theme; 4] = [Theme::Amber, Theme::Cyan, Theme::Green, Theme::Magenta];

    /// Case-insensitive; anything unrecognized falls back to AMBER.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.trim().to_ascii_uppercase().as_str() {
            "CYAN" => Theme::Cyan,
            "GREEN" => Theme::Green,
            "MAGENTA" => Theme::Magenta,
            "AMBER" => Theme::Amber,
            other => {
                tracing::warn!("⚠️ Unknown theme '{}', falling back to AMBER", other);
                Theme::Amber
            }
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Theme::Amber => "AMBER",
            Theme::Cyan => "CYAN",
            Theme::Green => "GREEN",
            Theme::Magenta => "MAGENTA",
        }
    }

    pub fn style(&self) -> ThemeStyle {
        match self {
            Theme::Amber => AMBER,
            Theme::Cyan => CYAN,
            Theme::Green => GREEN,
            Theme::Magenta => MAGENTA,
        }
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Amber => Theme::Cyan,
            Theme::Cyan => Theme::Green,
            Theme::Green => Theme::Magenta,
            Theme::Magenta => Theme::Amber,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier() {
        assert_eq!(Theme::from_identifier("CYAN"), Theme::Cyan);
        assert_eq!(Theme::from_identifier("green"), Theme::Green);
        assert_eq!(Theme::from_identifier(" Magenta "), Theme::Magenta);
        assert_eq!(Theme::from_identifier("AMBER"), Theme::Amber);
    }

    #[test]
    fn test_unknown_identifier_defaults_to_amber() {
        assert_eq!(Theme::from_identifier("PLAID"), Theme::Amber);
        assert_eq!(Theme::from_identifier(""), Theme::Amber);
    }

    #[test]
    fn test_styles_are_distinct() {
        for (i, a) in Theme::ALL.iter().enumerate() {
            for b in &Theme::ALL[i + 1..] {
                assert_ne!(a.style(), b.style());
            }
        }
        assert_eq!(Theme::Amber.style().fill, Color::Rgb(245, 158, 11));
    }

    #[test]
    fn test_next_cycles_in_picker_order() {
        let mut theme = Theme::Amber;
        let mut seen = vec![theme];
        for _ in 0..3 {
            theme = theme.next();
            seen.push(theme);
        }
        assert_eq!(seen, Theme::ALL.to_vec());
        assert_eq!(theme.next(), Theme::Amber);
    }
}
