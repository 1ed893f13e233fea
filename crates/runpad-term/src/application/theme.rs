//! Color palettes for the light and dark themes.

use ratatui::style::Color;

use crate::domain::models::Theme;

pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bar_bg: Color,
}

pub const DARK_PALETTE: Palette = Palette {
    background: Color::Rgb(30, 30, 46),
    foreground: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    status_bar_bg: Color::Rgb(50, 50, 70),
};

pub const LIGHT_PALETTE: Palette = Palette {
    background: Color::Rgb(239, 241, 245),
    foreground: Color::Rgb(76, 79, 105),
    accent: Color::Rgb(30, 102, 245),
    comment: Color::Rgb(140, 143, 161),
    success: Color::Rgb(64, 160, 43),
    error: Color::Rgb(210, 15, 57),
    border_focused: Color::Rgb(223, 142, 29),
    border_normal: Color::Rgb(156, 160, 176),
    status_bar_bg: Color::Rgb(220, 224, 232),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }
}
