use ratatui::style::Color;
use saklolo_types::{Category, ColorScheme};

use crate::app::App;

pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

pub fn get_theme_colors(app: &App) -> ThemeColors {
    theme_for(app.color_scheme)
}

/// Each theme is a complete palette with proper contrast
pub fn theme_for(scheme: ColorScheme) -> ThemeColors {
    match scheme {
        // Terminal Green
        ColorScheme::Default => ThemeColors {
            primary: Color::Rgb(0, 255, 0),
            secondary: Color::Rgb(0, 200, 0),
            accent: Color::Rgb(0, 255, 100),
            text: Color::Rgb(0, 255, 0),
            text_dim: Color::Rgb(0, 150, 0),
            background: Color::Black,
            border: Color::Rgb(0, 200, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            highlight_bg: Color::Rgb(0, 50, 0),
        },

        ColorScheme::Dark => ThemeColors {
            primary: Color::Rgb(100, 200, 255),
            secondary: Color::Rgb(150, 150, 255),
            accent: Color::Rgb(255, 100, 200),
            text: Color::Rgb(220, 220, 220),
            text_dim: Color::Rgb(120, 120, 120),
            background: Color::Rgb(20, 20, 25),
            border: Color::Rgb(60, 60, 70),
            success: Color::Rgb(100, 255, 150),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            highlight_bg: Color::Rgb(40, 40, 50),
        },

        ColorScheme::Light => ThemeColors {
            primary: Color::Rgb(0, 100, 200),
            secondary: Color::Rgb(100, 50, 200),
            accent: Color::Rgb(200, 0, 100),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            background: Color::Rgb(250, 250, 250),
            border: Color::Rgb(180, 180, 180),
            success: Color::Rgb(0, 150, 50),
            warning: Color::Rgb(200, 150, 0),
            error: Color::Rgb(200, 0, 0),
            highlight_bg: Color::Rgb(230, 240, 255),
        },

        ColorScheme::Solarized => ThemeColors {
            primary: Color::Rgb(38, 139, 210),
            secondary: Color::Rgb(42, 161, 152),
            accent: Color::Rgb(211, 54, 130),
            text: Color::Rgb(147, 161, 161),
            text_dim: Color::Rgb(101, 123, 131),
            background: Color::Rgb(0, 43, 54),
            border: Color::Rgb(7, 54, 66),
            success: Color::Rgb(133, 153, 0),
            warning: Color::Rgb(181, 137, 0),
            error: Color::Rgb(220, 50, 47),
            highlight_bg: Color::Rgb(7, 54, 66),
        },
    }
}

/// Badge color for a category, picked from the active palette
pub fn category_color(category: Category, theme: &ThemeColors) -> Color {
    match category {
        Category::Typhoon => theme.primary,
        Category::Fire => theme.error,
        Category::Earthquake => theme.warning,
        Category::Crime => theme.accent,
    }
}
