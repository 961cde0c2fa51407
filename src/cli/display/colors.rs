//! Color theme for CLI output

use super::StatusIcon;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color matching a status icon
    pub fn get_icon_color(&self, icon: &str) -> TableColor {
        match icon {
            StatusIcon::SUCCESS => self.success,
            StatusIcon::ERROR => self.error,
            _ => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.error, TableColor::Red);
        assert_eq!(theme.info, TableColor::Cyan);
    }

    #[test]
    fn test_get_icon_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_icon_color(StatusIcon::SUCCESS), TableColor::Green);
        assert_eq!(theme.get_icon_color(StatusIcon::ERROR), TableColor::Red);
        assert_eq!(theme.get_icon_color(StatusIcon::UNKNOWN), TableColor::DarkGrey);
    }
}
