//! Theme registry

mod dracula;
mod nord;
mod one_dark;

use crate::theme::Theme;

/// Load a theme by name; unknown names fall back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.trim().to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => Theme::default(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        "one-dark" | "onedark" => one_dark::default(),
        other => {
            tracing::warn!(theme = other, "Unknown theme, using gruvbox-dark");
            Theme::default()
        }
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula", "one-dark"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme("gruvbox-dark");
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_load_theme_case_insensitive() {
        let theme = load_theme("  Nord ");
        assert!(matches!(theme.bg0, Color::Rgb(0x2e, 0x34, 0x40)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let theme = load_theme("does-not-exist");
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_all_available_themes_load() {
        for name in available_themes() {
            let _ = load_theme(name);
        }
        assert_eq!(available_themes().len(), 4);
    }
}
