//! Process-wide plot theme. Set at most once, read by every plot afterwards.
use log::debug;
use plotters::style::RGBColor;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTheme {
    pub background: RGBColor,
    pub font_color: RGBColor,
    pub font_size: f64,
    pub font_family: &'static str,
}

impl Default for PlotTheme {
    /// dark background, yellow text
    fn default() -> Self {
        PlotTheme {
            background: RGBColor(0x1a, 0x1a, 0x1a),
            font_color: RGBColor(255, 255, 0),
            font_size: 12.5,
            font_family: "sans-serif",
        }
    }
}

static THEME: OnceLock<PlotTheme> = OnceLock::new();

/// Installs `theme` if no theme was set yet. Returns false if one already was;
/// the first theme stays in place.
pub fn init_theme(theme: PlotTheme) -> bool {
    let installed = THEME.set(theme).is_ok();
    if installed {
        debug!("plot theme set: {:?}", theme);
    }
    installed
}

/// current theme; the default one if `init_theme` was never called
pub fn theme() -> &'static PlotTheme {
    THEME.get_or_init(PlotTheme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_is_set_once() {
        let first = theme();
        assert_eq!(first.font_size, 12.5);
        // after the first read the theme is frozen
        let other = PlotTheme {
            font_size: 30.0,
            ..PlotTheme::default()
        };
        assert!(!init_theme(other));
        assert_eq!(theme().font_size, 12.5);
        assert_eq!(theme().background, RGBColor(26, 26, 26));
    }
}
