//! Console colors
//!
//! Defaults come from the config; `GAQ9000_PALETTE` replaces all four.

use std::env;

use ratatui::style::{Color, Modifier, Style};

use crate::{
    config::ThemeConfig,
    core::LineStyle,
    error::{ConsoleError, Result},
};

const PALETTE_ENV: &str = "GAQ9000_PALETTE";

/// Colors of the retro console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    fg: Color,
    bg: Color,
    dim: Color,
    error: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            fg: parse_palette_color(&config.fg).map_err(ConsoleError::config)?,
            bg: parse_palette_color(&config.bg).map_err(ConsoleError::config)?,
            dim: parse_palette_color(&config.dim).map_err(ConsoleError::config)?,
            error: parse_palette_color(&config.error).map_err(ConsoleError::config)?,
        })
    }

    /// Theme from config, overridden by `GAQ9000_PALETTE` (`fg,bg,dim,error`)
    pub fn from_env(config: &ThemeConfig) -> Result<Self> {
        let theme = Self::from_config(config)?;
        match env::var(PALETTE_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                theme.with_override(&value).map_err(|error| {
                    ConsoleError::config(format!("{PALETTE_ENV}={} ({error})", value.trim()))
                })
            }
            _ => Ok(theme),
        }
    }

    fn with_override(self, csv: &str) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = csv.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!(
                "expected 4 comma-separated colors (fg,bg,dim,error), got {}",
                parts.len()
            ));
        }

        Ok(Self {
            fg: parse_palette_color(parts[0])?,
            bg: parse_palette_color(parts[1])?,
            dim: parse_palette_color(parts[2])?,
            error: parse_palette_color(parts[3])?,
        })
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn line_style(&self, style: LineStyle) -> Style {
        match style {
            LineStyle::Normal | LineStyle::Prompt => self.base_style(),
            LineStyle::Banner => self.base_style().add_modifier(Modifier::BOLD),
            LineStyle::Dim => self.base_style().fg(self.dim),
            LineStyle::Error => self.base_style().fg(self.error),
        }
    }

    pub fn status_style(&self) -> Style {
        self.base_style().fg(self.dim)
    }
}

fn parse_palette_color(value: &str) -> std::result::Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_string());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_green_on_black() {
        let theme = Theme::from_config(&ThemeConfig::default()).unwrap();
        assert_eq!(theme.fg, Color::Rgb(0x00, 0xff, 0x66));
        assert_eq!(theme.bg, Color::Rgb(0x0a, 0x0f, 0x0a));
        assert_eq!(theme.line_style(LineStyle::Error).fg, Some(Color::Rgb(0xff, 0x55, 0x55)));
        assert_eq!(theme.line_style(LineStyle::Dim).bg, Some(Color::Rgb(0x0a, 0x0f, 0x0a)));
    }

    #[test]
    fn test_parse_palette_color() {
        assert_eq!(parse_palette_color("#00aa44"), Ok(Color::Rgb(0, 0xaa, 0x44)));
        assert_eq!(parse_palette_color("0XFFFFFF"), Ok(Color::Rgb(255, 255, 255)));
        assert!(parse_palette_color("").is_err());
        assert!(parse_palette_color("#12345").is_err());
        assert!(parse_palette_color("#gggggg").is_err());
    }

    #[test]
    fn test_override() {
        let theme = Theme::from_config(&ThemeConfig::default()).unwrap();
        let amber = theme
            .with_override("#ffb000, #000000, #aa7700, #ff0000")
            .unwrap();
        assert_eq!(amber.fg, Color::Rgb(0xff, 0xb0, 0x00));
        assert!(theme.with_override("#ffffff,#000000").is_err());
    }

    #[test]
    fn test_invalid_config_color() {
        let config = ThemeConfig {
            fg: "green".to_string(),
            ..ThemeConfig::default()
        };
        assert!(matches!(
            Theme::from_config(&config),
            Err(ConsoleError::Config { .. })
        ));
    }
}
