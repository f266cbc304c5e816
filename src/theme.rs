//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use wellblocks::BlockColor;

/// One Dark palette and UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours in `BlockColor::PIECES` order: green, blue, yellow, red, cyan, magenta, orange.
    pub blocks: [Color; 7],
    /// Well walls and floor.
    pub wall: Color,
    /// Well background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    /// Text (score, help).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text.
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

/// Hex literals below are known-good; a bad one falls back to grey.
fn hex(s: &str) -> Color {
    parse_hex(s).unwrap_or(Color::Gray)
}

impl Theme {
    /// Hardcoded One Dark defaults.
    pub fn onedark_default() -> Self {
        Self {
            blocks: [
                hex("#98C379"), // green
                hex("#61AFEF"), // blue
                hex("#E5C07B"), // yellow
                hex("#E06C75"), // red
                hex("#56B6C2"), // cyan
                hex("#C678DD"), // magenta
                hex("#D19A66"), // orange
            ],
            wall: hex("#5C6370"),
            bg: hex("#282C34"),
            div_line: hex("#3F444F"),
            main_fg: hex("#ABB2BF"),
            title: hex("#E5C07B"),
            inactive_fg: hex("#5C6370"),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::onedark_default();
        t.apply_palette(palette);
        t
    }

    /// Override block colours for high-contrast or colorblind.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.blocks = [
                    hex("#00FF00"),
                    hex("#0088FF"),
                    hex("#FFFF00"),
                    hex("#FF0000"),
                    hex("#00FFFF"),
                    hex("#FF00FF"),
                    hex("#FF8800"),
                ];
                self.wall = hex("#A0A0A0");
            }
            crate::Palette::Colorblind => {
                // Okabe-Ito style set: no red/green pair carries meaning alone.
                self.blocks = [
                    hex("#009E73"),
                    hex("#0072B2"),
                    hex("#F0E442"),
                    hex("#D55E00"),
                    hex("#56B4E9"),
                    hex("#CC79A7"),
                    hex("#E69F00"),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(|v| parse_hex(v.trim_matches('"').trim_matches('\'').trim()).ok())
        };
        let d = Self::onedark_default();
        Self {
            blocks: [
                get("mem_box").or_else(|| get("cpu_start")).unwrap_or(d.blocks[0]),
                get("cpu_box").unwrap_or(d.blocks[1]),
                get("title").or_else(|| get("cpu_mid")).unwrap_or(d.blocks[2]),
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(d.blocks[3]),
                get("hi_fg").or_else(|| get("proc_misc")).unwrap_or(d.blocks[4]),
                get("net_box").unwrap_or(d.blocks[5]),
                get("temp_mid").or_else(|| get("free_mid")).unwrap_or(d.blocks[6]),
            ],
            wall: get("inactive_fg").unwrap_or(d.wall),
            bg: get("main_bg").or_else(|| get("meter_bg")).unwrap_or(d.bg),
            div_line: get("div_line").unwrap_or(d.div_line),
            main_fg: get("main_fg").unwrap_or(d.main_fg),
            title: get("title").unwrap_or(d.title),
            inactive_fg: get("inactive_fg").unwrap_or(d.inactive_fg),
        }
    }

    /// Colour for a well or piece cell.
    pub fn block_color(&self, color: BlockColor) -> Color {
        match color {
            BlockColor::Wall => self.wall,
            BlockColor::Green => self.blocks[0],
            BlockColor::Blue => self.blocks[1],
            BlockColor::Yellow => self.blocks[2],
            BlockColor::Red => self.blocks[3],
            BlockColor::Cyan => self.blocks[4],
            BlockColor::Magenta => self.blocks[5],
            BlockColor::Orange => self.blocks[6],
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ThemeError::InvalidHex(s.to_string()));
    }
    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}
