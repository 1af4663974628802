//! User configuration loaded from TOML
//!
//! Every field is optional in the file; missing keys take their defaults and
//! out-of-range values are clamped with a warning.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{config, dot, position, screen, validation::*};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Crosshair diameter in pixels
    pub dot_size: u32,
    /// `#RRGGBB` or `#AARRGGBB`
    pub dot_color: String,
    pub line_width: f32,
    /// Dimming of the backdrop while editing
    pub backdrop_opacity_percent: u8,
    pub position_file: PathBuf,
    /// Used until the real monitor size is known
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dot_size: dot::DEFAULT_SIZE,
            dot_color: dot::DEFAULT_COLOR_HEX.to_string(),
            line_width: dot::DEFAULT_LINE_WIDTH,
            backdrop_opacity_percent: dot::DEFAULT_BACKDROP_OPACITY_PERCENT,
            position_file: PathBuf::from(position::DEFAULT_FILE),
            screen_width: screen::FALLBACK_WIDTH,
            screen_height: screen::FALLBACK_HEIGHT,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    /// Load from `path`; a missing file yields defaults, a broken one is an error
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read config file {}", path.display()));
            }
        };

        let mut config: AppConfig = toml::from_str(&contents)
            .context(format!("Failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, contents)
            .context(format!("Failed to write config file to {}", path.display()))?;
        Ok(())
    }

    /// Clamp config values to safe ranges
    pub fn validate_and_clamp(&mut self) {
        if self.dot_size < MIN_DOT_SIZE {
            warn!(dot_size = self.dot_size, min = MIN_DOT_SIZE, "dot_size below minimum, clamping");
            self.dot_size = MIN_DOT_SIZE;
        } else if self.dot_size > MAX_DOT_SIZE {
            warn!(dot_size = self.dot_size, max = MAX_DOT_SIZE, "dot_size exceeds maximum, clamping");
            self.dot_size = MAX_DOT_SIZE;
        }

        // Negated so NaN lands here too
        if !(self.line_width >= MIN_LINE_WIDTH) {
            warn!(line_width = self.line_width, min = MIN_LINE_WIDTH, "line_width below minimum, clamping");
            self.line_width = MIN_LINE_WIDTH;
        } else if self.line_width > MAX_LINE_WIDTH {
            warn!(line_width = self.line_width, max = MAX_LINE_WIDTH, "line_width exceeds maximum, clamping");
            self.line_width = MAX_LINE_WIDTH;
        }

        if self.backdrop_opacity_percent > MAX_OPACITY_PERCENT {
            warn!(
                backdrop_opacity_percent = self.backdrop_opacity_percent,
                "backdrop_opacity_percent exceeds 100, clamping to 100"
            );
            self.backdrop_opacity_percent = MAX_OPACITY_PERCENT;
        }

        if parse_hex_color(&self.dot_color).is_none() {
            warn!(dot_color = %self.dot_color, "Invalid dot_color hex, using default");
            self.dot_color = dot::DEFAULT_COLOR_HEX.to_string();
        }

        if self.screen_width == 0 || self.screen_height == 0 {
            warn!(
                screen_width = self.screen_width,
                screen_height = self.screen_height,
                "Zero fallback screen size, using default"
            );
            self.screen_width = screen::FALLBACK_WIDTH;
            self.screen_height = screen::FALLBACK_HEIGHT;
        }
    }

    /// Crosshair color as `[r, g, b, a]`
    pub fn dot_rgba(&self) -> [u8; 4] {
        parse_hex_color(&self.dot_color)
            .or_else(|| parse_hex_color(dot::DEFAULT_COLOR_HEX))
            .unwrap_or([255, 0, 0, 255])
    }

    /// Backdrop alpha in 0..=255
    pub fn backdrop_alpha(&self) -> u8 {
        let percent = u32::from(self.backdrop_opacity_percent.min(MAX_OPACITY_PERCENT));
        // 50% maps to 127
        (percent * 255 / 100) as u8
    }
}

/// Parse `RRGGBB` or `AARRGGBB`, with optional `#`, into `[r, g, b, a]`
pub fn parse_hex_color(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let argb = match hex.len() {
        6 => 0xFF00_0000 | value,
        8 => value,
        _ => return None,
    };
    let [a, r, g, b] = argb.to_be_bytes();
    Some([r, g, b, a])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::tests::ScratchFile;

    #[test]
    fn test_parse_hex_color_formats() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_hex_color("80FF8000"), Some([255, 128, 0, 128]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("+F0000"), None);
    }

    #[test]
    fn test_defaults_match_crosshair() {
        let config = AppConfig::default();
        assert_eq!(config.dot_size, 50);
        assert_eq!(config.dot_rgba(), [255, 0, 0, 255]);
        assert_eq!(config.backdrop_alpha(), 127);
        assert_eq!(config.position_file, PathBuf::from("./LastPosition.txt"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let file = ScratchFile::new("config-missing");
        assert_eq!(AppConfig::load(&file.0).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = ScratchFile::with_contents("config-partial", "dot_size = 80\ndot_color = \"#00FF00\"\n");
        let config = AppConfig::load(&file.0).unwrap();
        assert_eq!(config.dot_size, 80);
        assert_eq!(config.dot_rgba(), [0, 255, 0, 255]);
        assert_eq!(config.line_width, 2.0);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let file = ScratchFile::with_contents("config-broken", "dot_size = [");
        assert!(AppConfig::load(&file.0).is_err());
    }

    #[test]
    fn test_validate_and_clamp() {
        let mut config = AppConfig {
            dot_size: 2,
            dot_color: "purple".to_string(),
            line_width: 100.0,
            backdrop_opacity_percent: 250,
            screen_width: 0,
            ..Default::default()
        };
        config.validate_and_clamp();
        assert_eq!(config.dot_size, MIN_DOT_SIZE);
        assert_eq!(config.dot_color, dot::DEFAULT_COLOR_HEX);
        assert_eq!(config.line_width, MAX_LINE_WIDTH);
        assert_eq!(config.backdrop_opacity_percent, 100);
        assert_eq!(config.backdrop_alpha(), 255);
        assert_eq!((config.screen_width, config.screen_height), (1920, 1080));
    }

    #[test]
    fn test_nan_line_width_clamped() {
        let mut config = AppConfig { line_width: f32::NAN, ..Default::default() };
        config.validate_and_clamp();
        assert_eq!(config.line_width, MIN_LINE_WIDTH);
    }

    #[test]
    fn test_save_then_load() {
        let file = ScratchFile::new("config-save");
        let config = AppConfig { dot_size: 64, ..Default::default() };
        config.save(&file.0).unwrap();
        assert_eq!(AppConfig::load(&file.0).unwrap(), config);
    }
}
