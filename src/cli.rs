use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::types::ScreenSize;

/// Always-on-top crosshair overlay
#[derive(Debug, Parser)]
#[command(name = "screen-dot", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Position file read at startup and written on commit
    #[arg(long, value_name = "PATH")]
    pub position_file: Option<PathBuf>,

    /// Crosshair diameter in pixels
    #[arg(long, value_name = "PX")]
    pub dot_size: Option<u32>,

    /// Screen size used until the monitor size is known, e.g. 2560x1440
    #[arg(long, value_name = "WxH", value_parser = parse_screen_size)]
    pub screen_size: Option<ScreenSize>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(AppConfig::default_path)
    }

    /// Command-line values win over the config file
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.position_file {
            config.position_file = path.clone();
        }
        if let Some(size) = self.dot_size {
            config.dot_size = size;
        }
        if let Some(screen) = self.screen_size {
            config.screen_width = screen.width;
            config.screen_height = screen.height;
        }
        config.validate_and_clamp();
    }
}

fn parse_screen_size(s: &str) -> Result<ScreenSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("invalid width '{w}': {e}"))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("invalid height '{h}': {e}"))?;
    ScreenSize::new(width, height).ok_or_else(|| "screen size must be non-zero".to_string())
}
