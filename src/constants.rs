//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Crosshair glyph constants
pub mod dot {
    /// Diameter of the crosshair circle in pixels
    pub const DEFAULT_SIZE: u32 = 50;

    /// Pen width used for the circle and both crosshair lines
    pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

    /// Crosshair color (opaque red, #AARRGGBB)
    pub const DEFAULT_COLOR_HEX: &str = "#FFFF0000";

    /// Backdrop opacity while editing (127/255 black)
    pub const DEFAULT_BACKDROP_OPACITY_PERCENT: u8 = 50;
}

/// Normalized position constants
pub mod position {
    /// Center of the screen on either axis
    pub const CENTER: f64 = 0.5;

    /// Field separator of the position file
    pub const FIELD_SEPARATOR: char = '\t';

    /// Position file used when no explicit path is given
    pub const DEFAULT_FILE: &str = "./LastPosition.txt";
}

/// Screen size used until the real monitor size is reported
pub mod screen {
    pub const FALLBACK_WIDTH: u32 = 1920;
    pub const FALLBACK_HEIGHT: u32 = 1080;
}

/// Config file location constants
pub mod config {
    /// Directory name under the platform config dir
    pub const APP_DIR: &str = "screen-dot";

    /// Config filename
    pub const FILENAME: &str = "config.toml";
}

/// Validation limits for config values
pub mod validation {
    pub const MIN_DOT_SIZE: u32 = 8;
    pub const MAX_DOT_SIZE: u32 = 512;
    pub const MIN_LINE_WIDTH: f32 = 0.5;
    pub const MAX_LINE_WIDTH: f32 = 16.0;
    pub const MAX_OPACITY_PERCENT: u8 = 100;
}
