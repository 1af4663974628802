//! GUI-specific constants for layout, status colors and viewport ids

use egui;

/// Control panel dimensions
pub const WINDOW_WIDTH: f32 = 260.0;
pub const WINDOW_HEIGHT: f32 = 220.0;
pub const WINDOW_MIN_WIDTH: f32 = 220.0;
pub const WINDOW_MIN_HEIGHT: f32 = 180.0;
pub const WINDOW_TITLE: &str = "Overlay Menu";
pub const APP_NAME: &str = "Crosshair Overlay";

/// Overlay viewport
pub const OVERLAY_VIEWPORT: &str = "crosshair_overlay";
pub const OVERLAY_TITLE: &str = "Crosshair";

/// Layout spacing
pub const SECTION_SPACING: f32 = 10.0;
pub const ITEM_SPACING: f32 = 6.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_INFO: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// File picker
pub const POSITION_FILTER_NAME: &str = "Position files";
pub const POSITION_FILTER_EXT: &[&str] = &["txt"];
