//! Geometry types shared by the overlay, the position store and the GUI

use crate::constants::position::CENTER;

/// Crosshair center as a fraction of screen width/height
///
/// Resolution independent: the same file positions the dot consistently on
/// displays of different sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPosition {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self::new(CENTER, CENTER)
    }

    /// Position of an absolute pixel on the given screen, clamped to [0, 1]
    pub fn from_pixel(px: f32, py: f32, screen: ScreenSize) -> Self {
        Self {
            x: (f64::from(px) / f64::from(screen.width)).clamp(0.0, 1.0),
            y: (f64::from(py) / f64::from(screen.height)).clamp(0.0, 1.0),
        }
    }

    /// Absolute pixel of this position on the given screen (truncating)
    pub fn to_pixel(self, screen: ScreenSize) -> (i32, i32) {
        (
            (self.x * f64::from(screen.width)) as i32,
            (self.y * f64::from(screen.height)) as i32,
        )
    }

    pub fn is_valid(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl Default for NormalizedPosition {
    fn default() -> Self {
        Self::center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// Returns None for a zero-sized screen
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }
}

/// Bounds of the docked (crosshair-sized) overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGeometry {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl PixelGeometry {
    /// Window origin that centers a `size` square on `position`
    pub fn docked(position: NormalizedPosition, screen: ScreenSize, size: u32) -> Self {
        let half = 0.5 * f64::from(size);
        Self {
            x: (position.x * f64::from(screen.width) - half) as i32,
            y: (position.y * f64::from(screen.height) - half) as i32,
            size,
        }
    }

    pub fn to_window(self) -> WindowGeometry {
        WindowGeometry {
            x: self.x,
            y: self.y,
            width: self.size,
            height: self.size,
        }
    }
}

/// Rectangle the overlay window currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub fn full_screen(screen: ScreenSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: screen.width,
            height: screen.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> ScreenSize {
        ScreenSize::new(1920, 1080).unwrap()
    }

    #[test]
    fn test_docked_geometry_centered() {
        let geom = PixelGeometry::docked(NormalizedPosition::center(), full_hd(), 50);
        assert_eq!(geom, PixelGeometry { x: 935, y: 515, size: 50 });
    }

    #[test]
    fn test_docked_geometry_quarter_three_quarters() {
        let geom = PixelGeometry::docked(NormalizedPosition::new(0.25, 0.75), full_hd(), 50);
        assert_eq!((geom.x, geom.y), (455, 785));
    }

    #[test]
    fn test_docked_geometry_truncates_toward_zero() {
        // 0.001 * 1920 - 25 = -23.08 -> -23
        let geom = PixelGeometry::docked(NormalizedPosition::new(0.001, 0.0), full_hd(), 50);
        assert_eq!((geom.x, geom.y), (-23, -25));
    }

    #[test]
    fn test_from_pixel_clamps_outside_screen() {
        let pos = NormalizedPosition::from_pixel(2000.0, -10.0, full_hd());
        assert_eq!(pos, NormalizedPosition::new(1.0, 0.0));
    }

    #[test]
    fn test_to_pixel() {
        assert_eq!(NormalizedPosition::center().to_pixel(full_hd()), (960, 540));
    }

    #[test]
    fn test_zero_screen_rejected() {
        assert_eq!(ScreenSize::new(0, 1080), None);
        assert_eq!(ScreenSize::new(1920, 0), None);
    }

    #[test]
    fn test_window_geometry_from_docked() {
        let geom = PixelGeometry { x: 10, y: 20, size: 50 }.to_window();
        assert_eq!(geom, WindowGeometry { x: 10, y: 20, width: 50, height: 50 });
        assert_eq!(
            WindowGeometry::full_screen(full_hd()),
            WindowGeometry { x: 0, y: 0, width: 1920, height: 1080 }
        );
    }
}
