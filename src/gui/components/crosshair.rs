//! Circle-plus-crosshair glyph painter

use eframe::egui::{self, Color32, Pos2, Rect, Stroke};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairStyle {
    pub color: Color32,
    pub line_width: f32,
    pub backdrop: Color32,
}

impl CrosshairStyle {
    pub fn from_config(config: &AppConfig) -> Self {
        let [r, g, b, a] = config.dot_rgba();
        Self {
            color: Color32::from_rgba_unmultiplied(r, g, b, a),
            line_width: config.line_width,
            backdrop: Color32::from_black_alpha(config.backdrop_alpha()),
        }
    }

    fn stroke(&self) -> Stroke {
        Stroke::new(self.line_width, self.color)
    }
}

/// Dim the whole surface while editing
pub fn paint_backdrop(painter: &egui::Painter, rect: Rect, style: &CrosshairStyle) {
    painter.rect_filled(rect, 0.0, style.backdrop);
}

/// Circle of diameter `size` with a horizontal and a vertical line through `center`
pub fn paint(painter: &egui::Painter, center: Pos2, size: f32, style: &CrosshairStyle) {
    let half = size / 2.0;
    let stroke = style.stroke();
    // Keep the outline inside a size x size window
    let radius = (half - style.line_width / 2.0).max(0.0);

    painter.circle_stroke(center, radius, stroke);
    painter.line_segment(
        [Pos2::new(center.x - half, center.y), Pos2::new(center.x + half, center.y)],
        stroke,
    );
    painter.line_segment(
        [Pos2::new(center.x, center.y - half), Pos2::new(center.x, center.y + half)],
        stroke,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_default_config() {
        let style = CrosshairStyle::from_config(&AppConfig::default());
        assert_eq!(style.color, Color32::from_rgb(255, 0, 0));
        assert_eq!(style.line_width, 2.0);
        assert_eq!(style.backdrop, Color32::from_black_alpha(127));
    }
}
