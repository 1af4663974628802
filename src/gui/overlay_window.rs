//! Always-on-top transparent viewport that hosts the crosshair

use eframe::egui::{self, Pos2, ViewportBuilder, ViewportCommand, ViewportId};
use tracing::debug;

use super::components::crosshair::{self, CrosshairStyle};
use super::constants::{OVERLAY_TITLE, OVERLAY_VIEWPORT};
use crate::overlay::Overlay;
use crate::types::WindowGeometry;

/// Input gathered from the overlay viewport this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayInput {
    Click(Pos2),
    Commit,
    Cancel,
    Closed,
}

/// Window state last pushed to the platform
#[derive(Debug, Default)]
pub struct OverlayWindow {
    applied: Option<(WindowGeometry, bool)>,
}

impl OverlayWindow {
    pub fn viewport_id() -> ViewportId {
        ViewportId::from_hash_of(OVERLAY_VIEWPORT)
    }

    fn builder(geometry: WindowGeometry, editing: bool) -> ViewportBuilder {
        ViewportBuilder::default()
            .with_title(OVERLAY_TITLE)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false)
            .with_position([geometry.x as f32, geometry.y as f32])
            .with_inner_size([geometry.width as f32, geometry.height as f32])
            // Clicks reach the windows below unless we are capturing them
            .with_mouse_passthrough(!editing)
    }

    /// Push geometry changes (docked <-> full screen) to the platform window
    fn sync_geometry(&mut self, ctx: &egui::Context, geometry: WindowGeometry, editing: bool) {
        if self.applied == Some((geometry, editing)) {
            return;
        }
        let was_editing = self.applied.is_some_and(|(_, e)| e);
        debug!(?geometry, editing, "Applying overlay geometry");

        let id = Self::viewport_id();
        ctx.send_viewport_cmd_to(
            id,
            ViewportCommand::OuterPosition(Pos2::new(geometry.x as f32, geometry.y as f32)),
        );
        ctx.send_viewport_cmd_to(
            id,
            ViewportCommand::InnerSize(egui::vec2(geometry.width as f32, geometry.height as f32)),
        );
        ctx.send_viewport_cmd_to(id, ViewportCommand::MousePassthrough(!editing));
        if editing && !was_editing {
            // Enter/Escape only reach a focused overlay
            ctx.send_viewport_cmd_to(id, ViewportCommand::Focus);
        }
        self.applied = Some((geometry, editing));
    }

    /// Forget applied state so the next show re-sends everything
    pub fn reset(&mut self) {
        self.applied = None;
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        overlay: &Overlay,
        style: &CrosshairStyle,
    ) -> Vec<OverlayInput> {
        let geometry = overlay.window_geometry();
        let editing = overlay.is_editing();
        let (cx, cy) = overlay.glyph_center();
        let center = Pos2::new(cx as f32, cy as f32);
        let size = overlay.dot_size() as f32;

        let inputs = ctx.show_viewport_immediate(
            Self::viewport_id(),
            Self::builder(geometry, editing),
            |ctx, _class| {
                let mut inputs = Vec::new();

                egui::CentralPanel::default()
                    .frame(egui::Frame::NONE)
                    .show(ctx, |ui| {
                        let painter = ui.painter();
                        if editing {
                            crosshair::paint_backdrop(painter, ui.max_rect(), style);
                        }
                        crosshair::paint(painter, center, size, style);
                    });

                ctx.input(|i| {
                    if i.viewport().close_requested() {
                        inputs.push(OverlayInput::Closed);
                    }
                    if !editing {
                        return;
                    }
                    if i.pointer.primary_pressed()
                        && let Some(pos) = i.pointer.press_origin()
                    {
                        inputs.push(OverlayInput::Click(pos));
                    }
                    if i.key_pressed(egui::Key::Enter) {
                        inputs.push(OverlayInput::Commit);
                    } else if i.key_pressed(egui::Key::Escape) {
                        inputs.push(OverlayInput::Cancel);
                    }
                });

                inputs
            },
        );

        self.sync_geometry(ctx, geometry, editing);
        inputs
    }
}
