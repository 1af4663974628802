//! Control panel window implemented with egui/eframe, owning the crosshair overlay

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info, warn};

use super::components::control_panel::{self, PanelAction};
use super::components::crosshair::CrosshairStyle;
use super::constants::*;
use super::overlay_window::{OverlayInput, OverlayWindow};
use crate::config::AppConfig;
use crate::constants::screen;
use crate::overlay::{Overlay, OverlayEvent};
use crate::persistence::PositionStore;
use crate::types::ScreenSize;

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

struct ManagerApp {
    overlay: Overlay,
    overlay_events: Receiver<OverlayEvent>,
    overlay_window: OverlayWindow,
    overlay_visible: bool,
    style: CrosshairStyle,
    status_message: Option<StatusMessage>,
    last_dialog_dir: Option<PathBuf>,
}

impl ManagerApp {
    fn new(_cc: &CreationContext<'_>, config: &AppConfig) -> Self {
        info!("Initializing control panel");

        let screen = ScreenSize::new(config.screen_width, config.screen_height).unwrap_or(
            ScreenSize { width: screen::FALLBACK_WIDTH, height: screen::FALLBACK_HEIGHT },
        );
        let mut overlay = Overlay::new(
            screen,
            config.dot_size,
            PositionStore::new(&config.position_file),
        );
        let overlay_events = overlay.subscribe();

        Self {
            overlay,
            overlay_events,
            overlay_window: OverlayWindow::default(),
            overlay_visible: true,
            style: CrosshairStyle::from_config(config),
            status_message: None,
            last_dialog_dir: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage { text: text.into(), color });
    }

    /// Follow the monitor the panel lives on
    fn track_screen_size(&mut self, ctx: &egui::Context) {
        let Some(size) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        if let Some(screen) = ScreenSize::new(size.x.round() as u32, size.y.round() as u32)
            && screen != self.overlay.screen()
        {
            self.overlay.recalculate_geometry(Some(screen));
        }
    }

    fn process_overlay_events(&mut self) {
        while let Ok(event) = self.overlay_events.try_recv() {
            match event {
                OverlayEvent::EditStarted => {
                    self.set_status("Click to place the crosshair", STATUS_INFO)
                }
                OverlayEvent::EditCommitted { saved: true } => {
                    let path = self.overlay.store().path().display().to_string();
                    self.set_status(format!("Saved to {path}"), STATUS_OK);
                }
                // The commit error is already on the status line
                OverlayEvent::EditCommitted { saved: false } => {}
                OverlayEvent::EditCancelled => self.set_status("Edit cancelled", STATUS_INFO),
                OverlayEvent::PositionLoaded => {}
            }
        }
    }

    fn handle_overlay_input(&mut self, input: OverlayInput) {
        match input {
            OverlayInput::Click(pos) => {
                self.overlay.handle_click(pos.x, pos.y);
            }
            OverlayInput::Commit => {
                if let Err(err) = self.overlay.commit() {
                    error!(error = ?err, "Failed to save position");
                    self.set_status(format!("Save failed: {err}"), STATUS_ERROR);
                }
            }
            OverlayInput::Cancel => {
                self.overlay.cancel();
            }
            OverlayInput::Closed => {
                info!("Overlay closed by window manager, hiding");
                self.overlay.cancel();
                self.overlay_visible = false;
                self.overlay_window.reset();
            }
        }
    }

    fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
                self.overlay_window.reset();
                info!(visible = self.overlay_visible, "Toggled overlay");
            }
            PanelAction::EnterEditMode => {
                if self.overlay.enter_edit_mode() {
                    // Editing needs a visible surface to click on
                    self.overlay_visible = true;
                }
            }
            PanelAction::LoadPosition => self.load_position(),
            PanelAction::SavePosition => self.save_position(),
        }
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().add_filter(POSITION_FILTER_NAME, POSITION_FILTER_EXT);
        match &self.last_dialog_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember_dir(&mut self, path: &std::path::Path) {
        self.last_dialog_dir = path.parent().map(|p| p.to_path_buf());
    }

    fn load_position(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.remember_dir(&path);
        match self.overlay.load_from(&path) {
            Ok(position) => self.set_status(
                format!("Loaded ({:.3}, {:.3})", position.x, position.y),
                STATUS_OK,
            ),
            Err(err) => {
                warn!(error = ?err, "Failed to load position");
                self.set_status(format!("Load failed: {err}"), STATUS_ERROR);
            }
        }
    }

    fn save_position(&mut self) {
        let file_name = self
            .overlay
            .store()
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(path) = self.file_dialog().set_file_name(file_name).save_file() else {
            return;
        };
        self.remember_dir(&path);
        match self.overlay.save_to(&path) {
            Ok(()) => self.set_status(format!("Saved to {}", path.display()), STATUS_OK),
            Err(err) => {
                error!(error = ?err, "Failed to save position");
                self.set_status(format!("Save failed: {err}"), STATUS_ERROR);
            }
        }
    }
}

impl eframe::App for ManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.track_screen_size(ctx);

        if self.overlay_visible {
            let inputs = self.overlay_window.show(ctx, &self.overlay, &self.style);
            for input in inputs {
                self.handle_overlay_input(input);
            }
        } else if self.overlay.is_editing() {
            // Nothing to click on while hidden
            self.overlay.cancel();
        }
        self.process_overlay_events();

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = control_panel::ui(ui, self.overlay.is_editing());

            ui.add_space(SECTION_SPACING);
            ui.separator();

            let position = self.overlay.position();
            let docked = self.overlay.docked_geometry();
            ui.label(format!("Position: ({:.3}, {:.3})", position.x, position.y));
            ui.label(format!("Window: ({}, {})", docked.x, docked.y));
            if let Some(message) = &self.status_message {
                ui.colored_label(message.color, &message.text);
            }
        });
        if let Some(action) = action {
            self.handle_panel_action(action);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent so the overlay viewport only shows the glyph
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Control panel exiting");
    }
}

pub fn run_gui(config: AppConfig) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ManagerApp::new(cc, &config)))),
    )
    .map_err(|err| anyhow!("Failed to launch control panel: {err}"))
}
