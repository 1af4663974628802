//! Control panel buttons

use eframe::egui;

use super::super::constants::ITEM_SPACING;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ToggleOverlay,
    EnterEditMode,
    LoadPosition,
    SavePosition,
}

pub fn edit_button_label(editing: bool) -> &'static str {
    if editing {
        "Press Enter to save, Escape to cancel"
    } else {
        "Move Crosshair on Click"
    }
}

/// Renders the panel buttons and returns the clicked action, if any
pub fn ui(ui: &mut egui::Ui, editing: bool) -> Option<PanelAction> {
    let mut action = None;
    let full_width = egui::vec2(ui.available_width(), 0.0);

    if ui.add_sized(full_width, egui::Button::new("Toggle Overlay")).clicked() {
        action = Some(PanelAction::ToggleOverlay);
    }

    ui.add_space(ITEM_SPACING);

    // Edit mode can only be entered from the docked state
    if ui
        .add_enabled(!editing, egui::Button::new(edit_button_label(editing)).min_size(full_width))
        .clicked()
    {
        action = Some(PanelAction::EnterEditMode);
    }

    ui.add_space(ITEM_SPACING);

    ui.horizontal(|ui| {
        if ui.button("\u{1F4C2} Load Position...").clicked() {
            action = Some(PanelAction::LoadPosition);
        }
        if ui.button("\u{1F4BE} Save Position...").clicked() {
            action = Some(PanelAction::SavePosition);
        }
    });

    action
}
