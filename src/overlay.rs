//! Crosshair overlay state: docked/editing modes, click-to-move, commit/cancel
//!
//! Toolkit independent. The GUI reads `window_geometry()` and `glyph_center()`
//! every frame and forwards pointer/key input to the operations below.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};

use crate::persistence::{PositionStore, StoreError};
use crate::types::{NormalizedPosition, PixelGeometry, ScreenSize, WindowGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Small crosshair-sized window
    Docked,
    /// Full-screen capture window, background dimmed
    Editing,
}

/// Notifications for whoever drives the overlay (the control panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    EditStarted,
    /// `saved` is false when persisting the committed position failed
    EditCommitted { saved: bool },
    EditCancelled,
    PositionLoaded,
}

pub struct Overlay {
    position: NormalizedPosition,
    /// Position to restore on cancel, taken when edit mode starts
    snapshot: NormalizedPosition,
    screen: ScreenSize,
    dot_size: u32,
    mode: EditMode,
    docked: PixelGeometry,
    store: PositionStore,
    subscribers: Vec<Sender<OverlayEvent>>,
}

impl Overlay {
    /// Build a docked overlay from the default store; a failed load centers the dot
    pub fn new(screen: ScreenSize, dot_size: u32, store: PositionStore) -> Self {
        let startup = store.load_or_center();
        let position = startup.position;
        let docked = PixelGeometry::docked(position, screen, dot_size);
        info!(
            x = position.x,
            y = position.y,
            fallback = ?startup.fallback,
            window_x = docked.x,
            window_y = docked.y,
            "Overlay created"
        );
        Self {
            position,
            snapshot: position,
            screen,
            dot_size,
            mode: EditMode::Docked,
            docked,
            store,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<OverlayEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: OverlayEvent) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn position(&self) -> NormalizedPosition {
        self.position
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn dot_size(&self) -> u32 {
        self.dot_size
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    /// Docked window bounds for the current position, also while editing
    pub fn docked_geometry(&self) -> PixelGeometry {
        self.docked
    }

    pub fn window_geometry(&self) -> WindowGeometry {
        match self.mode {
            EditMode::Docked => self.docked.to_window(),
            EditMode::Editing => WindowGeometry::full_screen(self.screen),
        }
    }

    /// Glyph center in window-local pixels
    pub fn glyph_center(&self) -> (i32, i32) {
        match self.mode {
            EditMode::Docked => {
                let half = (self.dot_size / 2) as i32;
                (half, half)
            }
            EditMode::Editing => self.position.to_pixel(self.screen),
        }
    }

    pub fn enter_edit_mode(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.mode = EditMode::Editing;
        self.snapshot = self.position;
        info!(x = self.position.x, y = self.position.y, "Entered edit mode");
        self.emit(OverlayEvent::EditStarted);
        true
    }

    /// Move the crosshair to an absolute screen pixel; ignored while docked
    pub fn handle_click(&mut self, px: f32, py: f32) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.position = NormalizedPosition::from_pixel(px, py, self.screen);
        self.docked = PixelGeometry::docked(self.position, self.screen, self.dot_size);
        debug!(px, py, x = self.position.x, y = self.position.y, "Crosshair moved");
        true
    }

    /// Leave edit mode and persist the position to the default store
    ///
    /// Returns `Ok(false)` when not editing. A save failure still leaves edit
    /// mode and notifies subscribers.
    pub fn commit(&mut self) -> Result<bool, StoreError> {
        if !self.is_editing() {
            return Ok(false);
        }
        self.mode = EditMode::Docked;
        self.docked = PixelGeometry::docked(self.position, self.screen, self.dot_size);
        info!(x = self.position.x, y = self.position.y, "Committed crosshair position");
        let saved = self.store.save(self.position);
        if let Err(err) = &saved {
            warn!(error = %err, "Committed position was not persisted");
        }
        self.emit(OverlayEvent::EditCommitted { saved: saved.is_ok() });
        saved.map(|_| true)
    }

    /// Leave edit mode, discarding every click since `enter_edit_mode`
    pub fn cancel(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.mode = EditMode::Docked;
        self.position = self.snapshot;
        self.docked = PixelGeometry::docked(self.position, self.screen, self.dot_size);
        info!(x = self.position.x, y = self.position.y, "Cancelled edit, position restored");
        self.emit(OverlayEvent::EditCancelled);
        true
    }

    /// Recompute docked geometry, optionally for a new screen size
    pub fn recalculate_geometry(&mut self, screen: Option<ScreenSize>) {
        if let Some(screen) = screen {
            if screen != self.screen {
                info!(width = screen.width, height = screen.height, "Screen size changed");
            }
            self.screen = screen;
        }
        self.docked = PixelGeometry::docked(self.position, self.screen, self.dot_size);
    }

    /// Load a position from an explicit file; errors are returned unchanged
    pub fn load_from(&mut self, path: &Path) -> Result<NormalizedPosition, StoreError> {
        let position = PositionStore::new(path).load()?;
        self.position = position;
        if !self.is_editing() {
            self.snapshot = position;
        }
        self.recalculate_geometry(None);
        info!(path = %path.display(), x = position.x, y = position.y, "Loaded position from file");
        self.emit(OverlayEvent::PositionLoaded);
        Ok(position)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        PositionStore::new(path).save(self.position)
    }
}
