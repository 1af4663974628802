pub mod components;
pub mod constants;
pub mod manager;
pub mod overlay_window;

pub use manager::run_gui;
