pub mod config;

pub use config::{WindowConfig, parse_hex_color};

use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

/// Attributes for the main window described by `config`.
///
/// The window is resizable; every resize refits the design space.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(true)
}
