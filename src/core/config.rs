//=========================================================================
// Setup Configuration
//=========================================================================
//
// Plain knobs read once during setup. Nothing here is observed after the
// subsystem it configures has been initialized; changing a field later
// has no effect unless the application calls the matching setter on the
// context (e.g. `set_window_title`).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::LevelFilter;

//=== Internal Dependencies ===============================================

use crate::core::types::{Point, Size};

//=== WindowConfig ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// `None` lets the window manager place the window.
    pub position: Option<Point>,

    pub size: Size,
    pub resizable: bool,

    /// Image file used as the window icon, if any.
    pub icon: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sdl window".to_string(),
            position: None,
            size: Size::new(800, 600),
            resizable: true,
            icon: None,
        }
    }
}

//=== RendererConfig ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Driver index; `None` picks the first one supporting the flags.
    pub index: Option<u32>,
    pub accelerated: bool,
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            index: None,
            accelerated: true,
            vsync: true,
        }
    }
}

//=== AudioConfig =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub frequency: i32,
    pub channels: i32,
    pub chunk_size: i32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            frequency: 44_100,
            channels: 2,
            chunk_size: 1024,
        }
    }
}

//=== AppConfig ===========================================================

/// All setup-time configuration of an [`crate::AppLoop`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Interval between `on_update` calls.
    pub update_period: Duration,

    /// Interval between `on_render` calls when lazy draw is off.
    pub render_period: Duration,

    /// Render only when a redraw was requested.
    pub lazy_draw: bool,

    /// `false` pins the update deadline to "never".
    pub update_enabled: bool,

    /// Maximum log level applied when video is initialized.
    pub log_level: LevelFilter,

    pub window: WindowConfig,
    pub renderer: RendererConfig,
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_period: Duration::from_millis(50),
            render_period: Duration::from_millis(15),
            lazy_draw: false,
            update_enabled: true,
            log_level: LevelFilter::Info,
            window: WindowConfig::default(),
            renderer: RendererConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.update_period, Duration::from_millis(50));
        assert_eq!(config.render_period, Duration::from_millis(15));
        assert!(!config.lazy_draw);
        assert!(config.update_enabled);
        assert_eq!(config.window.title, "sdl window");
        assert_eq!(config.window.size, Size::new(800, 600));
        assert!(config.window.position.is_none());
        assert!(config.renderer.accelerated && config.renderer.vsync);
        assert_eq!(config.audio.chunk_size, 1024);
    }
}
