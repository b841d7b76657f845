//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// The contract the core expects from a native multimedia backend.
//
// Backends are shared through `Rc<B>` by the loop and by every resource
// handle, so all operations take `&self`; implementations keep their
// mutable native state behind `Cell`/`RefCell`. Failures cross the
// boundary as the native library's diagnostic text and are wrapped into
// `AppError` by the caller, which knows the resource or subsystem.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::config::{AudioConfig, RendererConfig, WindowConfig};
use crate::core::event::Event;
use crate::core::resource::TextStyle;
use crate::core::types::{Color, DisplayMode, FPoint, FRect, Flip, Rect, Size};

//=== Backend =============================================================

/// Native multimedia layer: window, renderer, decoders, event queue.
///
/// The associated types are the backend's own resource objects. The core
/// never inspects them; it only hands them back to the backend and calls
/// the matching `release_*` finalizer exactly once per loaded object.
pub trait Backend: 'static {
    type NativeFont;
    type NativeSurface;
    type NativeTexture;
    type NativeMusic;

    //--- Subsystems -------------------------------------------------------

    fn init_video(&self) -> Result<(), String>;
    fn init_ttf(&self) -> Result<(), String>;
    fn init_image(&self) -> Result<(), String>;
    fn init_audio(&self, config: &AudioConfig) -> Result<(), String>;

    /// Creates the single window and returns its drawable size.
    fn create_window(&self, config: &WindowConfig) -> Result<Size, String>;
    fn has_window(&self) -> bool;

    /// Creates the single renderer for the existing window.
    fn create_renderer(&self, config: &RendererConfig) -> Result<(), String>;
    fn renderer_ready(&self) -> bool;

    fn set_window_icon(&self, path: &str) -> Result<(), String>;
    fn set_window_title(&self, title: &str) -> Result<(), String>;
    fn set_window_size(&self, size: Size) -> Result<(), String>;
    fn current_display_mode(&self, index: i32) -> Result<DisplayMode, String>;

    /// Destroys renderer and window and quits every subsystem.
    fn shutdown(&self);

    //--- Clock & Events ---------------------------------------------------

    /// Monotonic time elapsed since the backend was created.
    fn now(&self) -> Duration;

    /// Blocks until an event arrives or `timeout` elapses.
    ///
    /// `None` waits indefinitely; `Some(Duration::ZERO)` only polls.
    fn wait_event(&self, timeout: Option<Duration>) -> Option<Event>;

    //--- Decoding ---------------------------------------------------------

    fn open_font(&self, path: &str, point_size: u16) -> Result<Self::NativeFont, String>;
    fn font_height(&self, font: &Self::NativeFont) -> i32;

    fn load_surface(&self, path: &str) -> Result<Self::NativeSurface, String>;
    fn render_text(
        &self,
        font: &Self::NativeFont,
        text: &str,
        style: &TextStyle,
    ) -> Result<Self::NativeSurface, String>;
    fn surface_size(&self, surface: &Self::NativeSurface) -> Size;

    /// Decodes an image file straight into a texture. Requires the renderer.
    fn load_texture(&self, path: &str) -> Result<Self::NativeTexture, String>;

    /// Uploads surface pixels into a texture. Requires the renderer.
    fn texture_from_surface(
        &self,
        surface: &Self::NativeSurface,
    ) -> Result<Self::NativeTexture, String>;
    fn texture_size(&self, texture: &Self::NativeTexture) -> Size;

    fn load_music(&self, path: &str) -> Result<Self::NativeMusic, String>;
    fn play_music(&self, music: &Self::NativeMusic, loops: i32) -> Result<(), String>;

    //--- Drawing ----------------------------------------------------------

    fn set_draw_color(&self, color: Color) -> Result<(), String>;
    fn clear(&self) -> Result<(), String>;
    fn copy(
        &self,
        texture: &Self::NativeTexture,
        src: Option<Rect>,
        dst: Option<FRect>,
        angle: f64,
        center: Option<FPoint>,
        flip: Flip,
    ) -> Result<(), String>;
    fn present(&self);

    //--- Finalizers -------------------------------------------------------

    fn release_font(&self, font: Self::NativeFont) {
        drop(font);
    }

    fn release_surface(&self, surface: Self::NativeSurface) {
        drop(surface);
    }

    fn release_texture(&self, texture: Self::NativeTexture) {
        drop(texture);
    }

    fn release_music(&self, music: Self::NativeMusic) {
        drop(music);
    }
}
