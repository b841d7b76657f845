//=========================================================================
// Application Hooks & Context
//=========================================================================
//
// The consuming application implements [`App`]; the loop hands it an
// [`AppContext`] on every hook call.
//
// Architecture:
// ```text
//   AppLoop::run
//     ├─► App::on_setup(ctx)           once, before the first iteration
//     └─► per iteration
//           ├─► App::on_event(ctx, e)  for each drained event
//           ├─► App::on_update(ctx, t) when the update deadline passed
//           └─► App::on_render(ctx, t) when a render is due, then present
// ```
//
// The context replaces process-wide globals: it owns the running state,
// the scheduler and the configuration, and shares the backend (window,
// renderer, decoders) with every resource handle through `Rc<B>`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::AppConfig;
use crate::core::error::{AppError, AppResult};
use crate::core::event::{Event, EventCategory};
use crate::core::platform_bridge::Backend;
use crate::core::resource::Texture;
use crate::core::scheduler::Scheduler;
use crate::core::types::{Color, DisplayMode, FPoint, FRect, Flip, Rect, Size};

//=== LoopState ===========================================================

/// Lifecycle of an application loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    NotStarted,
    Running,
    Stopped,
}

//=== App Trait ===========================================================

/// Lifecycle hooks of an application.
///
/// Every hook has a default; an application typically overrides
/// `on_render` and, when it needs custom input handling, `on_event`
/// (falling back to [`AppContext::handle_event`] for the rest).
///
/// Returning `Err` from any hook stops the loop; the error is reported
/// and teardown still runs.
pub trait App<B: Backend> {
    /// Initializes subsystems. The default initializes everything.
    fn on_setup(&mut self, ctx: &mut AppContext<B>) -> AppResult<()> {
        ctx.init_all()
    }

    /// Handles one event. The default stops on quit, records resizes and
    /// requests a redraw on any window or input event.
    fn on_event(&mut self, ctx: &mut AppContext<B>, event: &Event) -> AppResult<()> {
        ctx.handle_event(event);
        Ok(())
    }

    /// Periodic logic tick; `tick` is the backend time of the call.
    fn on_update(&mut self, _ctx: &mut AppContext<B>, _tick: Duration) -> AppResult<()> {
        Ok(())
    }

    /// Draws one frame; the loop presents it afterwards.
    fn on_render(&mut self, _ctx: &mut AppContext<B>, _tick: Duration) -> AppResult<()> {
        Ok(())
    }
}

//=== AppContext ==========================================================

/// Loop state and native services available to the hooks.
pub struct AppContext<B: Backend> {
    backend: Rc<B>,
    config: AppConfig,
    state: LoopState,
    pub(crate) scheduler: Scheduler,
    window_size: Size,
}

impl<B: Backend> AppContext<B> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(backend: Rc<B>, config: AppConfig) -> Self {
        let scheduler = Scheduler::new(&config);
        Self {
            backend,
            config,
            state: LoopState::NotStarted,
            scheduler,
            window_size: Size::default(),
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The shared backend; pass it to resource handle constructors.
    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Setup knobs. Effective for the subsystems not yet initialized and,
    /// for the scheduler fields, when setup returns.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Drawable size, as of window creation or the last resize event.
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Current backend time.
    pub fn now(&self) -> Duration {
        self.backend.now()
    }

    pub(crate) fn set_state(&mut self, state: LoopState) {
        self.state = state;
    }

    /// Arms the first update and render at the current time, picking up
    /// any scheduler settings changed during setup.
    pub(crate) fn start_scheduler(&mut self) {
        let now = self.backend.now();
        self.scheduler.start(&self.config, now);
        debug!(target: "app::scheduler", "Scheduler started at {:?}", now);
    }

    //--- Signals ----------------------------------------------------------

    /// Leaves the loop after the current event or tick.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            debug!(target: "app", "Stop requested");
            self.state = LoopState::Stopped;
        }
    }

    /// Schedules a render with lazy draw; no effect otherwise.
    pub fn request_redraw(&mut self) {
        self.scheduler.request_redraw();
    }

    pub fn disable_update(&mut self) {
        self.config.update_enabled = false;
        self.scheduler.disable_update();
    }

    pub fn enable_lazy_draw(&mut self) {
        self.config.lazy_draw = true;
        let now = self.backend.now();
        self.scheduler.set_lazy_draw(true, now);
    }

    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn set_update_period(&mut self, period: Duration) {
        assert!(!period.is_zero(), "Update period must be positive");
        self.config.update_period = period;
        self.scheduler.set_update_period(period);
    }

    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn set_render_period(&mut self, period: Duration) {
        assert!(!period.is_zero(), "Render period must be positive");
        self.config.render_period = period;
        self.scheduler.set_render_period(period);
    }

    //--- Default Event Handling -------------------------------------------

    /// Default reaction to an event; callable from an overriding
    /// `on_event` for the cases it does not handle itself.
    pub fn handle_event(&mut self, event: &Event) {
        match event.category() {
            EventCategory::Quit => self.stop(),
            EventCategory::Resize => {
                if let Some(size) = event.new_size() {
                    trace!(target: "app", "Window resized to {}", size);
                    self.window_size = size;
                }
                self.request_redraw();
            }
            EventCategory::Window | EventCategory::Keyboard | EventCategory::Mouse => {
                self.request_redraw();
            }
            EventCategory::Other => {}
        }
    }

    //--- Subsystem Initialization -----------------------------------------

    pub fn init_video(&mut self) -> AppResult<()> {
        self.backend
            .init_video()
            .map_err(|cause| AppError::setup("video", cause))?;
        log::set_max_level(self.config.log_level);
        debug!(target: "app", "Video subsystem ready");
        Ok(())
    }

    pub fn init_ttf(&mut self) -> AppResult<()> {
        self.backend
            .init_ttf()
            .map_err(|cause| AppError::setup("ttf", cause))?;
        debug!(target: "app", "TTF subsystem ready");
        Ok(())
    }

    pub fn init_image(&mut self) -> AppResult<()> {
        self.backend
            .init_image()
            .map_err(|cause| AppError::setup("image", cause))?;
        debug!(target: "app", "Image subsystem ready");
        Ok(())
    }

    pub fn init_audio(&mut self) -> AppResult<()> {
        self.backend
            .init_audio(&self.config.audio)
            .map_err(|cause| AppError::setup("audio", cause))?;
        debug!(target: "app", "Audio device open");
        Ok(())
    }

    /// Creates the window unless it already exists.
    ///
    /// An icon that fails to load is logged and skipped.
    pub fn init_window(&mut self) -> AppResult<()> {
        if self.backend.has_window() {
            return Ok(());
        }

        let window = &self.config.window;
        self.window_size = self
            .backend
            .create_window(window)
            .map_err(|cause| AppError::setup("window", cause))?;

        info!(
            target: "app",
            "Window created: '{}' {}",
            window.title,
            self.window_size
        );

        if let Some(icon) = &window.icon {
            if let Err(cause) = self.backend.set_window_icon(icon) {
                warn!(target: "app", "Window icon '{}' not set: {}", icon, cause);
            }
        }

        Ok(())
    }

    /// Creates the renderer unless it exists or there is no window yet.
    pub fn init_renderer(&mut self) -> AppResult<()> {
        if !self.backend.has_window() || self.backend.renderer_ready() {
            return Ok(());
        }

        self.backend
            .create_renderer(&self.config.renderer)
            .map_err(|cause| AppError::setup("renderer", cause))?;
        info!(target: "app", "Renderer created");
        Ok(())
    }

    pub fn init_window_renderer(&mut self) -> AppResult<()> {
        self.init_window()?;
        self.init_renderer()
    }

    /// Video, ttf, image, audio, window and renderer, in that order.
    pub fn init_all(&mut self) -> AppResult<()> {
        self.init_video()?;
        self.init_ttf()?;
        self.init_image()?;
        self.init_audio()?;
        self.init_window()?;
        self.init_renderer()
    }

    //--- Window Helpers ---------------------------------------------------

    pub fn set_window_title(&mut self, title: &str) -> AppResult<()> {
        self.backend
            .set_window_title(title)
            .map_err(|cause| AppError::setup("window", cause))?;
        self.config.window.title = title.to_string();
        Ok(())
    }

    /// Requests a new window size; the resulting resize event updates
    /// [`Self::window_size`].
    pub fn set_window_size(&mut self, width: i32, height: i32) -> AppResult<()> {
        self.backend
            .set_window_size(Size::new(width, height))
            .map_err(|cause| AppError::setup("window", cause))
    }

    pub fn current_display_mode(&self, display_index: i32) -> AppResult<DisplayMode> {
        self.backend
            .current_display_mode(display_index)
            .map_err(|cause| AppError::setup("display mode", cause))
    }

    //--- Draw Helpers -----------------------------------------------------

    fn renderer(&self) -> AppResult<&B> {
        if self.backend.renderer_ready() {
            Ok(&self.backend)
        } else {
            Err(AppError::setup("renderer", "renderer still not created"))
        }
    }

    pub fn set_draw_color(&mut self, color: Color) -> AppResult<()> {
        self.renderer()?
            .set_draw_color(color)
            .map_err(|cause| AppError::setup("renderer", cause))
    }

    pub fn clear(&mut self) -> AppResult<()> {
        self.renderer()?
            .clear()
            .map_err(|cause| AppError::setup("renderer", cause))
    }

    /// Copies `texture` (loading it if needed) into `dst`.
    ///
    /// `None` for `src`/`dst` means the whole texture / whole target.
    pub fn copy(
        &mut self,
        texture: &Texture<B>,
        src: Option<Rect>,
        dst: Option<FRect>,
    ) -> AppResult<()> {
        self.copy_ex(texture, src, dst, 0.0, None, Flip::None)
    }

    /// [`Self::copy`] with rotation (degrees, around `center`) and flipping.
    pub fn copy_ex(
        &mut self,
        texture: &Texture<B>,
        src: Option<Rect>,
        dst: Option<FRect>,
        angle: f64,
        center: Option<FPoint>,
        flip: Flip,
    ) -> AppResult<()> {
        let renderer = self.renderer()?;
        let native = texture.load_or_get()?;
        renderer
            .copy(native, src, dst, angle, center, flip)
            .map_err(|cause| AppError::setup("renderer", cause))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{KeyCode, WindowEvent};
    use crate::platform::HeadlessBackend;

    fn context() -> AppContext<HeadlessBackend> {
        let backend = Rc::new(
            HeadlessBackend::new().with_image("icon.png", Size::new(16, 16)),
        );
        AppContext::new(backend, AppConfig::default())
    }

    //=====================================================================
    // Default Event Handling
    //=====================================================================

    #[test]
    fn quit_stops() {
        let mut ctx = context();
        ctx.set_state(LoopState::Running);

        ctx.handle_event(&Event::Quit);

        assert_eq!(ctx.state(), LoopState::Stopped);
    }

    #[test]
    fn resize_records_size_and_arms_redraw() {
        let mut ctx = context();
        ctx.enable_lazy_draw();

        ctx.handle_event(&Event::resized(1024, 768));

        assert_eq!(ctx.window_size(), Size::new(1024, 768));
        assert!(ctx.scheduler().redraw_requested());
    }

    #[test]
    fn input_arms_redraw() {
        for event in [
            Event::key_down(KeyCode::KeyA),
            Event::MouseMotion { x: 3, y: 4 },
            Event::Window(WindowEvent::Exposed),
        ] {
            let mut ctx = context();
            ctx.enable_lazy_draw();
            ctx.handle_event(&event);
            assert!(ctx.scheduler().redraw_requested(), "{:?} should redraw", event);
        }
    }

    #[test]
    fn unidentified_is_ignored() {
        let mut ctx = context();
        ctx.enable_lazy_draw();
        ctx.set_state(LoopState::Running);

        ctx.handle_event(&Event::Unidentified);

        assert!(!ctx.scheduler().redraw_requested());
        assert!(ctx.is_running());
    }

    //=====================================================================
    // Initialization
    //=====================================================================

    #[test]
    fn init_all_creates_window_and_renderer() {
        let mut ctx = context();
        ctx.config_mut().window.size = Size::new(600, 600);

        ctx.init_all().unwrap();

        assert!(ctx.backend().has_window());
        assert!(ctx.backend().renderer_ready());
        assert_eq!(ctx.window_size(), Size::new(600, 600));
    }

    #[test]
    fn init_window_is_idempotent() {
        let mut ctx = context();
        ctx.init_window().unwrap();
        ctx.init_window().unwrap();
        assert_eq!(ctx.backend().stats().windows_created, 1);
    }

    #[test]
    fn renderer_needs_window() {
        let mut ctx = context();
        ctx.init_renderer().unwrap();
        assert!(!ctx.backend().renderer_ready());
    }

    #[test]
    fn failing_subsystem_is_setup_error() {
        let backend = Rc::new(HeadlessBackend::new().failing("ttf"));
        let mut ctx = AppContext::new(backend, AppConfig::default());

        let err = ctx.init_all().unwrap_err();
        assert!(err.is_setup());
        assert!(err.to_string().contains("ttf"));
    }

    #[test]
    fn missing_icon_is_not_fatal() {
        let mut ctx = context();
        ctx.config_mut().window.icon = Some("missing.png".to_string());
        assert!(ctx.init_window().is_ok());

        let mut ctx = context();
        ctx.config_mut().window.icon = Some("icon.png".to_string());
        ctx.init_window().unwrap();
        assert_eq!(ctx.backend().window_icon().as_deref(), Some("icon.png"));
    }

    //=====================================================================
    // Draw & Window Helpers
    //=====================================================================

    #[test]
    fn draw_requires_renderer() {
        let mut ctx = context();
        let err = ctx.clear().unwrap_err();
        assert!(err.is_setup());
    }

    #[test]
    fn copy_loads_texture() {
        let mut ctx = context();
        ctx.init_window_renderer().unwrap();
        let texture = Texture::from_file(ctx.backend(), "icon.png");

        ctx.set_draw_color(Color::BLACK).unwrap();
        ctx.clear().unwrap();
        ctx.copy(&texture, None, Some(FRect::new(0.0, 0.0, 32.0, 32.0))).unwrap();

        assert!(texture.is_loaded());
        assert_eq!(ctx.backend().stats().draw_calls, 1);
    }

    #[test]
    fn set_window_title_updates_config() {
        let mut ctx = context();
        ctx.init_window().unwrap();
        ctx.set_window_title("hello world").unwrap();
        assert_eq!(ctx.config().window.title, "hello world");
        assert_eq!(ctx.backend().window_title().as_deref(), Some("hello world"));
    }

    #[test]
    fn display_mode_needs_video() {
        let mut ctx = context();
        assert!(ctx.current_display_mode(0).is_err());

        ctx.init_video().unwrap();
        assert!(ctx.current_display_mode(0).is_ok());
    }

    #[test]
    #[should_panic(expected = "Update period must be positive")]
    fn zero_update_period_panics() {
        let mut ctx = context();
        ctx.set_update_period(Duration::ZERO);
    }
}
