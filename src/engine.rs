//=========================================================================
// Application Loop
//
// Main entry point: configures and runs the event/update/render loop.
//
// Architecture:
// ```text
//     AppBuilder  ──build()──>  AppLoop  ──run(app)──>  [Runtime]
//         │                        │
//         ├─ with_update_period()  ├─ App::on_setup
//         ├─ with_render_period()  ├─ loop { drain → update → render }
//         ├─ with_lazy_draw()      └─ teardown (backend shutdown)
//         └─ with_window_*()
// ```
//
// One iteration:
//   1. wait for events until the earliest deadline, dispatching each one
//      to `App::on_event` (lazy draw stops waiting once a redraw is armed)
//   2. leave if stopped
//   3. `on_update` if the update deadline passed
//   4. leave if stopped
//   5. `on_render` + present if a render is due
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::app::{App, AppContext, LoopState};
use crate::core::config::AppConfig;
use crate::core::error::AppResult;
use crate::core::platform_bridge::{Backend, DrainControl, EventCollector};
use crate::core::types::Size;

//=== AppBuilder ==========================================================

/// Builder for configuring and constructing an [`AppLoop`].
///
/// # Default Values
///
/// - **Update period**: 50 ms
/// - **Render period**: 15 ms
/// - **Lazy draw**: off
/// - **Window**: "sdl window", 800x600, resizable
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aetheric_app::core::app::App;
/// use aetheric_app::platform::HeadlessBackend;
/// use aetheric_app::AppBuilder;
///
/// struct Idle;
/// impl App<HeadlessBackend> for Idle {}
///
/// let backend = HeadlessBackend::new().with_time_limit(Duration::from_millis(100));
///
/// AppBuilder::new(backend)
///     .with_update_period(Duration::from_millis(20))
///     .with_window_title("idle")
///     .build()
///     .run(&mut Idle)
///     .unwrap();
/// ```
pub struct AppBuilder<B: Backend> {
    backend: Rc<B>,
    config: AppConfig,
}

impl<B: Backend> AppBuilder<B> {
    /// Creates a builder with default settings that owns `backend`.
    pub fn new(backend: B) -> Self {
        Self::shared(Rc::new(backend))
    }

    /// Creates a builder around a backend the caller keeps a handle to.
    pub fn shared(backend: Rc<B>) -> Self {
        Self {
            backend,
            config: AppConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the interval between `on_update` calls.
    ///
    /// Default: 50 ms
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn with_update_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "Update period must be positive");
        self.config.update_period = period;
        self
    }

    /// Sets the interval between `on_render` calls (ignored with lazy draw).
    ///
    /// Default: 15 ms
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn with_render_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "Render period must be positive");
        self.config.render_period = period;
        self
    }

    /// Renders only after a redraw request instead of periodically.
    pub fn with_lazy_draw(mut self, lazy: bool) -> Self {
        self.config.lazy_draw = lazy;
        self
    }

    /// Never calls `on_update`.
    pub fn without_update(mut self) -> Self {
        self.config.update_enabled = false;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.config.window.size = Size::new(width, height);
        self
    }

    pub fn with_window_icon(mut self, path: impl Into<String>) -> Self {
        self.config.window.icon = Some(path.into());
        self
    }

    /// Builds the loop. Nothing native is touched until [`AppLoop::run`].
    pub fn build(self) -> AppLoop<B> {
        debug!(
            target: "app",
            "Building app loop (update: {:?}, render: {:?}, lazy: {})",
            self.config.update_period,
            self.config.render_period,
            self.config.lazy_draw
        );

        AppLoop {
            ctx: AppContext::new(self.backend, self.config),
            collector: EventCollector::new(),
        }
    }
}

//=== AppLoop =============================================================

/// The application runtime.
///
/// Create via [`AppBuilder`]; [`AppLoop::run`] consumes it.
pub struct AppLoop<B: Backend> {
    ctx: AppContext<B>,
    collector: EventCollector,
}

impl<B: Backend> AppLoop<B> {
    //--- Accessors --------------------------------------------------------

    /// Context as it will be handed to `on_setup`.
    pub fn context(&self) -> &AppContext<B> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext<B> {
        &mut self.ctx
    }

    //--- Execution --------------------------------------------------------

    /// Runs `app` until it stops, then tears the backend down.
    ///
    /// # Lifecycle
    ///
    /// 1. `on_setup` (the default initializes every subsystem)
    /// 2. scheduler starts: first update and render are due immediately
    /// 3. iterations until a quit event, [`AppContext::stop`] or an error
    /// 4. backend shutdown, also after an error
    ///
    /// # Errors
    ///
    /// The first error returned by a hook or a subsystem. It has already
    /// been logged through [`crate::core::error::AppError::report`].
    pub fn run<A: App<B>>(mut self, app: &mut A) -> AppResult<()> {
        info!(target: "app", "Starting application loop");
        self.ctx.set_state(LoopState::Running);

        let result = self.execute(app);

        self.ctx.set_state(LoopState::Stopped);
        self.teardown();

        match result {
            Ok(()) => {
                info!(target: "app", "App exited normally");
                Ok(())
            }
            Err(err) => {
                err.report();
                Err(err)
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn execute<A: App<B>>(&mut self, app: &mut A) -> AppResult<()> {
        app.on_setup(&mut self.ctx)?;
        self.ctx.start_scheduler();
        info!(target: "app", "Setup complete, window {}", self.ctx.window_size());

        while self.ctx.is_running() {
            self.iterate(app)?;
        }

        Ok(())
    }

    fn iterate<A: App<B>>(&mut self, app: &mut A) -> AppResult<()> {
        let Self { ctx, collector } = self;
        let backend = Rc::clone(ctx.backend());

        //--- 1. Events until the next deadline ----------------------------
        let wait_until = ctx.scheduler.next_deadline();
        collector.drain(&*backend, wait_until, |event| {
            app.on_event(ctx, &event)?;

            if !ctx.is_running() || ctx.scheduler.stop_draining() {
                Ok(DrainControl::Break)
            } else {
                Ok(DrainControl::Continue)
            }
        })?;

        if !ctx.is_running() {
            return Ok(());
        }

        let now = backend.now();

        //--- 2. Update ----------------------------------------------------
        if ctx.scheduler.update_due(now) {
            ctx.scheduler.mark_updated(now);
            app.on_update(ctx, now)?;

            if !ctx.is_running() {
                return Ok(());
            }
        }

        //--- 3. Render ----------------------------------------------------
        if ctx.scheduler.render_due(now) {
            // Marked first so a redraw requested while rendering stays armed.
            ctx.scheduler.mark_rendered(now);
            app.on_render(ctx, now)?;
            backend.present();
        }

        Ok(())
    }

    fn teardown(&mut self) {
        info!(target: "app", "Tearing down at {:?}", self.ctx.now());
        self.ctx.backend().shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
