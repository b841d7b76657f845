//=========================================================================
// Scheduler
//=========================================================================
//
// Deadline bookkeeping for the application loop.
//
// Two independent periodic subsystems share one blocking wait:
//
// ```text
//   wait_until = min(next_update, next_render)
//
//   now ──────────────┬────────────────┬──────────►
//                next_render       next_update
//                 (15 ms)            (50 ms)
// ```
//
// - Update deadlines are `None` ("never") when updates are disabled.
// - With lazy draw, the render deadline is replaced by a redraw flag;
//   an armed flag means "render as soon as possible" (deadline zero).
// - Deadlines are re-armed from the time the hook ran (`now + period`),
//   not from the missed deadline, so a slow frame shifts the cadence
//   instead of triggering catch-up bursts.
//
// The scheduler holds no clock; the loop passes `now` in.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::config::AppConfig;

//=== Scheduler ===========================================================

/// Update/render deadlines and the lazy-draw redraw flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    update_period: Duration,
    render_period: Duration,
    lazy_draw: bool,
    next_update: Option<Duration>,
    next_render: Option<Duration>,
    redraw_requested: bool,
}

impl Scheduler {
    //--- Construction -----------------------------------------------------

    /// Creates a scheduler whose first update and render are due at zero.
    pub fn new(config: &AppConfig) -> Self {
        let mut scheduler = Self {
            update_period: config.update_period,
            render_period: config.render_period,
            lazy_draw: config.lazy_draw,
            next_update: None,
            next_render: None,
            redraw_requested: false,
        };
        scheduler.start(config, Duration::ZERO);
        scheduler
    }

    /// Re-reads `config` and makes the first tick due at `now`.
    ///
    /// A redraw requested before the start stays armed.
    pub fn start(&mut self, config: &AppConfig, now: Duration) {
        self.update_period = config.update_period;
        self.render_period = config.render_period;
        self.lazy_draw = config.lazy_draw;
        self.next_update = config.update_enabled.then_some(now);
        self.next_render = (!config.lazy_draw).then_some(now);
    }

    //--- Configuration ----------------------------------------------------

    /// Pins the update deadline to "never".
    pub fn disable_update(&mut self) {
        self.next_update = None;
    }

    pub fn set_update_period(&mut self, period: Duration) {
        self.update_period = period;
    }

    pub fn set_render_period(&mut self, period: Duration) {
        self.render_period = period;
    }

    /// Switches between periodic and on-demand rendering.
    pub fn set_lazy_draw(&mut self, lazy: bool, now: Duration) {
        if self.lazy_draw == lazy {
            return;
        }
        self.lazy_draw = lazy;
        self.next_render = (!lazy).then_some(now);
        self.redraw_requested = false;
    }

    //--- Queries ----------------------------------------------------------

    pub fn lazy_draw(&self) -> bool {
        self.lazy_draw
    }

    pub fn update_enabled(&self) -> bool {
        self.next_update.is_some()
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn next_update(&self) -> Option<Duration> {
        self.next_update
    }

    /// Earliest pending deadline; `None` means "wait for an event".
    pub fn next_deadline(&self) -> Option<Duration> {
        let render = if self.lazy_draw {
            self.redraw_requested.then_some(Duration::ZERO)
        } else {
            self.next_render
        };

        match (self.next_update, render) {
            (Some(update), Some(render)) => Some(update.min(render)),
            (update, render) => update.or(render),
        }
    }

    /// Whether event draining should stop before the deadline.
    ///
    /// Only lazy draw stops early, once a redraw is pending, to bound
    /// input-to-paint latency.
    pub fn stop_draining(&self) -> bool {
        self.lazy_draw && self.redraw_requested
    }

    //--- Redraw Signal ----------------------------------------------------

    /// Arms a redraw. Has no effect unless lazy draw is enabled.
    pub fn request_redraw(&mut self) {
        if self.lazy_draw {
            self.redraw_requested = true;
        }
    }

    //--- Tick Bookkeeping -------------------------------------------------

    pub fn update_due(&self, now: Duration) -> bool {
        self.next_update.is_some_and(|deadline| now >= deadline)
    }

    pub fn mark_updated(&mut self, now: Duration) {
        if self.next_update.is_some() {
            self.next_update = Some(now + self.update_period);
            trace!(target: "app::scheduler", "Next update at {:?}", self.next_update);
        }
    }

    pub fn render_due(&self, now: Duration) -> bool {
        if self.lazy_draw {
            self.redraw_requested
        } else {
            self.next_render.is_some_and(|deadline| now >= deadline)
        }
    }

    pub fn mark_rendered(&mut self, now: Duration) {
        if self.lazy_draw {
            self.redraw_requested = false;
        } else {
            self.next_render = Some(now + self.render_period);
            trace!(target: "app::scheduler", "Next render at {:?}", self.next_render);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn config() -> AppConfig {
        AppConfig {
            update_period: ms(50),
            render_period: ms(15),
            ..AppConfig::default()
        }
    }

    //=====================================================================
    // Deadlines
    //=====================================================================

    #[test]
    fn first_ticks_due_immediately() {
        let scheduler = Scheduler::new(&config());
        assert_eq!(scheduler.next_deadline(), Some(ms(0)));
        assert!(scheduler.update_due(ms(0)));
        assert!(scheduler.render_due(ms(0)));
    }

    #[test]
    fn deadline_is_min_of_both() {
        let mut scheduler = Scheduler::new(&config());
        scheduler.mark_updated(ms(0));
        scheduler.mark_rendered(ms(0));

        assert_eq!(scheduler.next_deadline(), Some(ms(15)));
        assert!(!scheduler.update_due(ms(49)));
        assert!(scheduler.update_due(ms(50)));
    }

    #[test]
    fn rearm_from_actual_tick_time() {
        let mut scheduler = Scheduler::new(&config());
        scheduler.mark_updated(ms(70));
        assert_eq!(scheduler.next_update(), Some(ms(120)));
    }

    #[test]
    fn disabled_update_never_due() {
        let mut scheduler = Scheduler::new(&config());
        scheduler.disable_update();
        scheduler.mark_updated(ms(10));

        assert!(!scheduler.update_enabled());
        assert!(!scheduler.update_due(Duration::MAX));
        assert_eq!(scheduler.next_update(), None);
    }

    #[test]
    fn start_respects_disabled_update() {
        let mut config = config();
        config.update_enabled = false;
        let scheduler = Scheduler::new(&config);
        assert_eq!(scheduler.next_update(), None);
        assert_eq!(scheduler.next_deadline(), Some(ms(0)));
    }

    //=====================================================================
    // Lazy Draw
    //=====================================================================

    #[test]
    fn lazy_draw_waits_for_request() {
        let mut config = config();
        config.lazy_draw = true;
        config.update_enabled = false;
        let mut scheduler = Scheduler::new(&config);

        assert_eq!(scheduler.next_deadline(), None, "Nothing to do until an event");
        assert!(!scheduler.render_due(Duration::MAX));

        scheduler.request_redraw();
        assert_eq!(scheduler.next_deadline(), Some(ms(0)));
        assert!(scheduler.stop_draining());
        assert!(scheduler.render_due(ms(3)));

        scheduler.mark_rendered(ms(3));
        assert!(!scheduler.render_due(ms(4)));
        assert!(!scheduler.stop_draining());
    }

    #[test]
    fn redraw_request_ignored_without_lazy_draw() {
        let mut scheduler = Scheduler::new(&config());
        scheduler.request_redraw();
        assert!(!scheduler.redraw_requested());
        assert!(!scheduler.stop_draining());
    }

    #[test]
    fn request_before_start_survives() {
        let mut config = config();
        config.lazy_draw = true;
        let mut scheduler = Scheduler::new(&config);

        scheduler.request_redraw();
        scheduler.start(&config, ms(100));

        assert!(scheduler.redraw_requested());
    }

    #[test]
    fn toggling_lazy_draw_resets_render_state() {
        let mut scheduler = Scheduler::new(&config());
        scheduler.set_lazy_draw(true, ms(20));
        assert!(!scheduler.render_due(ms(20)));

        scheduler.set_lazy_draw(false, ms(30));
        assert!(scheduler.render_due(ms(30)));
    }
}
