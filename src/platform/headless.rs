//=========================================================================
// Headless Backend
//=========================================================================
//
// A deterministic in-memory backend: virtual clock, scripted event
// queue and synthetic assets. Used by the test suite and by tools that
// drive an application without a display.
//
// Architecture:
// ```text
//   push_event / event_sender ──► script (sorted by `at`)
//                                     │
//   wait_event(timeout) ──────────────┘
//     ├─ next event due before the deadline → clock = max(now, at)
//     ├─ nothing due                         → clock = deadline, None
//     └─ time limit or script exhausted      → Event::Quit
// ```
//
// Time only advances inside `wait_event`; hooks run in zero virtual time.
//
// Synthetic metrics:
// - glyph width   = max(point_size / 2, 1)
// - line height   = point_size + point_size / 4
// - wrapped lines break every `max(1, wrap / glyph width)` characters
//
// Decoders only know the assets registered through `with_image`,
// `with_font` and `with_music`; anything else fails like a missing file.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::{AudioConfig, RendererConfig, WindowConfig};
use crate::core::error::ResourceKind;
use crate::core::event::Event;
use crate::core::platform_bridge::Backend;
use crate::core::resource::TextStyle;
use crate::core::types::{Color, DisplayMode, FPoint, FRect, Flip, Rect, Size};

//=== Native Objects ======================================================

/// Opened font.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessFont {
    pub id: u64,
    pub path: String,
    pub point_size: u16,
}

/// Decoded or rasterized pixel buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub id: u64,
    pub size: Size,
}

/// Uploaded texture.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub id: u64,
    pub size: Size,
}

/// Opened music track.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessMusic {
    pub id: u64,
    pub path: String,
}

//=== ScriptedEvent =======================================================

/// An event delivered once the virtual clock reaches `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    pub at: Duration,
    pub event: Event,
}

//=== HeadlessStats =======================================================

/// Snapshot of what the backend has been asked to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessStats {
    decodes: HashMap<String, usize>,
    text_renders: HashMap<String, usize>,

    /// Finalizer calls, in call order.
    pub release_log: Vec<ResourceKind>,

    pub windows_created: usize,
    pub clears: usize,
    pub draw_calls: usize,
    pub presents: usize,
    pub music_plays: usize,
    pub font_height_queries: usize,
    pub texture_size_queries: usize,
}

impl HeadlessStats {
    /// Successful decodes of the file at `path`.
    pub fn decodes(&self, path: &str) -> usize {
        self.decodes.get(path).copied().unwrap_or(0)
    }

    /// Successful rasterizations of `text`.
    pub fn text_renders(&self, text: &str) -> usize {
        self.text_renders.get(text).copied().unwrap_or(0)
    }

    /// Finalizer calls for objects of `kind`.
    pub fn released(&self, kind: ResourceKind) -> usize {
        self.release_log.iter().filter(|released| **released == kind).count()
    }
}

//=== Internal State ======================================================

#[derive(Debug, Default)]
struct Subsystems {
    video: bool,
    ttf: bool,
    image: bool,
    audio: bool,
    renderer: bool,
}

#[derive(Debug)]
struct WindowState {
    title: String,
    size: Size,
    icon: Option<String>,
}

#[derive(Debug, Default)]
struct Assets {
    images: HashMap<String, Size>,
    fonts: HashSet<String>,
    music: HashSet<String>,
}

//=== HeadlessBackend =====================================================

/// Backend without a display, driven by a virtual clock.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aetheric_app::core::event::Event;
/// use aetheric_app::core::platform_bridge::Backend;
/// use aetheric_app::core::types::Size;
/// use aetheric_app::platform::HeadlessBackend;
///
/// let backend = HeadlessBackend::new()
///     .with_image("titi.png", Size::new(64, 64))
///     .with_time_limit(Duration::from_secs(1));
/// backend.push_event(Duration::from_millis(20), Event::resized(640, 480));
///
/// assert_eq!(backend.wait_event(None), Some(Event::resized(640, 480)));
/// assert_eq!(backend.now(), Duration::from_millis(20));
/// ```
#[derive(Debug)]
pub struct HeadlessBackend {
    clock: Cell<Duration>,
    time_limit: Option<Duration>,
    next_id: Cell<u64>,

    script: RefCell<Vec<ScriptedEvent>>,
    sender: Sender<ScriptedEvent>,
    receiver: Receiver<ScriptedEvent>,

    assets: Assets,
    failing: HashSet<String>,

    subsystems: RefCell<Subsystems>,
    window: RefCell<Option<WindowState>>,
    draw_color: Cell<Color>,
    stats: RefCell<HeadlessStats>,
}

impl HeadlessBackend {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            clock: Cell::new(Duration::ZERO),
            time_limit: None,
            next_id: Cell::new(1),
            script: RefCell::new(Vec::new()),
            sender,
            receiver,
            assets: Assets::default(),
            failing: HashSet::new(),
            subsystems: RefCell::new(Subsystems::default()),
            window: RefCell::new(None),
            draw_color: Cell::new(Color::BLACK),
            stats: RefCell::new(HeadlessStats::default()),
        }
    }

    /// Registers a decodable image (surface or texture) of `size`.
    pub fn with_image(mut self, path: impl Into<String>, size: Size) -> Self {
        self.assets.images.insert(path.into(), size);
        self
    }

    pub fn with_font(mut self, path: impl Into<String>) -> Self {
        self.assets.fonts.insert(path.into());
        self
    }

    pub fn with_music(mut self, path: impl Into<String>) -> Self {
        self.assets.music.insert(path.into());
        self
    }

    /// Delivers `Event::Quit` once the clock would reach `limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Makes initialization of `subsystem` fail.
    ///
    /// Recognized names: `video`, `ttf`, `image`, `audio`, `window`,
    /// `renderer`.
    pub fn failing(mut self, subsystem: &str) -> Self {
        self.failing.insert(subsystem.to_string());
        self
    }

    //--- Scripting --------------------------------------------------------

    /// Queues `event` for delivery at virtual time `at`.
    ///
    /// Events sharing a timestamp are delivered in push order.
    pub fn push_event(&self, at: Duration, event: Event) {
        self.insert_scripted(ScriptedEvent { at, event });
    }

    /// Sender for queuing events from other threads. Sent events are
    /// picked up by the next `wait_event`.
    pub fn event_sender(&self) -> Sender<ScriptedEvent> {
        self.sender.clone()
    }

    //--- Inspection -------------------------------------------------------

    pub fn stats(&self) -> HeadlessStats {
        self.stats.borrow().clone()
    }

    pub fn window_title(&self) -> Option<String> {
        self.window.borrow().as_ref().map(|window| window.title.clone())
    }

    pub fn window_size(&self) -> Option<Size> {
        self.window.borrow().as_ref().map(|window| window.size)
    }

    pub fn window_icon(&self) -> Option<String> {
        self.window.borrow().as_ref().and_then(|window| window.icon.clone())
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color.get()
    }

    /// Whether `subsystem` (`video`, `ttf`, `image`, `audio`, `renderer`)
    /// is initialized.
    pub fn subsystem_ready(&self, subsystem: &str) -> bool {
        let subsystems = self.subsystems.borrow();
        match subsystem {
            "video" => subsystems.video,
            "ttf" => subsystems.ttf,
            "image" => subsystems.image,
            "audio" => subsystems.audio,
            "renderer" => subsystems.renderer,
            _ => false,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert_scripted(&self, scripted: ScriptedEvent) {
        let mut script = self.script.borrow_mut();
        let index = script.partition_point(|queued| queued.at <= scripted.at);
        script.insert(index, scripted);
    }

    fn collect_sent(&self) {
        while let Ok(scripted) = self.receiver.try_recv() {
            self.insert_scripted(scripted);
        }
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn advance_to(&self, time: Duration) {
        if time > self.clock.get() {
            self.clock.set(time);
        }
    }

    fn init_subsystem(&self, name: &str, flag: impl FnOnce(&mut Subsystems)) -> Result<(), String> {
        if self.failing.contains(name) {
            return Err(format!("{} unavailable in headless mode", name));
        }
        flag(&mut self.subsystems.borrow_mut());
        trace!(target: "platform::headless", "Subsystem '{}' initialized", name);
        Ok(())
    }

    fn require_renderer(&self) -> Result<(), String> {
        if self.subsystems.borrow().renderer {
            Ok(())
        } else {
            Err("renderer not ready".to_string())
        }
    }

    fn record_decode(&self, path: &str) {
        *self
            .stats
            .borrow_mut()
            .decodes
            .entry(path.to_string())
            .or_insert(0) += 1;
    }

    fn record_release(&self, kind: ResourceKind) {
        trace!(target: "platform::headless", "Finalizing {}", kind);
        self.stats.borrow_mut().release_log.push(kind);
    }

    fn glyph_width(point_size: u16) -> i32 {
        (i32::from(point_size) / 2).max(1)
    }

    fn line_height(point_size: u16) -> i32 {
        let point_size = i32::from(point_size);
        point_size + point_size / 4
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

//=== Backend Implementation ==============================================

impl Backend for HeadlessBackend {
    type NativeFont = HeadlessFont;
    type NativeSurface = HeadlessSurface;
    type NativeTexture = HeadlessTexture;
    type NativeMusic = HeadlessMusic;

    //--- Subsystems -------------------------------------------------------

    fn init_video(&self) -> Result<(), String> {
        self.init_subsystem("video", |s| s.video = true)
    }

    fn init_ttf(&self) -> Result<(), String> {
        self.init_subsystem("ttf", |s| s.ttf = true)
    }

    fn init_image(&self) -> Result<(), String> {
        self.init_subsystem("image", |s| s.image = true)
    }

    fn init_audio(&self, config: &AudioConfig) -> Result<(), String> {
        self.init_subsystem("audio", |s| s.audio = true)?;
        debug!(
            target: "platform::headless",
            "Audio device: {} Hz, {} channels",
            config.frequency,
            config.channels
        );
        Ok(())
    }

    fn create_window(&self, config: &WindowConfig) -> Result<Size, String> {
        if self.failing.contains("window") {
            return Err("window unavailable in headless mode".to_string());
        }
        if self.window.borrow().is_some() {
            return Err("window already created".to_string());
        }

        *self.window.borrow_mut() = Some(WindowState {
            title: config.title.clone(),
            size: config.size,
            icon: None,
        });
        self.stats.borrow_mut().windows_created += 1;
        Ok(config.size)
    }

    fn has_window(&self) -> bool {
        self.window.borrow().is_some()
    }

    fn create_renderer(&self, _config: &RendererConfig) -> Result<(), String> {
        if !self.has_window() {
            return Err("no window to render into".to_string());
        }
        self.init_subsystem("renderer", |s| s.renderer = true)
    }

    fn renderer_ready(&self) -> bool {
        self.subsystems.borrow().renderer
    }

    fn set_window_icon(&self, path: &str) -> Result<(), String> {
        if !self.assets.images.contains_key(path) {
            return Err(format!("couldn't open {}", path));
        }
        match self.window.borrow_mut().as_mut() {
            Some(window) => {
                window.icon = Some(path.to_string());
                Ok(())
            }
            None => Err("no window".to_string()),
        }
    }

    fn set_window_title(&self, title: &str) -> Result<(), String> {
        match self.window.borrow_mut().as_mut() {
            Some(window) => {
                window.title = title.to_string();
                Ok(())
            }
            None => Err("no window".to_string()),
        }
    }

    /// Resizes immediately and queues the matching resize event at `now`.
    fn set_window_size(&self, size: Size) -> Result<(), String> {
        match self.window.borrow_mut().as_mut() {
            Some(window) => window.size = size,
            None => return Err("no window".to_string()),
        }
        self.push_event(self.now(), Event::resized(size.width, size.height));
        Ok(())
    }

    fn current_display_mode(&self, index: i32) -> Result<DisplayMode, String> {
        if !self.subsystems.borrow().video {
            return Err("video subsystem has not been initialized".to_string());
        }
        if index != 0 {
            return Err(format!("invalid display index {}", index));
        }
        Ok(DisplayMode {
            width: 1920,
            height: 1080,
            refresh_rate: 60,
        })
    }

    fn shutdown(&self) {
        *self.window.borrow_mut() = None;
        *self.subsystems.borrow_mut() = Subsystems::default();
        debug!(target: "platform::headless", "Shut down at {:?}", self.now());
    }

    //--- Clock & Events ---------------------------------------------------

    fn now(&self) -> Duration {
        self.clock.get()
    }

    fn wait_event(&self, timeout: Option<Duration>) -> Option<Event> {
        self.collect_sent();

        let now = self.now();
        let deadline = timeout.map(|timeout| now + timeout);

        {
            let mut script = self.script.borrow_mut();
            if let Some(next) = script.first() {
                let before_deadline = deadline.map_or(true, |deadline| next.at <= deadline);
                let before_limit = self.time_limit.map_or(true, |limit| next.at < limit);

                if before_deadline && before_limit {
                    let scripted = script.remove(0);
                    drop(script);
                    self.advance_to(scripted.at);
                    return Some(scripted.event);
                }
            }
        }

        match (deadline, self.time_limit) {
            (Some(deadline), Some(limit)) if deadline >= limit => {
                self.advance_to(limit);
                debug!(target: "platform::headless", "Time limit reached");
                Some(Event::Quit)
            }
            (Some(deadline), _) => {
                self.advance_to(deadline);
                None
            }
            (None, Some(limit)) => {
                self.advance_to(limit);
                debug!(target: "platform::headless", "Time limit reached");
                Some(Event::Quit)
            }
            (None, None) => {
                warn!(
                    target: "platform::headless",
                    "Event script exhausted while waiting indefinitely, quitting"
                );
                Some(Event::Quit)
            }
        }
    }

    //--- Decoding ---------------------------------------------------------

    fn open_font(&self, path: &str, point_size: u16) -> Result<HeadlessFont, String> {
        if !self.assets.fonts.contains(path) {
            return Err(format!("couldn't open {}", path));
        }
        self.record_decode(path);
        Ok(HeadlessFont {
            id: self.allocate_id(),
            path: path.to_string(),
            point_size,
        })
    }

    fn font_height(&self, font: &HeadlessFont) -> i32 {
        self.stats.borrow_mut().font_height_queries += 1;
        Self::line_height(font.point_size)
    }

    fn load_surface(&self, path: &str) -> Result<HeadlessSurface, String> {
        let size = *self
            .assets
            .images
            .get(path)
            .ok_or_else(|| format!("couldn't open {}", path))?;
        self.record_decode(path);
        Ok(HeadlessSurface {
            id: self.allocate_id(),
            size,
        })
    }

    fn render_text(
        &self,
        font: &HeadlessFont,
        text: &str,
        style: &TextStyle,
    ) -> Result<HeadlessSurface, String> {
        if text.is_empty() {
            return Err("text has zero width".to_string());
        }
        style.check_layout(text)?;

        let glyph_width = Self::glyph_width(font.point_size);
        let max_chars = match style.wrap {
            0 => usize::MAX,
            wrap => (wrap as usize / glyph_width as usize).max(1),
        };

        let mut rows = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            let chars = line.chars().count();
            rows += chars.div_ceil(max_chars).max(1);
            widest = widest.max(chars.min(max_chars));
        }

        let size = Size::new(
            widest as i32 * glyph_width,
            rows as i32 * Self::line_height(font.point_size),
        );
        trace!(
            target: "platform::headless",
            "Rendered '{}' ({}) at {}",
            text,
            style.mode,
            size
        );

        *self
            .stats
            .borrow_mut()
            .text_renders
            .entry(text.to_string())
            .or_insert(0) += 1;

        Ok(HeadlessSurface {
            id: self.allocate_id(),
            size,
        })
    }

    fn surface_size(&self, surface: &HeadlessSurface) -> Size {
        surface.size
    }

    fn load_texture(&self, path: &str) -> Result<HeadlessTexture, String> {
        self.require_renderer()?;
        let surface = self.load_surface(path)?;
        Ok(HeadlessTexture {
            id: self.allocate_id(),
            size: surface.size,
        })
    }

    fn texture_from_surface(&self, surface: &HeadlessSurface) -> Result<HeadlessTexture, String> {
        self.require_renderer()?;
        Ok(HeadlessTexture {
            id: self.allocate_id(),
            size: surface.size,
        })
    }

    fn texture_size(&self, texture: &HeadlessTexture) -> Size {
        self.stats.borrow_mut().texture_size_queries += 1;
        texture.size
    }

    fn load_music(&self, path: &str) -> Result<HeadlessMusic, String> {
        if !self.assets.music.contains(path) {
            return Err(format!("couldn't open {}", path));
        }
        self.record_decode(path);
        Ok(HeadlessMusic {
            id: self.allocate_id(),
            path: path.to_string(),
        })
    }

    fn play_music(&self, music: &HeadlessMusic, loops: i32) -> Result<(), String> {
        if !self.subsystems.borrow().audio {
            return Err("audio device not open".to_string());
        }
        trace!(
            target: "platform::headless",
            "Playing '{}' (loops: {})",
            music.path,
            loops
        );
        self.stats.borrow_mut().music_plays += 1;
        Ok(())
    }

    //--- Drawing ----------------------------------------------------------

    fn set_draw_color(&self, color: Color) -> Result<(), String> {
        self.require_renderer()?;
        self.draw_color.set(color);
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        self.require_renderer()?;
        self.stats.borrow_mut().clears += 1;
        Ok(())
    }

    fn copy(
        &self,
        texture: &HeadlessTexture,
        _src: Option<Rect>,
        _dst: Option<FRect>,
        _angle: f64,
        _center: Option<FPoint>,
        _flip: Flip,
    ) -> Result<(), String> {
        self.require_renderer()?;
        trace!(target: "platform::headless", "Copy texture #{}", texture.id);
        self.stats.borrow_mut().draw_calls += 1;
        Ok(())
    }

    fn present(&self) {
        self.stats.borrow_mut().presents += 1;
    }

    //--- Finalizers -------------------------------------------------------

    fn release_font(&self, _font: HeadlessFont) {
        self.record_release(ResourceKind::Font);
    }

    fn release_surface(&self, _surface: HeadlessSurface) {
        self.record_release(ResourceKind::Surface);
    }

    fn release_texture(&self, _texture: HeadlessTexture) {
        self.record_release(ResourceKind::Texture);
    }

    fn release_music(&self, _music: HeadlessMusic) {
        self.record_release(ResourceKind::Music);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::KeyCode;
    use crate::core::resource::TextMode;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    //=====================================================================
    // Virtual Clock
    //=====================================================================

    #[test]
    fn timeout_advances_clock() {
        let backend = HeadlessBackend::new();
        assert_eq!(backend.wait_event(Some(ms(25))), None);
        assert_eq!(backend.now(), ms(25));
    }

    #[test]
    fn past_events_do_not_rewind_clock() {
        let backend = HeadlessBackend::new();
        backend.wait_event(Some(ms(30)));
        backend.push_event(ms(10), Event::key_down(KeyCode::KeyA));

        assert_eq!(backend.wait_event(Some(ms(0))), Some(Event::key_down(KeyCode::KeyA)));
        assert_eq!(backend.now(), ms(30));
    }

    #[test]
    fn same_timestamp_keeps_push_order() {
        let backend = HeadlessBackend::new();
        backend.push_event(ms(5), Event::key_down(KeyCode::KeyA));
        backend.push_event(ms(5), Event::key_down(KeyCode::KeyB));
        backend.push_event(ms(1), Event::key_down(KeyCode::KeyC));

        let order: Vec<_> = (0..3).filter_map(|_| backend.wait_event(Some(ms(10)))).collect();
        assert_eq!(
            order,
            vec![
                Event::key_down(KeyCode::KeyC),
                Event::key_down(KeyCode::KeyA),
                Event::key_down(KeyCode::KeyB),
            ]
        );
    }

    #[test]
    fn time_limit_delivers_quit() {
        let backend = HeadlessBackend::new().with_time_limit(ms(100));
        backend.push_event(ms(150), Event::key_down(KeyCode::KeyA));

        assert_eq!(backend.wait_event(Some(ms(60))), None);
        assert_eq!(backend.wait_event(Some(ms(60))), Some(Event::Quit));
        assert_eq!(backend.now(), ms(100));
    }

    #[test]
    fn exhausted_script_quits_instead_of_blocking() {
        let backend = HeadlessBackend::new();
        assert_eq!(backend.wait_event(None), Some(Event::Quit));
    }

    #[test]
    fn sender_feeds_script_across_threads() {
        let backend = HeadlessBackend::new();
        let sender = backend.event_sender();

        std::thread::spawn(move || {
            sender
                .send(ScriptedEvent {
                    at: Duration::from_millis(7),
                    event: Event::resized(10, 20),
                })
                .unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(backend.wait_event(None), Some(Event::resized(10, 20)));
        assert_eq!(backend.now(), ms(7));
    }

    //=====================================================================
    // Window & Renderer
    //=====================================================================

    #[test]
    fn renderer_requires_window() {
        let backend = HeadlessBackend::new();
        assert!(backend.create_renderer(&RendererConfig::default()).is_err());

        backend.create_window(&WindowConfig::default()).unwrap();
        backend.create_renderer(&RendererConfig::default()).unwrap();
        assert!(backend.renderer_ready());

        backend.init_ttf().unwrap();
        assert!(backend.subsystem_ready("ttf"));

        backend.shutdown();
        assert!(!backend.subsystem_ready("ttf"));
        assert!(!backend.renderer_ready());
        assert!(!backend.has_window());
    }

    #[test]
    fn set_window_size_queues_resize() {
        let backend = HeadlessBackend::new();
        backend.create_window(&WindowConfig::default()).unwrap();
        backend.set_window_size(Size::new(300, 200)).unwrap();

        assert_eq!(backend.window_size(), Some(Size::new(300, 200)));
        assert_eq!(backend.wait_event(Some(ms(0))), Some(Event::resized(300, 200)));
    }

    //=====================================================================
    // Synthetic Metrics
    //=====================================================================

    #[test]
    fn text_metrics_follow_point_size() {
        let backend = HeadlessBackend::new().with_font("mono.ttf");
        let font = backend.open_font("mono.ttf", 20).unwrap();

        let surface = backend
            .render_text(&font, "abcd", &TextStyle::new(TextMode::Solid))
            .unwrap();

        assert_eq!(surface.size, Size::new(40, 25));
        assert_eq!(backend.font_height(&font), 25);
    }

    #[test]
    fn newlines_add_rows() {
        let backend = HeadlessBackend::new().with_font("mono.ttf");
        let font = backend.open_font("mono.ttf", 8).unwrap();

        let surface = backend
            .render_text(&font, "ab\nabcdef", &TextStyle::new(TextMode::Blended))
            .unwrap();

        assert_eq!(surface.size, Size::new(24, 20));
    }

    #[test]
    fn release_log_records_order() {
        let backend = HeadlessBackend::new().with_music("a.ogg");
        let music = backend.load_music("a.ogg").unwrap();
        backend.release_music(music);
        assert_eq!(backend.stats().release_log, vec![ResourceKind::Music]);
        assert_eq!(backend.stats().released(ResourceKind::Font), 0);
    }
}
