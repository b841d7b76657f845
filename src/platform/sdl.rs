//=========================================================================
// SDL Backend
//=========================================================================
//
// Native backend on SDL2 with the ttf, image and mixer extensions.
//
// Native state lives behind `RefCell`s so the backend can be shared via
// `Rc` by the loop and every resource handle:
//
// ```text
//   Sdl ─┬─ VideoSubsystem ─── Window ──into_canvas──► WindowCanvas
//        │                                              └─ TextureCreator
//        ├─ EventPump
//        └─ AudioSubsystem ─── mixer (open_audio)
//
//   ttf context: leaked on init so fonts can be `Font<'static, 'static>`
// ```
//
// Textures are built with `unsafe_textures`; they carry no lifetime and
// must be destroyed while their renderer is still alive, which
// `release_texture` checks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use sdl2::image::{InitFlag as ImageFlag, LoadSurface, LoadTexture, Sdl2ImageContext};
use sdl2::mixer::{InitFlag as MixerFlag, Sdl2MixerContext};
use sdl2::pixels;
use sdl2::rect;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::ttf::Sdl2TtfContext;
use sdl2::video::{Window, WindowContext};
use sdl2::{AudioSubsystem, EventPump, Sdl, VideoSubsystem};

//=== Internal Dependencies ===============================================

use crate::core::config::{AudioConfig, RendererConfig, WindowConfig};
use crate::core::event::Event;
use crate::core::platform_bridge::Backend;
use crate::core::resource::{TextMode, TextStyle};
use crate::core::types::{Color, DisplayMode, FPoint, FRect, Flip, Rect, Size};

//=== Conversions =========================================================

fn sdl_color(color: Color) -> pixels::Color {
    pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

fn sdl_rect(rect: Rect) -> rect::Rect {
    rect::Rect::new(rect.x, rect.y, rect.w.max(0) as u32, rect.h.max(0) as u32)
}

fn sdl_point(point: FPoint) -> rect::Point {
    rect::Point::new(point.x.round() as i32, point.y.round() as i32)
}

fn size_of(width: u32, height: u32) -> Size {
    Size::new(width as i32, height as i32)
}

//=== SdlBackend ==========================================================

/// SDL2 implementation of [`Backend`].
pub struct SdlBackend {
    started: Instant,

    sdl: RefCell<Option<Sdl>>,
    video: RefCell<Option<VideoSubsystem>>,
    event_pump: RefCell<Option<EventPump>>,
    ttf: Cell<Option<&'static Sdl2TtfContext>>,
    image: RefCell<Option<Sdl2ImageContext>>,
    audio: RefCell<Option<AudioSubsystem>>,
    mixer: RefCell<Option<Sdl2MixerContext>>,

    /// Window until the renderer takes it over.
    window: RefCell<Option<Window>>,
    canvas: RefCell<Option<WindowCanvas>>,
    texture_creator: RefCell<Option<TextureCreator<WindowContext>>>,
}

impl SdlBackend {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            sdl: RefCell::new(None),
            video: RefCell::new(None),
            event_pump: RefCell::new(None),
            ttf: Cell::new(None),
            image: RefCell::new(None),
            audio: RefCell::new(None),
            mixer: RefCell::new(None),
            window: RefCell::new(None),
            canvas: RefCell::new(None),
            texture_creator: RefCell::new(None),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn sdl(&self) -> Result<Sdl, String> {
        if let Some(sdl) = self.sdl.borrow().as_ref() {
            return Ok(sdl.clone());
        }
        let sdl = sdl2::init()?;
        *self.sdl.borrow_mut() = Some(sdl.clone());
        Ok(sdl)
    }

    /// Runs `f` on the window, wherever it currently lives.
    fn with_window<R>(&self, f: impl FnOnce(&mut Window) -> R) -> Result<R, String> {
        if let Some(canvas) = self.canvas.borrow_mut().as_mut() {
            return Ok(f(canvas.window_mut()));
        }
        match self.window.borrow_mut().as_mut() {
            Some(window) => Ok(f(window)),
            None => Err("window still not created".to_string()),
        }
    }

    fn with_canvas<R>(&self, f: impl FnOnce(&mut WindowCanvas) -> R) -> Result<R, String> {
        match self.canvas.borrow_mut().as_mut() {
            Some(canvas) => Ok(f(canvas)),
            None => Err("renderer not ready".to_string()),
        }
    }

    fn with_texture_creator<R>(
        &self,
        f: impl FnOnce(&TextureCreator<WindowContext>) -> Result<R, String>,
    ) -> Result<R, String> {
        match self.texture_creator.borrow().as_ref() {
            Some(creator) => f(creator),
            None => Err("renderer not ready".to_string()),
        }
    }

    fn ttf(&self) -> Result<&'static Sdl2TtfContext, String> {
        self.ttf
            .get()
            .ok_or_else(|| "ttf subsystem not initialized".to_string())
    }
}

impl Default for SdlBackend {
    fn default() -> Self {
        Self::new()
    }
}

//=== Backend Implementation ==============================================

impl Backend for SdlBackend {
    type NativeFont = sdl2::ttf::Font<'static, 'static>;
    type NativeSurface = sdl2::surface::Surface<'static>;
    type NativeTexture = sdl2::render::Texture;
    type NativeMusic = sdl2::mixer::Music<'static>;

    //--- Subsystems -------------------------------------------------------

    fn init_video(&self) -> Result<(), String> {
        if self.video.borrow().is_some() {
            return Ok(());
        }
        let sdl = self.sdl()?;
        let video = sdl.video()?;
        let pump = sdl.event_pump()?;

        info!(target: "platform::sdl", "SDL {} video driver: {}", sdl2::version::version(), video.current_video_driver());
        *self.video.borrow_mut() = Some(video);
        *self.event_pump.borrow_mut() = Some(pump);
        Ok(())
    }

    fn init_ttf(&self) -> Result<(), String> {
        if self.ttf.get().is_some() {
            return Ok(());
        }
        let context = sdl2::ttf::init().map_err(|e| e.to_string())?;
        // Fonts borrow the context; it stays alive until process exit.
        self.ttf.set(Some(Box::leak(Box::new(context))));
        Ok(())
    }

    fn init_image(&self) -> Result<(), String> {
        if self.image.borrow().is_some() {
            return Ok(());
        }
        let context = sdl2::image::init(ImageFlag::PNG | ImageFlag::JPG)?;
        *self.image.borrow_mut() = Some(context);
        Ok(())
    }

    fn init_audio(&self, config: &AudioConfig) -> Result<(), String> {
        if self.mixer.borrow().is_some() {
            return Ok(());
        }
        let audio = self.sdl()?.audio()?;
        let mixer = sdl2::mixer::init(MixerFlag::MP3 | MixerFlag::OGG)?;
        sdl2::mixer::open_audio(
            config.frequency,
            sdl2::mixer::DEFAULT_FORMAT,
            config.channels,
            config.chunk_size,
        )?;

        *self.audio.borrow_mut() = Some(audio);
        *self.mixer.borrow_mut() = Some(mixer);
        Ok(())
    }

    fn create_window(&self, config: &WindowConfig) -> Result<Size, String> {
        let video = self.video.borrow();
        let video = video
            .as_ref()
            .ok_or_else(|| "video subsystem not initialized".to_string())?;

        let mut builder = video.window(
            &config.title,
            config.size.width.max(1) as u32,
            config.size.height.max(1) as u32,
        );
        if let Some(position) = config.position {
            builder.position(position.x, position.y);
        }
        if config.resizable {
            builder.resizable();
        }

        let window = builder.build().map_err(|e| e.to_string())?;
        let (width, height) = window.drawable_size();
        *self.window.borrow_mut() = Some(window);
        Ok(size_of(width, height))
    }

    fn has_window(&self) -> bool {
        self.window.borrow().is_some() || self.canvas.borrow().is_some()
    }

    fn create_renderer(&self, config: &RendererConfig) -> Result<(), String> {
        let window = self
            .window
            .borrow_mut()
            .take()
            .ok_or_else(|| "window still not created".to_string())?;

        let mut builder = window.into_canvas();
        if let Some(index) = config.index {
            builder = builder.index(index);
        }
        if config.accelerated {
            builder = builder.accelerated();
        }
        if config.vsync {
            builder = builder.present_vsync();
        }

        let canvas = builder.build().map_err(|e| e.to_string())?;
        *self.texture_creator.borrow_mut() = Some(canvas.texture_creator());
        *self.canvas.borrow_mut() = Some(canvas);
        Ok(())
    }

    fn renderer_ready(&self) -> bool {
        self.canvas.borrow().is_some()
    }

    fn set_window_icon(&self, path: &str) -> Result<(), String> {
        let icon = sdl2::surface::Surface::from_file(path)?;
        self.with_window(|window| window.set_icon(icon))
    }

    fn set_window_title(&self, title: &str) -> Result<(), String> {
        self.with_window(|window| window.set_title(title).map_err(|e| e.to_string()))?
    }

    fn set_window_size(&self, size: Size) -> Result<(), String> {
        self.with_window(|window| {
            window
                .set_size(size.width.max(1) as u32, size.height.max(1) as u32)
                .map_err(|e| e.to_string())
        })?
    }

    fn current_display_mode(&self, index: i32) -> Result<DisplayMode, String> {
        let video = self.video.borrow();
        let video = video
            .as_ref()
            .ok_or_else(|| "video subsystem not initialized".to_string())?;
        let mode = video.current_display_mode(index)?;
        Ok(DisplayMode {
            width: mode.w,
            height: mode.h,
            refresh_rate: mode.refresh_rate,
        })
    }

    fn shutdown(&self) {
        *self.texture_creator.borrow_mut() = None;
        *self.canvas.borrow_mut() = None;
        *self.window.borrow_mut() = None;

        if self.mixer.borrow_mut().take().is_some() {
            sdl2::mixer::close_audio();
        }
        *self.audio.borrow_mut() = None;
        *self.image.borrow_mut() = None;
        *self.event_pump.borrow_mut() = None;
        *self.video.borrow_mut() = None;
        *self.sdl.borrow_mut() = None;

        debug!(target: "platform::sdl", "SDL shut down");
    }

    //--- Clock & Events ---------------------------------------------------

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn wait_event(&self, timeout: Option<Duration>) -> Option<Event> {
        let mut pump = self.event_pump.borrow_mut();
        let Some(pump) = pump.as_mut() else {
            match timeout {
                Some(timeout) => {
                    std::thread::sleep(timeout);
                    return None;
                }
                None => {
                    warn!(target: "platform::sdl", "Waiting for events without video, quitting");
                    return Some(Event::Quit);
                }
            }
        };

        let event = match timeout {
            None => Some(pump.wait_event()),
            Some(timeout) if timeout.is_zero() => pump.poll_event(),
            Some(timeout) => {
                let millis = timeout.as_millis().clamp(1, u128::from(u32::MAX)) as u32;
                pump.wait_event_timeout(millis)
            }
        };

        event.map(Event::from)
    }

    //--- Decoding ---------------------------------------------------------

    fn open_font(&self, path: &str, point_size: u16) -> Result<Self::NativeFont, String> {
        self.ttf()?.load_font(path, point_size)
    }

    fn font_height(&self, font: &Self::NativeFont) -> i32 {
        font.height()
    }

    fn load_surface(&self, path: &str) -> Result<Self::NativeSurface, String> {
        sdl2::surface::Surface::from_file(path)
    }

    fn render_text(
        &self,
        font: &Self::NativeFont,
        text: &str,
        style: &TextStyle,
    ) -> Result<Self::NativeSurface, String> {
        style.check_layout(text)?;

        let fg = sdl_color(style.fg);
        let rendering = font.render(text);

        // A zero wrap width still breaks on newlines.
        let surface = match style.mode {
            TextMode::Solid => rendering.solid(fg),
            TextMode::Shaded => rendering.shaded(fg, sdl_color(style.bg)),
            TextMode::Blended => rendering.blended_wrapped(fg, style.wrap),
        };

        surface.map_err(|e| e.to_string())
    }

    fn surface_size(&self, surface: &Self::NativeSurface) -> Size {
        size_of(surface.width(), surface.height())
    }

    fn load_texture(&self, path: &str) -> Result<Self::NativeTexture, String> {
        self.with_texture_creator(|creator| creator.load_texture(path))
    }

    fn texture_from_surface(
        &self,
        surface: &Self::NativeSurface,
    ) -> Result<Self::NativeTexture, String> {
        self.with_texture_creator(|creator| {
            creator
                .create_texture_from_surface(surface)
                .map_err(|e| e.to_string())
        })
    }

    fn texture_size(&self, texture: &Self::NativeTexture) -> Size {
        let query = texture.query();
        size_of(query.width, query.height)
    }

    fn load_music(&self, path: &str) -> Result<Self::NativeMusic, String> {
        sdl2::mixer::Music::from_file(path)
    }

    fn play_music(&self, music: &Self::NativeMusic, loops: i32) -> Result<(), String> {
        if self.mixer.borrow().is_none() {
            return Err("audio device not open".to_string());
        }
        music.play(loops)
    }

    //--- Drawing ----------------------------------------------------------

    fn set_draw_color(&self, color: Color) -> Result<(), String> {
        self.with_canvas(|canvas| canvas.set_draw_color(sdl_color(color)))
    }

    fn clear(&self) -> Result<(), String> {
        self.with_canvas(|canvas| canvas.clear())
    }

    fn copy(
        &self,
        texture: &Self::NativeTexture,
        src: Option<Rect>,
        dst: Option<FRect>,
        angle: f64,
        center: Option<FPoint>,
        flip: Flip,
    ) -> Result<(), String> {
        self.with_canvas(|canvas| {
            canvas.copy_ex(
                texture,
                src.map(sdl_rect),
                dst.map(|dst| sdl_rect(dst.round())),
                angle,
                center.map(sdl_point),
                flip.horizontal(),
                flip.vertical(),
            )
        })?
    }

    fn present(&self) {
        if let Some(canvas) = self.canvas.borrow_mut().as_mut() {
            canvas.present();
        }
    }

    //--- Finalizers -------------------------------------------------------

    fn release_texture(&self, texture: Self::NativeTexture) {
        if self.canvas.borrow().is_some() {
            // SAFETY: the renderer that created the texture is still alive.
            unsafe { texture.destroy() };
        }
    }
}
