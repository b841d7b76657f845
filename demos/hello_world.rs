//=========================================================================
// Hello World
//
// Square window showing an image with a line of text across it.
//
// Run with:
//   cargo run --example hello_world --features sdl
//
// Expects `titi.png`, `PixelMplus10-Regular.ttf` and `the-world.mp3` in
// the working directory. Backspace or Escape quits.
//
//=========================================================================

use std::rc::Rc;
use std::time::Duration;

use aetheric_app::prelude::*;
use aetheric_app::platform::SdlBackend;

struct HelloWorld {
    titi: Texture<SdlBackend>,
    hello_world: Texture<SdlBackend>,
    music: Music<SdlBackend>,
}

impl HelloWorld {
    fn new(backend: &Rc<SdlBackend>) -> Self {
        // Nothing is opened here; every resource loads on first use.
        let font = Font::from_file(backend, "PixelMplus10-Regular.ttf", 48);
        let style = TextStyle::new(TextMode::Blended).with_fg(Color::YELLOW);

        Self {
            titi: Texture::from_file(backend, "titi.png"),
            hello_world: Texture::from_text(backend, font, "hello world", style),
            music: Music::from_file(backend, "the-world.mp3"),
        }
    }
}

impl App<SdlBackend> for HelloWorld {
    fn on_setup(&mut self, ctx: &mut AppContext<SdlBackend>) -> AppResult<()> {
        ctx.init_video()?;
        ctx.init_ttf()?;
        ctx.init_image()?;

        let window = &mut ctx.config_mut().window;
        window.title = "hello world".to_string();
        window.size = Size::new(600, 600);
        window.icon = Some("titi.png".to_string());
        ctx.init_window_renderer()?;

        ctx.disable_update();
        ctx.enable_lazy_draw();

        // Audio is optional for this demo.
        if ctx.init_audio().is_ok() {
            if let Err(err) = self.music.play(-1) {
                err.report();
            }
        }

        Ok(())
    }

    fn on_event(&mut self, ctx: &mut AppContext<SdlBackend>, event: &Event) -> AppResult<()> {
        match event {
            Event::KeyDown { key: KeyCode::Backspace | KeyCode::Escape, .. } => {
                ctx.stop();
                Ok(())
            }
            Event::Window(WindowEvent::SizeChanged { width, height }) if width != height => {
                // Keep the window square; the follow-up resize redraws.
                let side = (*width).max(*height);
                ctx.set_window_size(side, side)
            }
            _ => {
                ctx.handle_event(event);
                Ok(())
            }
        }
    }

    fn on_render(&mut self, ctx: &mut AppContext<SdlBackend>, _tick: Duration) -> AppResult<()> {
        let window = ctx.window_size();
        let (width, height) = (window.width as f32, window.height as f32);

        ctx.set_draw_color(Color::BLACK)?;
        ctx.clear()?;

        let titi = self.titi.size()?;
        let w = titi.width as f32 * height / titi.height as f32;
        ctx.copy(&self.titi, None, Some(FRect::new((width - w) / 2.0, 0.0, w, height)))?;

        let text = self.hello_world.size()?;
        let h = text.height as f32 * width / text.width as f32;
        ctx.copy(&self.hello_world, None, Some(FRect::new(0.0, (height - h) / 2.0, width, h)))?;

        Ok(())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let backend = Rc::new(SdlBackend::new());
    let mut app = HelloWorld::new(&backend);

    if AppBuilder::shared(backend).build().run(&mut app).is_err() {
        std::process::exit(1);
    }
}
