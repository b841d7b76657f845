//=========================================================================
// Surface
//=========================================================================
//
// CPU-side pixel buffer. Two composition rules:
//
//   File → decode the image file
//   Text → load the embedded font, then rasterize the stored text with
//          the embedded style (solid / blended / shaded)
//
// Width and height are read from the native surface, so querying them
// loads the surface as a side effect.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::context::ResourceContext;
use super::font::Font;
use super::handle::{Resource, ResourceHandle};
use super::text::{TextSpec, TextStyle};
use crate::core::error::{AppError, AppResult, LoadMethod, ResourceKind};
use crate::core::platform_bridge::Backend;
use crate::core::types::Size;

//=== SurfaceKind =========================================================

/// Marker for surface handles.
pub enum SurfaceKind {}

/// How a surface is produced.
pub enum SurfaceMeta<B: Backend> {
    File,
    Native,
    Text(TextSpec<B>),
}

impl<B: Backend> Resource<B> for SurfaceKind {
    const KIND: ResourceKind = ResourceKind::Surface;

    type Native = B::NativeSurface;
    type Meta = SurfaceMeta<B>;

    fn load(context: &ResourceContext<B, Self>) -> AppResult<Self::Native> {
        let backend = context.backend();
        let identifier = context.identifier();
        let method = Self::method(context.meta());

        let result = match context.meta() {
            SurfaceMeta::File => backend.load_surface(identifier),
            SurfaceMeta::Text(spec) => {
                let font = spec.font.load_or_get()?;
                backend.render_text(font, identifier, &spec.style)
            }
            SurfaceMeta::Native => {
                return Err(AppError::programming(
                    "native surface context has no native object",
                ));
            }
        };

        result.map_err(|cause| {
            AppError::resource_load(ResourceKind::Surface, identifier, method, cause)
        })
    }

    fn method(meta: &Self::Meta) -> LoadMethod {
        match meta {
            SurfaceMeta::File => LoadMethod::File,
            SurfaceMeta::Native => LoadMethod::Native,
            SurfaceMeta::Text(spec) => LoadMethod::Text(spec.style.mode),
        }
    }

    fn release(backend: &B, native: Self::Native) {
        backend.release_surface(native);
    }
}

//=== Surface =============================================================

/// Shared handle to a CPU-side image.
pub type Surface<B> = ResourceHandle<B, SurfaceKind>;

impl<B: Backend> ResourceHandle<B, SurfaceKind> {
    /// Surface decoded from an image file on first use.
    pub fn from_file(backend: &Rc<B>, path: impl Into<String>) -> Self {
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            path.into(),
            SurfaceMeta::File,
        ))
    }

    /// Surface rasterized from `text` with `font` on first use.
    ///
    /// The surface holds an alias of `font` until it is destroyed.
    pub fn from_text(
        backend: &Rc<B>,
        font: Font<B>,
        text: impl Into<String>,
        style: TextStyle,
    ) -> Self {
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            text.into(),
            SurfaceMeta::Text(TextSpec { font, style }),
        ))
    }

    /// Takes ownership of an existing native surface.
    pub fn from_native(backend: &Rc<B>, surface: B::NativeSurface) -> Self {
        Self::from_context(ResourceContext::from_native(
            Rc::clone(backend),
            surface,
            SurfaceMeta::Native,
        ))
    }

    /// Pixel size. Loads the surface if needed.
    pub fn size(&self) -> AppResult<Size> {
        let surface = self.load_or_get()?;
        Ok(self.backend().surface_size(surface))
    }

    pub fn width(&self) -> AppResult<i32> {
        Ok(self.size()?.width)
    }

    pub fn height(&self) -> AppResult<i32> {
        Ok(self.size()?.height)
    }

    /// The text parameters, for text surfaces.
    pub fn text_spec(&self) -> Option<&TextSpec<B>> {
        match self.context().meta() {
            SurfaceMeta::Text(spec) => Some(spec),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::resource::TextMode;
    use crate::core::types::Color;
    use crate::platform::HeadlessBackend;

    fn backend() -> Rc<HeadlessBackend> {
        Rc::new(
            HeadlessBackend::new()
                .with_font("mono.ttf")
                .with_image("titi.png", Size::new(320, 240)),
        )
    }

    //=====================================================================
    // From File
    //=====================================================================

    #[test]
    fn file_surface_reports_image_size() {
        let backend = backend();
        let surface = Surface::from_file(&backend, "titi.png");

        assert!(!surface.is_loaded());
        assert_eq!(surface.size().unwrap(), Size::new(320, 240));
        assert!(surface.is_loaded(), "Size query loads as a side effect");
        assert_eq!(surface.width().unwrap(), 320);
        assert_eq!(backend.stats().decodes("titi.png"), 1);
    }

    #[test]
    fn absent_file_is_deferred_failure() {
        let backend = backend();
        let surface = Surface::from_file(&backend, "absent.png");

        let err = surface.height().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ResourceLoad { kind: ResourceKind::Surface, .. }
        ));
    }

    //=====================================================================
    // From Text
    //=====================================================================

    #[test]
    fn text_surface_holds_font_alias() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let surface = Surface::from_text(&backend, font.clone(), "hi", TextStyle::new(TextMode::Solid));

        assert_eq!(font.use_count(), 2);
        assert_eq!(surface.load_method(), LoadMethod::Text(TextMode::Solid));

        drop(surface);
        assert_eq!(font.use_count(), 1, "Metadata teardown releases the font alias");
    }

    #[test]
    fn text_surface_loads_font_first() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let surface = Surface::from_text(
            &backend,
            font.clone(),
            "hello",
            TextStyle::new(TextMode::Shaded).with_fg(Color::YELLOW),
        );

        let size = surface.size().unwrap();
        assert!(font.is_loaded());
        assert!(size.width > 0 && size.height > 0);
        assert_eq!(backend.stats().text_renders("hello"), 1);
    }

    #[test]
    fn font_failure_surfaces_as_font_error() {
        let backend = backend();
        let font = Font::from_file(&backend, "missing.ttf", 20);
        let surface = Surface::from_text(&backend, font, "hi", TextStyle::new(TextMode::Blended));

        let err = surface.load_or_get().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ResourceLoad { kind: ResourceKind::Font, .. }
        ));
    }

    #[test]
    fn render_failure_records_mode() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let surface = Surface::from_text(&backend, font, "", TextStyle::new(TextMode::Blended));

        match surface.load_or_get().unwrap_err().kind() {
            ErrorKind::ResourceLoad { kind, method, .. } => {
                assert_eq!(*kind, ResourceKind::Surface);
                assert_eq!(*method, LoadMethod::Text(TextMode::Blended));
            }
            other => panic!("Expected ResourceLoad, got {:?}", other),
        }
    }

    #[test]
    fn wrap_width_limits_surface_width() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let text = "a fairly long line of text";

        let unwrapped = Surface::from_text(&backend, font.clone(), text, TextStyle::new(TextMode::Blended));
        let wrapped = Surface::from_text(
            &backend,
            font,
            text,
            TextStyle::new(TextMode::Blended).with_wrap(60),
        );

        let unwrapped = unwrapped.size().unwrap();
        let wrapped = wrapped.size().unwrap();
        assert!(wrapped.width <= 60);
        assert!(wrapped.height > unwrapped.height);
    }

    #[test]
    fn multi_line_shaded_text_fails_with_mode() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let style = TextStyle::new(TextMode::Shaded).with_wrap(60);
        let surface = Surface::from_text(&backend, font, "a\nb", style);

        let err = surface.load_or_get().unwrap_err();
        match err.kind() {
            ErrorKind::ResourceLoad { method, .. } => {
                assert_eq!(*method, LoadMethod::Text(TextMode::Shaded));
            }
            other => panic!("Expected ResourceLoad, got {:?}", other),
        }
        assert!(err.to_string().contains("single line"));
        assert_eq!(backend.stats().text_renders("a\nb"), 0);
    }

    #[test]
    fn release_order_surface_then_font() {
        let backend = backend();
        let font = Font::from_file(&backend, "mono.ttf", 20);
        let surface = Surface::from_text(&backend, font, "hi", TextStyle::new(TextMode::Solid));
        surface.load_or_get().unwrap();

        drop(surface);

        let stats = backend.stats();
        assert_eq!(stats.released(ResourceKind::Surface), 1);
        assert_eq!(stats.released(ResourceKind::Font), 1);
        assert_eq!(stats.release_log, vec![ResourceKind::Surface, ResourceKind::Font]);
    }
}
