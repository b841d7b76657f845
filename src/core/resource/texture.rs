//=========================================================================
// Texture
//=========================================================================
//
// GPU-side image owned by the renderer. Three composition rules, all of
// which require the renderer to exist at load time:
//
//   File    → decode and upload the image file; size queried from the
//             texture
//   Surface → upload the embedded surface (loading it first); size taken
//             from the surface at upload time
//   Text    → build a transient text surface from the embedded font and
//             style, upload it, take its size, then let it go; the texture
//             does not keep the surface
//
// The size is cached in the metadata. Querying it loads the texture.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::context::ResourceContext;
use super::font::Font;
use super::handle::{Resource, ResourceHandle};
use super::surface::Surface;
use super::text::{TextSpec, TextStyle};
use crate::core::error::{AppError, AppResult, LoadMethod, ResourceKind};
use crate::core::platform_bridge::Backend;
use crate::core::types::Size;

//=== TextureKind =========================================================

/// Marker for texture handles.
pub enum TextureKind {}

/// Source of a texture.
pub enum TextureOrigin<B: Backend> {
    File,
    Native,
    Surface(Surface<B>),
    Text(TextSpec<B>),
}

/// Texture metadata: origin plus the size cached at upload time.
pub struct TextureMeta<B: Backend> {
    size: Cell<Option<Size>>,
    origin: TextureOrigin<B>,
}

impl<B: Backend> TextureMeta<B> {
    fn new(origin: TextureOrigin<B>) -> Self {
        Self {
            size: Cell::new(None),
            origin,
        }
    }

    pub fn origin(&self) -> &TextureOrigin<B> {
        &self.origin
    }

    /// Size recorded at load time, if the texture is loaded.
    pub fn cached_size(&self) -> Option<Size> {
        self.size.get()
    }
}

impl<B: Backend> Resource<B> for TextureKind {
    const KIND: ResourceKind = ResourceKind::Texture;

    type Native = B::NativeTexture;
    type Meta = TextureMeta<B>;

    fn load(context: &ResourceContext<B, Self>) -> AppResult<Self::Native> {
        let backend = context.backend();
        let identifier = context.identifier();
        let meta = context.meta();
        let method = Self::method(meta);

        let fail = |cause: String| {
            AppError::resource_load(ResourceKind::Texture, identifier, method, cause)
        };

        if !backend.renderer_ready() {
            return Err(fail("renderer not ready".to_string()));
        }

        match &meta.origin {
            TextureOrigin::File => {
                let texture = backend.load_texture(identifier).map_err(fail)?;
                meta.size.set(Some(backend.texture_size(&texture)));
                Ok(texture)
            }
            TextureOrigin::Surface(surface) => {
                let pixels = surface.load_or_get()?;
                let texture = backend.texture_from_surface(pixels).map_err(fail)?;
                meta.size.set(Some(backend.surface_size(pixels)));
                Ok(texture)
            }
            TextureOrigin::Text(spec) => {
                let transient =
                    Surface::from_text(backend, spec.font.clone(), identifier, spec.style);
                let pixels = transient.load_or_get()?;
                let texture = backend.texture_from_surface(pixels).map_err(fail)?;
                meta.size.set(Some(backend.surface_size(pixels)));
                Ok(texture)
            }
            TextureOrigin::Native => Err(AppError::programming(
                "native texture context has no native object",
            )),
        }
    }

    fn method(meta: &Self::Meta) -> LoadMethod {
        match &meta.origin {
            TextureOrigin::File => LoadMethod::File,
            TextureOrigin::Native => LoadMethod::Native,
            TextureOrigin::Surface(_) => LoadMethod::FromSurface,
            TextureOrigin::Text(spec) => LoadMethod::Text(spec.style.mode),
        }
    }

    fn release(backend: &B, native: Self::Native) {
        backend.release_texture(native);
    }
}

//=== Texture =============================================================

/// Shared handle to a renderer texture.
pub type Texture<B> = ResourceHandle<B, TextureKind>;

impl<B: Backend> ResourceHandle<B, TextureKind> {
    /// Texture decoded from an image file on first use.
    pub fn from_file(backend: &Rc<B>, path: impl Into<String>) -> Self {
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            path.into(),
            TextureMeta::new(TextureOrigin::File),
        ))
    }

    /// Texture uploaded from `surface` on first use.
    ///
    /// Keeps an alias of the surface for as long as the texture lives.
    pub fn from_surface(backend: &Rc<B>, surface: Surface<B>) -> Self {
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            surface.identifier().to_string(),
            TextureMeta::new(TextureOrigin::Surface(surface)),
        ))
    }

    /// Texture rasterized from `text` with `font` on first use.
    pub fn from_text(
        backend: &Rc<B>,
        font: Font<B>,
        text: impl Into<String>,
        style: TextStyle,
    ) -> Self {
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            text.into(),
            TextureMeta::new(TextureOrigin::Text(TextSpec { font, style })),
        ))
    }

    /// Takes ownership of an existing native texture.
    pub fn from_native(backend: &Rc<B>, texture: B::NativeTexture) -> Self {
        Self::from_context(ResourceContext::from_native(
            Rc::clone(backend),
            texture,
            TextureMeta::new(TextureOrigin::Native),
        ))
    }

    /// Pixel size. Loads the texture if needed.
    pub fn size(&self) -> AppResult<Size> {
        let texture = self.load_or_get()?;
        let meta = self.context().meta();

        if let Some(size) = meta.size.get() {
            return Ok(size);
        }

        let size = self.backend().texture_size(texture);
        meta.size.set(Some(size));
        Ok(size)
    }

    pub fn width(&self) -> AppResult<i32> {
        Ok(self.size()?.width)
    }

    pub fn height(&self) -> AppResult<i32> {
        Ok(self.size()?.height)
    }

    pub fn origin(&self) -> &TextureOrigin<B> {
        self.context().meta().origin()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{RendererConfig, WindowConfig};
    use crate::core::error::ErrorKind;
    use crate::core::resource::TextMode;
    use crate::core::types::Color;
    use crate::platform::HeadlessBackend;

    fn backend_with_renderer() -> Rc<HeadlessBackend> {
        let backend = backend_without_renderer();
        backend.create_window(&WindowConfig::default()).unwrap();
        backend.create_renderer(&RendererConfig::default()).unwrap();
        backend
    }

    fn backend_without_renderer() -> Rc<HeadlessBackend> {
        Rc::new(
            HeadlessBackend::new()
                .with_font("mono.ttf")
                .with_image("titi.png", Size::new(64, 32)),
        )
    }

    //=====================================================================
    // Ordering Dependency
    //=====================================================================

    #[test]
    fn renderer_must_exist() {
        let backend = backend_without_renderer();
        let texture = Texture::from_file(&backend, "titi.png");

        let err = texture.load_or_get().unwrap_err();
        match err.kind() {
            ErrorKind::ResourceLoad { kind, cause, .. } => {
                assert_eq!(*kind, ResourceKind::Texture);
                assert_eq!(cause, "renderer not ready");
            }
            other => panic!("Expected ResourceLoad, got {:?}", other),
        }
        assert!(!texture.is_loaded());
    }

    #[test]
    fn load_succeeds_once_renderer_exists() {
        let backend = backend_without_renderer();
        let texture = Texture::from_file(&backend, "titi.png");
        assert!(texture.load_or_get().is_err());

        backend.create_window(&WindowConfig::default()).unwrap();
        backend.create_renderer(&RendererConfig::default()).unwrap();

        assert_eq!(texture.size().unwrap(), Size::new(64, 32));
    }

    //=====================================================================
    // Composition Rules
    //=====================================================================

    #[test]
    fn file_texture_caches_size() {
        let backend = backend_with_renderer();
        let texture = Texture::from_file(&backend, "titi.png");

        assert_eq!(texture.width().unwrap(), 64);
        assert_eq!(texture.height().unwrap(), 32);
        assert_eq!(texture.load_method(), LoadMethod::File);
        assert_eq!(backend.stats().decodes("titi.png"), 1);
        assert_eq!(backend.stats().texture_size_queries, 1);
    }

    #[test]
    fn surface_texture_takes_size_from_surface_at_upload() {
        let backend = backend_with_renderer();
        let surface = Surface::from_file(&backend, "titi.png");
        let texture = Texture::from_surface(&backend, surface.clone());

        assert_eq!(surface.use_count(), 2);
        assert!(!surface.is_loaded(), "Nothing loads before first access");

        assert_eq!(texture.size().unwrap(), Size::new(64, 32));
        assert!(surface.is_loaded());
        assert_eq!(texture.load_method(), LoadMethod::FromSurface);

        drop(texture);
        assert_eq!(surface.use_count(), 1);
    }

    #[test]
    fn text_texture_matches_standalone_surface() {
        let backend = backend_with_renderer();
        let font = Font::from_file(&backend, "mono.ttf", 48);
        let style = TextStyle::new(TextMode::Blended).with_fg(Color::YELLOW);

        let texture = Texture::from_text(&backend, font.clone(), "hello world", style);
        let surface = Surface::from_text(&backend, font.clone(), "hello world", style);

        assert_eq!(texture.size().unwrap(), surface.size().unwrap());
    }

    #[test]
    fn text_texture_releases_transient_surface() {
        let backend = backend_with_renderer();
        let font = Font::from_file(&backend, "mono.ttf", 16);
        let texture = Texture::from_text(&backend, font.clone(), "hi", TextStyle::new(TextMode::Solid));

        texture.load_or_get().unwrap();

        assert_eq!(backend.stats().released(ResourceKind::Surface), 1);
        assert_eq!(font.use_count(), 2, "Texture metadata still aliases the font");
    }

    #[test]
    fn text_texture_propagates_render_failure() {
        let backend = backend_with_renderer();
        let font = Font::from_file(&backend, "mono.ttf", 16);
        let texture = Texture::from_text(&backend, font, "", TextStyle::new(TextMode::Shaded));

        let err = texture.load_or_get().unwrap_err();
        assert!(err.is_resource_load());
        assert!(!texture.is_loaded());
    }

    #[test]
    fn native_texture_queries_size_lazily() {
        let backend = backend_with_renderer();
        let native = backend.load_texture("titi.png").unwrap();
        let texture = Texture::from_native(&backend, native);

        assert!(texture.context().meta().cached_size().is_none());
        assert_eq!(texture.size().unwrap(), Size::new(64, 32));
        assert!(texture.context().meta().cached_size().is_some());
    }

    #[test]
    fn texture_drop_releases_all_layers() {
        let backend = backend_with_renderer();
        let font = Font::from_file(&backend, "mono.ttf", 16);
        let surface = Surface::from_text(&backend, font, "layers", TextStyle::new(TextMode::Blended));
        let texture = Texture::from_surface(&backend, surface);
        texture.load_or_get().unwrap();

        drop(texture);

        let stats = backend.stats();
        assert_eq!(
            stats.release_log,
            vec![ResourceKind::Texture, ResourceKind::Surface, ResourceKind::Font]
        );
    }
}
