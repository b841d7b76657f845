//=========================================================================
// Font
//=========================================================================
//
// Composition rule: open the file at the stored point size. The line
// height is not computed at load time; the first `line_height()` query
// asks the backend and caches the answer in the metadata.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::context::ResourceContext;
use super::handle::{Resource, ResourceHandle};
use crate::core::error::{AppError, AppResult, LoadMethod, ResourceKind};
use crate::core::platform_bridge::Backend;

//=== FontKind ============================================================

/// Marker for font handles.
pub enum FontKind {}

/// Font metadata.
#[derive(Debug)]
pub struct FontMeta {
    /// `None` for wrapped native fonts.
    point_size: Option<u16>,
    line_height: Cell<Option<i32>>,
}

impl<B: Backend> Resource<B> for FontKind {
    const KIND: ResourceKind = ResourceKind::Font;

    type Native = B::NativeFont;
    type Meta = FontMeta;

    fn load(context: &ResourceContext<B, Self>) -> AppResult<Self::Native> {
        let path = context.identifier();
        let Some(point_size) = context.meta().point_size else {
            return Err(AppError::programming(format!(
                "font '{}' has neither a native object nor a point size",
                path
            )));
        };

        context
            .backend()
            .open_font(path, point_size)
            .map_err(|cause| AppError::resource_load(ResourceKind::Font, path, LoadMethod::File, cause))
    }

    fn method(meta: &Self::Meta) -> LoadMethod {
        match meta.point_size {
            Some(_) => LoadMethod::File,
            None => LoadMethod::Native,
        }
    }

    fn release(backend: &B, native: Self::Native) {
        backend.release_font(native);
    }
}

//=== Font ================================================================

/// Shared handle to a font face at one point size.
pub type Font<B> = ResourceHandle<B, FontKind>;

impl<B: Backend> ResourceHandle<B, FontKind> {
    /// Font opened from `path` at `point_size` on first use.
    pub fn from_file(backend: &Rc<B>, path: impl Into<String>, point_size: u16) -> Self {
        let meta = FontMeta {
            point_size: Some(point_size),
            line_height: Cell::new(None),
        };
        Self::from_context(ResourceContext::from_source(
            Rc::clone(backend),
            path.into(),
            meta,
        ))
    }

    /// Takes ownership of an already-opened native font.
    pub fn from_native(backend: &Rc<B>, font: B::NativeFont) -> Self {
        let meta = FontMeta {
            point_size: None,
            line_height: Cell::new(None),
        };
        Self::from_context(ResourceContext::from_native(Rc::clone(backend), font, meta))
    }

    /// Requested point size; `None` for wrapped native fonts.
    pub fn point_size(&self) -> Option<u16> {
        self.context().meta().point_size
    }

    /// Recommended line height in pixels. Loads the font if needed.
    pub fn line_height(&self) -> AppResult<i32> {
        let font = self.load_or_get()?;
        let meta = self.context().meta();

        if let Some(height) = meta.line_height.get() {
            return Ok(height);
        }

        let height = self.backend().font_height(font);
        meta.line_height.set(Some(height));
        Ok(height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
