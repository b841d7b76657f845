//=========================================================================
// Music
//=========================================================================
//
// Streamed audio track. Single composition rule: decode/open the file.
// The only metadata is where the track came from.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::context::ResourceContext;
use super::handle::{Resource, ResourceHandle};
use crate::core::error::{AppError, AppResult, LoadMethod, ResourceKind};
use crate::core::platform_bridge::Backend;

//=== MusicKind ===========================================================

/// Marker for music handles.
pub enum MusicKind {}

/// Origin of a music handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicMeta {
    File,
    Native,
}

impl MusicMeta {
    fn method(self) -> LoadMethod {
        match self {
            Self::File => LoadMethod::File,
            Self::Native => LoadMethod::Native,
        }
    }
}

impl<B: Backend> Resource<B> for MusicKind {
    const KIND: ResourceKind = ResourceKind::Music;

    type Native = B::NativeMusic;
    type Meta = MusicMeta;

    fn load(context: &ResourceContext<B, Self>) -> AppResult<Self::Native> {
        let path = context.identifier();
        context.backend().load_music(path).map_err(|cause| {
            AppError::resource_load(ResourceKind::Music, path, LoadMethod::File, cause)
        })
    }

    fn method(meta: &Self::Meta) -> LoadMethod {
        meta.method()
    }

    fn release(backend: &B, native: Self::Native) {
        backend.release_music(native);
    }
}

//=== Music ===============================================================

/// Shared handle to a music track.
pub type Music<B> = ResourceHandle<B, MusicKind>;

impl<B: Backend> ResourceHandle<B, MusicKind> {
    /// Music opened from `path` on first use.
    pub fn from_file(backend: &Rc<B>, path: impl Into<String>) -> Self {
        Self::from_context(ResourceContext::from_source(Rc::clone(backend), path.into(), MusicMeta::File))
    }

    /// Takes ownership of an already-opened native track.
    pub fn from_native(backend: &Rc<B>, music: B::NativeMusic) -> Self {
        Self::from_context(ResourceContext::from_native(Rc::clone(backend), music, MusicMeta::Native))
    }

    /// Starts playback, loading the track first if needed.
    ///
    /// `loops = -1` repeats forever, `0` plays once.
    pub fn play(&self, loops: i32) -> AppResult<()> {
        let music = self.load_or_get()?;
        debug!(target: "resource", "Playing music '{}' (loops: {})", self.identifier(), loops);

        self.backend().play_music(music, loops).map_err(|cause| {
            AppError::resource_load(
                ResourceKind::Music,
                self.identifier(),
                self.context().meta().method(),
                format!("playback failed: {}", cause),
            )
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
