//=========================================================================
// Resource Handle
//=========================================================================
//
// Generic front-end shared by the four resource kinds.
//
// Semantics:
// - `clone()`  → alias: use count +1, same native object observed
// - move       → plain Rust move: the count is transferred, not bumped
// - drop       → use count -1; the last alias tears the context down
// - `load_or_get()` → lazy load, idempotent after the first success
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::context::ResourceContext;
use crate::core::error::{AppResult, LoadMethod, ResourceKind};
use crate::core::platform_bridge::Backend;

//=== Resource Trait ======================================================

/// Per-kind load rule, metadata and finalizer.
///
/// Implemented by the uninhabited marker types [`super::FontKind`],
/// [`super::SurfaceKind`], [`super::TextureKind`] and [`super::MusicKind`].
pub trait Resource<B: Backend>: Sized + 'static {
    const KIND: ResourceKind;

    /// Backend object this kind resolves to.
    type Native;

    /// Kind-specific data stored next to the native object.
    type Meta;

    /// Acquires the native object for a not-yet-loaded context.
    fn load(context: &ResourceContext<B, Self>) -> AppResult<Self::Native>;

    /// Composition rule recorded in `meta`.
    fn method(meta: &Self::Meta) -> LoadMethod;

    /// Hands a loaded object back to the backend's finalizer.
    fn release(backend: &B, native: Self::Native);
}

//=== ResourceHandle ======================================================

/// A cheap, cloneable alias to one lazily-loaded resource.
pub struct ResourceHandle<B: Backend, R: Resource<B>> {
    context: Rc<ResourceContext<B, R>>,
}

impl<B: Backend, R: Resource<B>> ResourceHandle<B, R> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn from_context(context: ResourceContext<B, R>) -> Self {
        Self {
            context: Rc::new(context),
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Returns the native object, loading it on first use.
    ///
    /// # Errors
    ///
    /// A `ResourceLoad` error naming this resource if acquisition fails.
    /// Nothing is cached on failure.
    pub fn load_or_get(&self) -> AppResult<&R::Native> {
        self.context.load_or_get()
    }

    /// Native object if already loaded; never triggers a load.
    pub fn loaded(&self) -> Option<&R::Native> {
        self.context.loaded()
    }

    pub fn is_loaded(&self) -> bool {
        self.context.is_loaded()
    }

    //--- Accessors --------------------------------------------------------

    /// File name or text this resource is built from (`""` if native).
    pub fn identifier(&self) -> &str {
        self.context.identifier()
    }

    pub fn load_method(&self) -> LoadMethod {
        R::method(self.context.meta())
    }

    /// Number of live handles aliasing this resource.
    pub fn use_count(&self) -> usize {
        Rc::strong_count(&self.context)
    }

    /// Whether both handles alias the same context.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.context, &other.context)
    }

    pub fn backend(&self) -> &Rc<B> {
        self.context.backend()
    }

    pub(crate) fn context(&self) -> &ResourceContext<B, R> {
        &self.context
    }
}

//--- Trait Implementations -----------------------------------------------

impl<B: Backend, R: Resource<B>> Clone for ResourceHandle<B, R> {
    fn clone(&self) -> Self {
        Self {
            context: Rc::clone(&self.context),
        }
    }
}

impl<B: Backend, R: Resource<B>> fmt::Debug for ResourceHandle<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("context", &self.context)
            .field("use_count", &self.use_count())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::Music;
    use crate::platform::HeadlessBackend;

    fn backend() -> Rc<HeadlessBackend> {
        Rc::new(HeadlessBackend::new().with_music("theme.ogg"))
    }

    //=====================================================================
    // Reference Counting
    //=====================================================================

    #[test]
    fn construction_starts_at_one() {
        let backend = backend();
        let music = Music::from_file(&backend, "theme.ogg");
        assert_eq!(music.use_count(), 1);
    }

    #[test]
    fn clone_aliases_same_context() {
        let backend = backend();
        let a = Music::from_file(&backend, "theme.ogg");
        let b = a.clone();

        assert_eq!(a.use_count(), 2);
        assert!(a.ptr_eq(&b));
        assert!(std::ptr::eq(a.load_or_get().unwrap(), b.load_or_get().unwrap()));
    }

    #[test]
    fn move_transfers_without_bumping() {
        let backend = backend();
        let a = Music::from_file(&backend, "theme.ogg");
        let b = a;
        assert_eq!(b.use_count(), 1);
    }

    #[test]
    fn release_only_after_last_alias() {
        let backend = backend();
        let a = Music::from_file(&backend, "theme.ogg");
        a.load_or_get().unwrap();
        let b = a.clone();
        let c = b.clone();

        drop(a);
        drop(b);
        assert_eq!(backend.stats().released(ResourceKind::Music), 0);

        drop(c);
        assert_eq!(backend.stats().released(ResourceKind::Music), 1);
    }

    #[test]
    fn unloaded_context_is_dropped_without_finalizer() {
        let backend = backend();
        let music = Music::from_file(&backend, "theme.ogg");
        let alias = music.clone();

        drop(music);
        drop(alias);

        assert_eq!(backend.stats().released(ResourceKind::Music), 0);
        assert_eq!(backend.stats().decodes("theme.ogg"), 0);
    }

    //=====================================================================
    // Lazy Loading
    //=====================================================================

    #[test]
    fn load_happens_once() {
        let backend = backend();
        let music = Music::from_file(&backend, "theme.ogg");
        let alias = music.clone();

        let first = music.load_or_get().unwrap() as *const _;
        for _ in 0..5 {
            assert_eq!(alias.load_or_get().unwrap() as *const _, first);
        }

        assert_eq!(backend.stats().decodes("theme.ogg"), 1);
    }

    #[test]
    fn missing_file_fails_on_first_access_only() {
        let backend = backend();
        let music = Music::from_file(&backend, "missing.ogg");
        assert!(!music.is_loaded());

        let err = music.load_or_get().unwrap_err();
        assert!(err.is_resource_load());
        assert!(err.to_string().contains("missing.ogg"));
        assert!(!music.is_loaded(), "Failed load must not be cached");
    }

    #[test]
    fn debug_shows_kind_and_count() {
        let backend = backend();
        let music = Music::from_file(&backend, "theme.ogg");
        let text = format!("{:?}", music);
        assert!(text.contains("Music"));
        assert!(text.contains("use_count: 1"));
    }
}
