//=========================================================================
// Resource Context
//=========================================================================
//
// The shared allocation behind every alias of one resource.
//
// One `Rc<ResourceContext>` holds the provenance, the lazily-set native
// object and the kind's typed metadata in a single block. Its strong
// count is the use count: it starts at 1 with the first handle, and the
// context is destroyed exactly once when the last alias drops.
//
// Teardown order on drop:
//   1. native object → `Resource::release` (backend finalizer), if loaded
//   2. metadata      → field drop (releases embedded handles)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::handle::Resource;
use crate::core::error::AppResult;
use crate::core::platform_bridge::Backend;

//=== Provenance ==========================================================

/// Where a context's native object comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// A file path, or the literal text to rasterize.
    Source(String),

    /// An object supplied at construction; ownership moved into the context.
    Native,
}

//=== ResourceContext =====================================================

/// Backing state shared by all handles aliasing one resource.
pub struct ResourceContext<B: Backend, R: Resource<B>> {
    backend: Rc<B>,
    provenance: Provenance,
    native: OnceCell<R::Native>,
    meta: R::Meta,
}

impl<B: Backend, R: Resource<B>> ResourceContext<B, R> {
    //--- Construction -----------------------------------------------------

    /// Context that loads from `identifier` on first access.
    pub(crate) fn from_source(backend: Rc<B>, identifier: String, meta: R::Meta) -> Self {
        Self {
            backend,
            provenance: Provenance::Source(identifier),
            native: OnceCell::new(),
            meta,
        }
    }

    /// Context wrapping an already-constructed native object.
    pub(crate) fn from_native(backend: Rc<B>, native: R::Native, meta: R::Meta) -> Self {
        Self {
            backend,
            provenance: Provenance::Native,
            native: OnceCell::from(native),
            meta,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// The file path / text, or `""` for wrapped native objects.
    pub fn identifier(&self) -> &str {
        match &self.provenance {
            Provenance::Source(identifier) => identifier,
            Provenance::Native => "",
        }
    }

    pub fn meta(&self) -> &R::Meta {
        &self.meta
    }

    pub fn is_loaded(&self) -> bool {
        self.native.get().is_some()
    }

    /// Native object if already loaded; never triggers a load.
    pub fn loaded(&self) -> Option<&R::Native> {
        self.native.get()
    }

    //--- Lazy Load --------------------------------------------------------

    /// Returns the native object, running the kind's load rule first if
    /// nothing has been loaded yet. A failed load leaves the context
    /// unloaded, so a later call retries.
    pub(crate) fn load_or_get(&self) -> AppResult<&R::Native> {
        if let Some(native) = self.native.get() {
            return Ok(native);
        }

        let native = R::load(self)?;
        debug!(
            target: "resource",
            "Loaded {} '{}' from {}",
            R::KIND,
            self.identifier(),
            R::method(&self.meta)
        );

        Ok(self.native.get_or_init(|| native))
    }
}

//--- Trait Implementations -----------------------------------------------

impl<B: Backend, R: Resource<B>> Drop for ResourceContext<B, R> {
    fn drop(&mut self) {
        match self.native.take() {
            Some(native) => {
                debug!(
                    target: "resource",
                    "Releasing {} '{}'",
                    R::KIND,
                    self.identifier()
                );
                R::release(&self.backend, native);
            }
            None => {
                debug!(
                    target: "resource",
                    "Dropping unloaded {} '{}'",
                    R::KIND,
                    self.identifier()
                );
            }
        }
    }
}

impl<B: Backend, R: Resource<B>> fmt::Debug for ResourceContext<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceContext")
            .field("kind", &R::KIND)
            .field("provenance", &self.provenance)
            .field("method", &R::method(&self.meta))
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
