//=========================================================================
// Resource Handles
//=========================================================================
//
// Lazily-loaded, reference-counted handles to native resources.
//
// Architecture:
// ```text
//   ResourceHandle<B, K>  ──Rc──►  ResourceContext<B, K>
//        (Font, Surface,              ├─ provenance  (identifier | native)
//         Texture, Music)             ├─ native      (OnceCell, set once)
//                                     ├─ meta        (K::Meta, typed)
//                                     └─ backend     (Rc<B>)
// ```
//
// Composition:
// ```text
//   Font ──┬──► Surface (text) ──► Texture (surface)
//          └──────────────────────► Texture (text, via transient Surface)
// ```
//
// Every handle clone aliases the same context; the native object is
// decoded on the first `load_or_get()` and released through the backend's
// finalizer when the last alias drops. Embedded handles in `K::Meta`
// (the font of a text surface, the surface of a texture) are released
// right after, as part of the same drop.
//
// Handles are `!Send`: counts are plain `Rc` counts and the whole model
// is single-threaded.
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod font;
mod handle;
mod music;
mod surface;
mod text;
mod texture;

//=== Public API ==========================================================

pub use context::{Provenance, ResourceContext};
pub use font::{Font, FontKind, FontMeta};
pub use handle::{Resource, ResourceHandle};
pub use music::{Music, MusicKind, MusicMeta};
pub use surface::{Surface, SurfaceKind, SurfaceMeta};
pub use text::{TextMode, TextSpec, TextStyle};
pub use texture::{Texture, TextureKind, TextureMeta, TextureOrigin};
