//=========================================================================
// Platform Subsystem
//
// Concrete `Backend` implementations.
//
// Architecture:
// ```text
//   core (AppLoop, resources)
//     │  Rc<B: Backend>
//     ├─► HeadlessBackend   virtual clock, scripted events, synthetic
//     │                     assets; always available
//     └─► SdlBackend        SDL2 + ttf/image/mixer; `sdl` feature
//           └─ event_mapper: SDL events → core Event
// ```
//
// Backends are single-threaded and shared by reference counting; the
// only cross-thread entry point is the headless event sender.
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;

#[cfg(feature = "sdl")]
mod event_mapper;
#[cfg(feature = "sdl")]
mod sdl;

//=== Public Exports ======================================================

pub use headless::{
    HeadlessBackend, HeadlessFont, HeadlessMusic, HeadlessStats, HeadlessSurface,
    HeadlessTexture, ScriptedEvent,
};

#[cfg(feature = "sdl")]
pub use sdl::SdlBackend;
