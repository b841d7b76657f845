//=========================================================================
// Aetheric App — Library Root
//
// A single-threaded application loop with lazily-loaded media resources.
//
// Responsibilities:
// - Expose the loop entry point (`AppBuilder` / `AppLoop`)
// - Expose resource handles (`Font`, `Surface`, `Texture`, `Music`)
//   that load on first use and release when the last alias drops
// - Keep the native layer behind the `Backend` trait, with a headless
//   implementation always available and SDL2 behind the `sdl` feature
//
// Typical usage:
// ```no_run
// use aetheric_app::prelude::*;
// use aetheric_app::platform::SdlBackend;
//
// struct Hello;
// impl App<SdlBackend> for Hello {}
//
// fn main() -> AppResult<()> {
//     AppBuilder::new(SdlBackend::new()).build().run(&mut Hello)
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the backend-agnostic pieces; `platform` the concrete
// backends.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{AppBuilder, AppLoop};
