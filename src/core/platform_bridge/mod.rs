//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the native multimedia layer (SDL, headless test double) with
// the backend-independent core.
//
// This module defines the contract between backend implementations and
// the core, so a backend can be swapped without touching the scheduler
// or the resource handles.
//
// Components:
// - `interface`: the `Backend` trait (the contract)
// - `event_collector`: bounded event draining for one loop iteration
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use interface::Backend;

//=== Internal API ========================================================

pub(crate) use event_collector::{DrainControl, EventCollector};
