//=========================================================================
// Core
//
// Backend-agnostic building blocks of an application.
//
// Responsibilities:
// - Application hooks and the per-run context (`app`)
// - Update/render deadline bookkeeping (`scheduler`)
// - Lazily-loaded, reference-counted media handles (`resource`)
// - The contract a native backend fulfils (`platform_bridge`)
// - Shared value types, events, configuration and errors
//
//=========================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod platform_bridge;
pub mod resource;
pub mod scheduler;
pub mod types;
