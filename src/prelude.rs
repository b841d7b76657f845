//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_app::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application loop
pub use crate::engine::{AppBuilder, AppLoop};
pub use crate::core::app::{App, AppContext, LoopState};
pub use crate::core::config::AppConfig;

// Errors
pub use crate::core::error::{AppError, AppResult, ErrorKind, LoadMethod, ResourceKind};

// Events
pub use crate::core::event::{Event, EventCategory, KeyCode, MouseButton, WindowEvent};

// Resources
pub use crate::core::resource::{Font, Music, Surface, TextMode, TextStyle, Texture};

// Native bridge and value types
pub use crate::core::platform_bridge::Backend;
pub use crate::core::types::{Color, DisplayMode, FPoint, FRect, Flip, Point, Rect, Size};
