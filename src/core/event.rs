//=========================================================================
// Event Model
//
// Portable representation of the events a backend's polling primitive
// returns. Only the type/subtype and the few payloads the loop itself
// consumes (resize dimensions) are interpreted by the framework; the rest
// is carried for the application's own `on_event` hook.
//
// Event Flow:
// ```text
// Native event queue (SDL, headless script)
//         ↓  backend mapping
//    Event (this module)
//         ↓
//    App::on_event → stop / redraw / ignore
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::types::Size;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons).
    Other,
}

//=== KeyCode =============================================================

/// Keyboard key identifier.
///
/// Covers the keys demo applications bind; anything else maps to
/// `Unidentified` and still counts as keyboard input for redraw purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the backend could not map.
    Unidentified,
}

//=== WindowEvent =========================================================

/// Window subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEvent {
    Shown,
    Hidden,
    Exposed,
    Moved { x: i32, y: i32 },

    /// The drawable area changed; carries the new dimensions.
    SizeChanged { width: i32, height: i32 },

    FocusGained,
    FocusLost,
    Close,
    Other,
}

//=== EventCategory =======================================================

/// Coarse classification used by the default event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Quit,
    Window,
    Resize,
    Keyboard,
    Mouse,
    Other,
}

//=== Event ===============================================================

/// A single event returned by [`crate::core::platform_bridge::Backend::wait_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user or the OS asked the application to quit.
    Quit,

    Window(WindowEvent),

    KeyDown { key: KeyCode, repeat: bool },
    KeyUp { key: KeyCode },

    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
    MouseMotion { x: i32, y: i32 },
    MouseWheel { x: i32, y: i32 },

    /// Anything the backend does not translate (audio device, joystick…).
    Unidentified,
}

impl Event {
    /// Shorthand for a resize notification.
    pub fn resized(width: i32, height: i32) -> Self {
        Self::Window(WindowEvent::SizeChanged { width, height })
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            Self::Quit => EventCategory::Quit,
            Self::Window(WindowEvent::SizeChanged { .. }) => EventCategory::Resize,
            Self::Window(_) => EventCategory::Window,
            Self::KeyDown { .. } | Self::KeyUp { .. } => EventCategory::Keyboard,
            Self::MouseButtonDown { .. }
            | Self::MouseButtonUp { .. }
            | Self::MouseMotion { .. }
            | Self::MouseWheel { .. } => EventCategory::Mouse,
            Self::Unidentified => EventCategory::Other,
        }
    }

    /// New drawable size if this is a resize event.
    pub fn new_size(&self) -> Option<Size> {
        match self {
            Self::Window(WindowEvent::SizeChanged { width, height }) => {
                Some(Size::new(*width, *height))
            }
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_is_its_own_category() {
        assert_eq!(Event::resized(640, 480).category(), EventCategory::Resize);
        assert_eq!(
            Event::Window(WindowEvent::Exposed).category(),
            EventCategory::Window
        );
    }

    #[test]
    fn input_categories() {
        assert_eq!(Event::key_down(KeyCode::Escape).category(), EventCategory::Keyboard);
        assert_eq!(
            Event::MouseWheel { x: 0, y: -1 }.category(),
            EventCategory::Mouse
        );
        assert_eq!(Event::Quit.category(), EventCategory::Quit);
        assert_eq!(Event::Unidentified.category(), EventCategory::Other);
    }

    #[test]
    fn new_size_only_for_resize() {
        assert_eq!(Event::resized(300, 200).new_size(), Some(Size::new(300, 200)));
        assert_eq!(Event::Quit.new_size(), None);
        assert_eq!(Event::Window(WindowEvent::Shown).new_size(), None);
    }
}
