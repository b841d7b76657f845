//=========================================================================
// SDL Event Mapper
//
// Converts SDL2 events to the crate's `Event` type.
//
// Responsibilities:
// - Translate quit, window, keyboard and mouse events
// - Provide fallbacks (`Unidentified`, `WindowEvent::Other`) for
//   everything else
//
//=========================================================================

use sdl2::event::{Event as SdlEvent, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton as SdlMouseButton;

use crate::core::event::{Event, KeyCode, MouseButton, WindowEvent};

//=== Key Conversion ======================================================
//
// Only a subset of keycodes is supported; all others map to
// `Unidentified`.
//

impl From<Keycode> for KeyCode {
    fn from(code: Keycode) -> Self {
        match code {
            //--- Numeric keys -----------------------------------------------------
            Keycode::Num0 => KeyCode::Digit0, Keycode::Num1 => KeyCode::Digit1,
            Keycode::Num2 => KeyCode::Digit2, Keycode::Num3 => KeyCode::Digit3,
            Keycode::Num4 => KeyCode::Digit4, Keycode::Num5 => KeyCode::Digit5,
            Keycode::Num6 => KeyCode::Digit6, Keycode::Num7 => KeyCode::Digit7,
            Keycode::Num8 => KeyCode::Digit8, Keycode::Num9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            Keycode::A => KeyCode::KeyA, Keycode::B => KeyCode::KeyB, Keycode::C => KeyCode::KeyC,
            Keycode::D => KeyCode::KeyD, Keycode::E => KeyCode::KeyE, Keycode::F => KeyCode::KeyF,
            Keycode::G => KeyCode::KeyG, Keycode::H => KeyCode::KeyH, Keycode::I => KeyCode::KeyI,
            Keycode::J => KeyCode::KeyJ, Keycode::K => KeyCode::KeyK, Keycode::L => KeyCode::KeyL,
            Keycode::M => KeyCode::KeyM, Keycode::N => KeyCode::KeyN, Keycode::O => KeyCode::KeyO,
            Keycode::P => KeyCode::KeyP, Keycode::Q => KeyCode::KeyQ, Keycode::R => KeyCode::KeyR,
            Keycode::S => KeyCode::KeyS, Keycode::T => KeyCode::KeyT, Keycode::U => KeyCode::KeyU,
            Keycode::V => KeyCode::KeyV, Keycode::W => KeyCode::KeyW, Keycode::X => KeyCode::KeyX,
            Keycode::Y => KeyCode::KeyY, Keycode::Z => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            Keycode::Down => KeyCode::ArrowDown, Keycode::Left => KeyCode::ArrowLeft,
            Keycode::Right => KeyCode::ArrowRight, Keycode::Up => KeyCode::ArrowUp,

            //--- Editing keys -----------------------------------------------------
            Keycode::Space => KeyCode::Space,
            Keycode::Return => KeyCode::Enter,
            Keycode::Escape => KeyCode::Escape,
            Keycode::Tab => KeyCode::Tab,
            Keycode::Backspace => KeyCode::Backspace,
            Keycode::Delete => KeyCode::Delete,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

fn key(code: Option<Keycode>) -> KeyCode {
    code.map_or(KeyCode::Unidentified, KeyCode::from)
}

//=== Mouse Conversion ====================================================

impl From<SdlMouseButton> for MouseButton {
    fn from(button: SdlMouseButton) -> Self {
        match button {
            SdlMouseButton::Left => MouseButton::Left,
            SdlMouseButton::Right => MouseButton::Right,
            SdlMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== Window Conversion ===================================================
//
// SDL reports a user resize twice (`Resized`, then `SizeChanged`); only
// `SizeChanged` becomes a resize so each change is handled once.
//

impl From<SdlWindowEvent> for WindowEvent {
    fn from(event: SdlWindowEvent) -> Self {
        match event {
            SdlWindowEvent::Shown => WindowEvent::Shown,
            SdlWindowEvent::Hidden => WindowEvent::Hidden,
            SdlWindowEvent::Exposed => WindowEvent::Exposed,
            SdlWindowEvent::Moved(x, y) => WindowEvent::Moved { x, y },
            SdlWindowEvent::SizeChanged(width, height) => WindowEvent::SizeChanged { width, height },
            SdlWindowEvent::FocusGained => WindowEvent::FocusGained,
            SdlWindowEvent::FocusLost => WindowEvent::FocusLost,
            SdlWindowEvent::Close => WindowEvent::Close,
            _ => WindowEvent::Other,
        }
    }
}

//=== Full Event Conversion ===============================================

impl From<SdlEvent> for Event {
    fn from(event: SdlEvent) -> Self {
        match event {
            SdlEvent::Quit { .. } => Event::Quit,

            //--- Window ------------------------------------------------------
            SdlEvent::Window { win_event, .. } => Event::Window(win_event.into()),

            //--- Keyboard ----------------------------------------------------
            SdlEvent::KeyDown { keycode, repeat, .. } => Event::KeyDown {
                key: key(keycode),
                repeat,
            },
            SdlEvent::KeyUp { keycode, .. } => Event::KeyUp { key: key(keycode) },

            //--- Mouse -------------------------------------------------------
            SdlEvent::MouseButtonDown { mouse_btn, x, y, .. } => Event::MouseButtonDown {
                button: mouse_btn.into(),
                x,
                y,
            },
            SdlEvent::MouseButtonUp { mouse_btn, x, y, .. } => Event::MouseButtonUp {
                button: mouse_btn.into(),
                x,
                y,
            },
            SdlEvent::MouseMotion { x, y, .. } => Event::MouseMotion { x, y },
            SdlEvent::MouseWheel { x, y, .. } => Event::MouseWheel { x, y },

            //--- Unhandled ---------------------------------------------------
            _ => Event::Unidentified,
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
    fn key_conversion() {
        assert_eq!(KeyCode::from(Keycode::A), KeyCode::KeyA);
        assert_eq!(KeyCode::from(Keycode::Num7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(Keycode::Return), KeyCode::Enter);
        assert_eq!(KeyCode::from(Keycode::F1), KeyCode::Unidentified);
        assert_eq!(key(None), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_conversion() {
        assert_eq!(MouseButton::from(SdlMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(SdlMouseButton::X1), MouseButton::Other);
    }

    #[test]
    fn resize_maps_once() {
        assert_eq!(
            WindowEvent::from(SdlWindowEvent::SizeChanged(640, 480)),
            WindowEvent::SizeChanged { width: 640, height: 480 }
        );
        assert_eq!(WindowEvent::from(SdlWindowEvent::Resized(640, 480)), WindowEvent::Other);
    }

    #[test]
    fn quit_and_unknown_events() {
        assert_eq!(Event::from(SdlEvent::Quit { timestamp: 0 }), Event::Quit);
        assert_eq!(Event::from(SdlEvent::AppLowMemory { timestamp: 0 }), Event::Unidentified);
    }
}
