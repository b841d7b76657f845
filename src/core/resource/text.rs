//=========================================================================
// Text Rendering Parameters
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::font::Font;
use crate::core::error::AppError;
use crate::core::platform_bridge::Backend;
use crate::core::types::Color;

//=== TextMode ============================================================

/// Rasterization quality for text surfaces and textures.
///
/// The numeric tags (2, 3, 4) match the native render-mode constants and
/// are accepted through `TryFrom<i32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMode {
    /// Fast, aliased, palettized output. Uses the foreground color only.
    Solid = 2,

    /// Anti-aliased onto a transparent background. Foreground only.
    Blended = 3,

    /// Anti-aliased onto an opaque box. Needs foreground and background.
    Shaded = 4,
}

impl TextMode {
    pub fn uses_background(self) -> bool {
        self == Self::Shaded
    }

    /// Only blended output can be broken into several lines.
    pub fn supports_wrapping(self) -> bool {
        self == Self::Blended
    }
}

impl TryFrom<i32> for TextMode {
    type Error = AppError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            2 => Ok(Self::Solid),
            3 => Ok(Self::Blended),
            4 => Ok(Self::Shaded),
            other => Err(AppError::programming(format!(
                "invalid text render mode {}!",
                other
            ))),
        }
    }
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Solid => "solid",
            Self::Blended => "blended",
            Self::Shaded => "shaded",
        };
        f.write_str(name)
    }
}

//=== TextStyle ===========================================================

/// Mode, colors and wrap width of a text render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub mode: TextMode,
    pub fg: Color,

    /// Only read in `Shaded` mode.
    pub bg: Color,

    /// Wrap width in pixels; `0` wraps on newlines only.
    pub wrap: u32,
}

impl TextStyle {
    /// White on black, no wrapping.
    pub fn new(mode: TextMode) -> Self {
        Self {
            mode,
            fg: Color::WHITE,
            bg: Color::BLACK,
            wrap: 0,
        }
    }

    pub fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    pub fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    pub fn with_wrap(mut self, wrap: u32) -> Self {
        self.wrap = wrap;
        self
    }

    /// Whether rendering `text` needs more than one line.
    pub fn breaks_lines(&self, text: &str) -> bool {
        self.wrap > 0 || text.contains('\n')
    }

    /// Rejects multi-line layouts in modes that render a single line.
    pub fn check_layout(&self, text: &str) -> Result<(), String> {
        if self.breaks_lines(text) && !self.mode.supports_wrapping() {
            return Err(format!(
                "{} text renders a single line (wrap {}, {} lines)",
                self.mode,
                self.wrap,
                text.split('\n').count()
            ));
        }
        Ok(())
    }
}

//=== TextSpec ============================================================

/// A font alias plus the style to render with.
///
/// Stored as the metadata of text surfaces and text textures; holding the
/// font handle keeps the font alive for as long as the text resource is.
pub struct TextSpec<B: Backend> {
    pub font: Font<B>,
    pub style: TextStyle,
}

impl<B: Backend> Clone for TextSpec<B> {
    fn clone(&self) -> Self {
        Self {
            font: self.font.clone(),
            style: self.style,
        }
    }
}

impl<B: Backend> fmt::Debug for TextSpec<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSpec")
            .field("font", &self.font.identifier())
            .field("style", &self.style)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tags_round_trip() {
        assert_eq!(TextMode::try_from(2).unwrap(), TextMode::Solid);
        assert_eq!(TextMode::try_from(3).unwrap(), TextMode::Blended);
        assert_eq!(TextMode::try_from(TextMode::Shaded as i32).unwrap(), TextMode::Shaded);
    }

    #[test]
    fn unknown_tag_is_programming_error() {
        let err = TextMode::try_from(7).unwrap_err();
        assert!(err.is_programming());
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn style_defaults_and_builders() {
        let style = TextStyle::new(TextMode::Blended);
        assert_eq!(style.fg, Color::WHITE);
        assert_eq!(style.bg, Color::BLACK);
        assert_eq!(style.wrap, 0);

        let style = style.with_fg(Color::YELLOW).with_wrap(120);
        assert_eq!(style.fg, Color::YELLOW);
        assert_eq!(style.wrap, 120);
        assert!(!style.mode.uses_background());
        assert!(TextMode::Shaded.uses_background());
    }

    #[test]
    fn only_blended_text_breaks_lines() {
        let blended = TextStyle::new(TextMode::Blended);
        assert!(blended.check_layout("a\nb").is_ok());
        assert!(blended.with_wrap(60).check_layout("ab").is_ok());

        for mode in [TextMode::Solid, TextMode::Shaded] {
            let style = TextStyle::new(mode);
            assert!(style.check_layout("one line").is_ok());

            let err = style.check_layout("a\nb").unwrap_err();
            assert!(err.contains(&mode.to_string()), "{}", err);
            assert!(style.with_wrap(60).check_layout("ab").is_err());
        }
    }
}
