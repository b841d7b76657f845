//=========================================================================
// Diagnostics
//=========================================================================
//
// Structured failure reporting for setup, resource loading and defects.
//
// Every error carries the source location it was raised at, captured via
// `#[track_caller]`, so the top-level handler in `AppLoop::run` can print
// a file/line tagged diagnostic without a backtrace.
//
// Taxonomy:
//   Setup         → a native subsystem failed to initialize
//   ResourceLoad  → a lazily-loaded resource could not be acquired
//   Programming   → a defect (e.g. an unknown text render mode tag)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::panic::Location;

use log::error;

//=== Internal Dependencies ===============================================

use crate::core::resource::TextMode;

//=== ResourceKind ========================================================

/// The four kinds of handle-managed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Font,
    Surface,
    Texture,
    Music,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Font => "font",
            Self::Surface => "surface",
            Self::Texture => "texture",
            Self::Music => "music",
        };
        f.write_str(name)
    }
}

//=== LoadMethod ==========================================================

/// Which composition rule produces (or produced) a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMethod {
    /// Decoded from a file on first access.
    File,

    /// Wrapped around a native object supplied at construction.
    Native,

    /// Texture uploaded from an existing surface handle.
    FromSurface,

    /// Rasterized from a font and a text string.
    Text(TextMode),
}

impl fmt::Display for LoadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Native => f.write_str("native"),
            Self::FromSurface => f.write_str("surface"),
            Self::Text(mode) => write!(f, "text ({})", mode),
        }
    }
}

//=== ErrorKind ===========================================================

/// Categorised failure payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A native subsystem (video, ttf, audio, window, renderer…) failed.
    Setup {
        subsystem: &'static str,
        cause: String,
    },

    /// A resource's lazy load failed.
    ResourceLoad {
        kind: ResourceKind,
        identifier: String,
        method: LoadMethod,
        cause: String,
    },

    /// A defect in the calling code rather than a runtime condition.
    Programming { message: String },
}

//=== AppError ============================================================

/// Error raised anywhere in the framework, tagged with its origin.
#[derive(Debug, Clone)]
pub struct AppError {
    kind: ErrorKind,
    location: &'static Location<'static>,
}

/// Convenience alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    //--- Construction -----------------------------------------------------

    #[track_caller]
    pub fn setup(subsystem: &'static str, cause: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Setup {
                subsystem,
                cause: cause.into(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn resource_load(
        kind: ResourceKind,
        identifier: impl Into<String>,
        method: LoadMethod,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::ResourceLoad {
                kind,
                identifier: identifier.into(),
                method,
                cause: cause.into(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn programming(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Programming {
                message: message.into(),
            },
            location: Location::caller(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Source file the error was raised in.
    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Source line the error was raised at.
    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn is_setup(&self) -> bool {
        matches!(self.kind, ErrorKind::Setup { .. })
    }

    pub fn is_resource_load(&self) -> bool {
        matches!(self.kind, ErrorKind::ResourceLoad { .. })
    }

    pub fn is_programming(&self) -> bool {
        matches!(self.kind, ErrorKind::Programming { .. })
    }

    //--- Reporting --------------------------------------------------------

    /// Writes the diagnostic to the log sink at error level.
    pub fn report(&self) {
        error!(
            target: "app",
            "{} from {}-{}: {}",
            self.label(),
            self.file(),
            self.line(),
            self
        );
    }

    fn label(&self) -> &'static str {
        match self.kind {
            ErrorKind::Setup { .. } => "setup error",
            ErrorKind::ResourceLoad { .. } => "resource load error",
            ErrorKind::Programming { .. } => "programming error",
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Setup { subsystem, cause } => {
                write!(f, "failed to init {} since {}!", subsystem, cause)
            }
            ErrorKind::ResourceLoad {
                kind,
                identifier,
                method,
                cause,
            } => write!(
                f,
                "failed to load {} '{}' from {} since {}!",
                kind, identifier, method, cause
            ),
            ErrorKind::Programming { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AppError>();
    }

    #[test]
    fn captures_caller_location() {
        let line = line!() + 1;
        let err = AppError::setup("ttf", "no library");

        assert_eq!(err.line(), line);
        assert!(err.file().ends_with("error.rs"));
    }

    #[test]
    fn resource_load_display_names_identifier_and_cause() {
        let err = AppError::resource_load(
            ResourceKind::Texture,
            "titi.png",
            LoadMethod::File,
            "renderer not ready",
        );

        let text = err.to_string();
        assert!(text.contains("texture"));
        assert!(text.contains("'titi.png'"));
        assert!(text.contains("renderer not ready"));
        assert!(err.is_resource_load());
    }

    #[test]
    fn text_method_records_render_mode() {
        let err = AppError::resource_load(
            ResourceKind::Surface,
            "hello",
            LoadMethod::Text(TextMode::Shaded),
            "zero width",
        );

        assert!(err.to_string().contains("shaded"));
    }

    #[test]
    fn categories_are_distinct() {
        let setup = AppError::setup("window", "no display");
        let defect = AppError::programming("invalid text render mode 9!");

        assert!(setup.is_setup() && !setup.is_programming());
        assert!(defect.is_programming() && !defect.is_resource_load());
        assert_eq!(defect.to_string(), "invalid text render mode 9!");
    }
}
