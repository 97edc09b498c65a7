use core::fmt;

/// Platform-specific error details.
///
/// Where the platform reports a native error code (e.g. a `CGLError` from
/// the IOSurface aliasing call on macOS), the original code is preserved.
/// Use [`Display`](fmt::Display) to obtain a human-readable description.
#[derive(Debug)]
#[non_exhaustive]
pub enum PlatformError {
    Message(&'static str),
    #[cfg(target_os = "macos")]
    Cgl(i32),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            #[cfg(target_os = "macos")]
            Self::Cgl(code) => {
                write!(
                    f,
                    "{} (CGL error {code})",
                    crate::platform::macos::gl::cgl_error_string(*code)
                )
            }
        }
    }
}

impl core::error::Error for PlatformError {}

/// Top-level crate error.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The native format tag resolves to no known descriptor; the caller
    /// must fall back to a copy-based upload path for this frame.
    UnsupportedFormat,
    /// Plane index out of range for the resolved format (caller contract
    /// violation).
    InvalidPlane,
    Platform(PlatformError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => f.write_str("unsupported pixel format"),
            Self::InvalidPlane => f.write_str("plane index out of range"),
            Self::Platform(e) => write!(f, "platform error: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}
