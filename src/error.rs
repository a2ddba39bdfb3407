//! Error types for the card compositor

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for compositor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering cards or building print runs
#[derive(Error, Debug)]
pub enum Error {
    /// A template asset or font is missing or cannot be decoded.
    ///
    /// This is a configuration problem: retrying will not help.
    #[error("Unusable asset {}: {reason}", path.display())]
    Asset { path: PathBuf, reason: String },

    /// Invalid configuration (layout, batch size, config file)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A card type carries a color string that cannot be parsed
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Lookup miss in the card store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Print run range with start after end
    #[error("Invalid id range: {start}..={end}")]
    InvalidRange { start: u32, end: u32 },

    /// Caller supplied a value outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to encode an image or archive
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Filesystem error while reading or writing generated files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Asset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error comes from configuration rather than the request
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Asset { .. } | Error::Config(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Encode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_errors_are_fatal() {
        let err = Error::asset("assets/Contour.png", "No such file");
        assert!(err.is_fatal());
        assert!(err.to_string().contains("assets/Contour.png"));
        assert!(!Error::NotFound("card 3".into()).is_fatal());
    }
}
