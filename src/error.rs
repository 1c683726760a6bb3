use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    /// An overlay image could not be located or decoded. The compositor treats
    /// this as non-fatal and skips the overlay; it only surfaces from direct
    /// image loading calls.
    #[error("missing resource {}: {reason}", path.display())]
    MissingResource { path: PathBuf, reason: String },

    /// A string could not be measured in the requested font and size. Layout
    /// cannot continue without reliable widths, so this is always fatal.
    #[error("cannot measure {text:?} in font {font:?} at size {size}: {reason}")]
    MeasurementFailure {
        text: String,
        font: String,
        size: f32,
        reason: String,
    },

    /// The render options describe an impossible page
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// Options or overlays could not be read from JSON
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn measurement<S: ToString>(text: &str, font: &str, size: f32, reason: S) -> Error {
        Error::MeasurementFailure {
            text: text.to_string(),
            font: font.to_string(),
            size,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing<P: Into<PathBuf>, S: ToString>(path: P, reason: S) -> Error {
        Error::MissingResource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
