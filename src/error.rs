use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why an [`IcoConverter`](crate::IcoConverter) operation failed.  None of
/// these leave the converter in a partially updated state.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source file is unreadable or not a supported image format.
    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        /// The source file.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: io::Error,
    },

    /// A requested size can't be stored in an ICO file.
    #[error("Invalid icon size {width}x{height} (must be 1 to 256 on each side)")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Resampling a decoded source to a requested size failed.
    #[error("Failed to resample {path:?}: {source}")]
    Resample {
        /// The source file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// There are no images to write.
    #[error("No images have been added")]
    EmptyOutput,

    /// The images couldn't be serialized as an ICO file.
    #[error("Failed to serialize ICO data: {0}")]
    Serialize(#[source] io::Error),

    /// The ICO data couldn't be written to a caller-supplied writer.
    #[error("Failed to write ICO data: {0}")]
    Stream(#[source] io::Error),

    /// The destination file couldn't be written.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// The destination file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
