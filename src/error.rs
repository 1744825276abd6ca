//! Error types.
//!
//! Rendering never fails. These errors only surface at the edges: reading
//! and decoding assets, encoding output, and parsing profiles. Inside the
//! renderer they are logged and the affected layer is omitted.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A raster asset could not be decoded.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An SVG asset or symbol could not be parsed.
    #[error("failed to parse svg {name}: {source}")]
    Svg {
        name: String,
        #[source]
        source: resvg::usvg::Error,
    },

    /// No asset with the given name exists in the bundle.
    #[error("asset {name} not found in {root}")]
    AssetNotFound { name: String, root: PathBuf },

    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),

    /// A profile or manifest was not valid JSON.
    #[error("invalid profile: {0}")]
    Profile(#[from] serde_json::Error),
}

/// Result type for fallible icon operations.
pub type IconResult<T> = Result<T, IconError>;
