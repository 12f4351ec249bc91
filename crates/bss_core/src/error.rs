//! Error types for the segment data formatter.

use std::io;
use thiserror::Error;

/// Result type for formatter operations.
pub type BssResult<T> = Result<T, BssError>;

/// Errors that can occur while formatting segment data.
#[derive(Debug, Error)]
pub enum BssError {
    /// The line format configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] bss_codec::ConfigError),

    /// A record could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] bss_codec::EncodeError),

    /// The Avro container failed.
    #[error("container error: {0}")]
    Container(#[from] bss_avro::ContainerError),

    /// Writing to or flushing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An output format name is not recognized.
    #[error("unknown data format: {name}")]
    UnknownFormat {
        /// The unrecognized name.
        name: String,
    },

    /// Text output was requested without a line format.
    #[error("text encoder parameters are not specified")]
    MissingLineFormat,
}

impl BssError {
    /// Returns the encode error behind this error, if any.
    ///
    /// Encode errors from the container path are unwrapped too.
    pub fn as_encode(&self) -> Option<&bss_codec::EncodeError> {
        match self {
            BssError::Encode(e) => Some(e),
            BssError::Container(bss_avro::ContainerError::Encode(e)) => Some(e),
            _ => None,
        }
    }
}
