//! Error types for container output.

use bss_codec::EncodeError;
use thiserror::Error;

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Errors that can occur while writing an Avro container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The embedded schema could not be parsed.
    #[error("invalid container schema: {0}")]
    Schema(String),

    /// The Avro library rejected a value or failed to write.
    #[error("avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    /// A record could not be mapped to the schema.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
