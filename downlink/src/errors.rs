use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("gRPC call failed: {0}")]
    Status(#[from] tonic::Status),

    #[error("Invalid authorization metadata: {0}")]
    Metadata(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("Login failed: {}: {}", .0.code(), .0.message())]
    Login(tonic::Status),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Enqueue failed: {0}")]
    Enqueue(String),

    #[error("Console error: {0}")]
    Console(#[from] console::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
